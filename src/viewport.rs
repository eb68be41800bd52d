use kurbo::{Affine, Point, Vec2};

use crate::config::ViewportConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub zoom: f64,
    pub pan: Vec2,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

impl ViewportState {
    /// Content-to-screen transform: `screen = content * zoom + pan`.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.zoom)
    }

    pub fn to_screen(&self, content: Point) -> Point {
        self.transform() * content
    }

    /// Inverse of [`ViewportState::to_screen`].
    pub fn to_content(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.zoom,
            (screen.y - self.pan.y) / self.zoom,
        )
    }
}

/// Zoom and pan state with clamped step zooming.
///
/// Zoom changes do not move the pan offset, so zooming scales the content
/// about the surface origin.
#[derive(Debug, Clone)]
pub struct Viewport {
    state: ViewportState,
    config: ViewportConfig,
}

impl Viewport {
    pub fn new(config: ViewportConfig) -> Self {
        let (min_zoom, max_zoom) = if config.min_zoom <= config.max_zoom {
            (config.min_zoom, config.max_zoom)
        } else {
            (config.max_zoom, config.min_zoom)
        };
        Self {
            state: ViewportState::default(),
            config: ViewportConfig {
                min_zoom,
                max_zoom,
                ..config
            },
        }
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn zoom(&self) -> f64 {
        self.state.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.state.pan
    }

    /// Zoom readout as a whole percentage.
    pub fn zoom_percent(&self) -> u32 {
        (self.state.zoom * 100.0).round() as u32
    }

    /// Returns `true` when the zoom level changed.
    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.state.zoom + self.config.zoom_step)
    }

    /// Returns `true` when the zoom level changed.
    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.state.zoom - self.config.zoom_step)
    }

    pub fn reset(&mut self) {
        self.state = ViewportState::default();
    }

    pub fn set_pan(&mut self, pan: Vec2) {
        self.state.pan = pan;
    }

    fn set_zoom(&mut self, zoom: f64) -> bool {
        // Snap to 1e-6 so repeated steps land on exact levels.
        let snapped = (zoom * 1e6).round() / 1e6;
        let clamped = snapped.clamp(self.config.min_zoom, self.config.max_zoom);
        if (clamped - self.state.zoom).abs() < f64::EPSILON {
            return false;
        }
        self.state.zoom = clamped;
        true
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}
