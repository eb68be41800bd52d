use crate::config::RenderConfig;
use crate::ir::CanvasSize;

/// Derives the canvas size from the container width, keeping the nominal
/// aspect ratio and never going below the configured floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeAdapter {
    nominal: CanvasSize,
    floor: CanvasSize,
}

impl ResizeAdapter {
    pub fn new(nominal: CanvasSize, floor: CanvasSize) -> Self {
        Self { nominal, floor }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(
            CanvasSize::new(config.width, config.height),
            CanvasSize::new(config.min_width, config.min_height),
        )
    }

    pub fn nominal(&self) -> CanvasSize {
        self.nominal
    }

    pub fn fit(&self, container_width: f64) -> CanvasSize {
        let width = container_width.min(self.nominal.width);
        let height = if self.nominal.width > 0.0 {
            width * self.nominal.height / self.nominal.width
        } else {
            self.nominal.height
        };
        CanvasSize::new(width.max(self.floor.width), height.max(self.floor.height))
    }
}
