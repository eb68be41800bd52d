//! Pointer handling: screen-to-content mapping, hit-testing, hover tracking
//! and the pan drag gesture.
//!
//! Pointer positions arrive in CSS pixels. They are first scaled into
//! backing-store pixels with a [`SurfaceScale`], then mapped into content
//! space with the inverse of the viewport transform used for rendering.

use kurbo::{Point, Vec2};

use crate::layout::PlacedWord;
use crate::viewport::{Viewport, ViewportState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Position relative to the surface's top-left corner, in CSS pixels.
    pub position: Point,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
        }
    }
}

/// Backing-store pixels per CSS pixel on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceScale {
    pub x: f64,
    pub y: f64,
}

impl SurfaceScale {
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    /// Derives the scale from the backing-store size and the displayed size.
    /// A zero displayed size yields the identity scale.
    pub fn from_sizes(backing: (f64, f64), displayed: (f64, f64)) -> Self {
        let axis = |backing: f64, displayed: f64| {
            if displayed > 0.0 && backing > 0.0 {
                backing / displayed
            } else {
                1.0
            }
        };
        Self {
            x: axis(backing.0, displayed.0),
            y: axis(backing.1, displayed.1),
        }
    }

    pub fn apply(&self, css: Point) -> Point {
        Point::new(css.x * self.x, css.y * self.y)
    }
}

impl Default for SurfaceScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerState {
    Idle,
    Dragging {
        /// Pointer position minus pan at press time.
        origin: Vec2,
        press: Point,
        moved: bool,
    },
}

/// What the host should do after an event was handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputOutcome {
    pub redraw: bool,
    /// Placement rank of a clicked word.
    pub clicked: Option<usize>,
}

pub fn to_content(screen_css: Point, scale: SurfaceScale, viewport: ViewportState) -> Point {
    viewport.to_content(scale.apply(screen_css))
}

/// First word in placement order whose box contains `point`.
pub fn hit_test(words: &[PlacedWord], point: Point) -> Option<usize> {
    words.iter().position(|word| word.contains(point))
}

#[derive(Debug, Clone)]
pub struct InputMapper {
    state: PointerState,
    hovered: Option<usize>,
    scale: SurfaceScale,
}

impl InputMapper {
    pub fn new(scale: SurfaceScale) -> Self {
        Self {
            state: PointerState::Idle,
            hovered: None,
            scale,
        }
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, PointerState::Dragging { .. })
    }

    pub fn scale(&self) -> SurfaceScale {
        self.scale
    }

    pub fn set_scale(&mut self, scale: SurfaceScale) {
        self.scale = scale;
    }

    /// Forgets the hovered word, e.g. after the placed words were replaced.
    pub fn clear_hover(&mut self) -> bool {
        self.hovered.take().is_some()
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        words: &[PlacedWord],
        viewport: &mut Viewport,
    ) -> InputOutcome {
        let screen = self.scale.apply(event.position);
        match (event.kind, self.state) {
            (PointerKind::Down, _) => {
                self.state = PointerState::Dragging {
                    origin: screen.to_vec2() - viewport.pan(),
                    press: screen,
                    moved: false,
                };
                InputOutcome::default()
            }
            (PointerKind::Move, PointerState::Dragging { origin, press, moved }) => {
                let pan = screen.to_vec2() - origin;
                let changed = pan != viewport.pan();
                viewport.set_pan(pan);
                self.state = PointerState::Dragging {
                    origin,
                    press,
                    moved: moved || screen != press,
                };
                InputOutcome {
                    redraw: changed,
                    clicked: None,
                }
            }
            (PointerKind::Move, PointerState::Idle) => {
                let hit = hit_test(words, viewport.state().to_content(screen));
                let changed = hit != self.hovered;
                self.hovered = hit;
                InputOutcome {
                    redraw: changed,
                    clicked: None,
                }
            }
            (PointerKind::Up, PointerState::Dragging { moved, .. }) => {
                self.state = PointerState::Idle;
                // Hover is frozen during a drag; resync it with the release point.
                let hit = hit_test(words, viewport.state().to_content(screen));
                let changed = hit != self.hovered;
                self.hovered = hit;
                InputOutcome {
                    redraw: changed,
                    clicked: if moved { None } else { hit },
                }
            }
            (PointerKind::Up, PointerState::Idle) => InputOutcome::default(),
            (PointerKind::Leave, _) => {
                self.state = PointerState::Idle;
                InputOutcome {
                    redraw: self.clear_hover(),
                    clicked: None,
                }
            }
        }
    }
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new(SurfaceScale::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PlacementStrategy;

    fn word(text: &str, x: f64, y: f64, width: f64, height: f64, rank: usize) -> PlacedWord {
        PlacedWord {
            text: text.to_string(),
            value: 1.0,
            x,
            y,
            width,
            height,
            font_size: 12.0,
            color: "#000".to_string(),
            rank,
            strategy: PlacementStrategy::Spiral,
        }
    }

    fn words() -> Vec<PlacedWord> {
        vec![
            word("alpha", 100.0, 100.0, 60.0, 20.0, 0),
            word("beta", 200.0, 100.0, 40.0, 16.0, 1),
            word("gamma", 115.0, 105.0, 40.0, 16.0, 2),
        ]
    }

    #[test]
    fn hit_test_finds_the_containing_word() {
        let words = words();
        assert_eq!(hit_test(&words, Point::new(200.0, 100.0)), Some(1));
        assert_eq!(hit_test(&words, Point::new(300.0, 300.0)), None);
    }

    #[test]
    fn earlier_rank_wins_overlaps() {
        let words = words();
        assert_eq!(hit_test(&words, Point::new(120.0, 105.0)), Some(0));
        assert_eq!(hit_test(&words, Point::new(133.0, 110.0)), Some(2));
    }

    #[test]
    fn content_mapping_inverts_zoom_pan_and_scale() {
        let viewport = ViewportState {
            zoom: 2.0,
            pan: Vec2::new(10.0, 20.0),
        };
        let scale = SurfaceScale::from_sizes((800.0, 600.0), (400.0, 300.0));
        // CSS (105, 110) -> backing (210, 220) -> content (100, 100).
        let content = to_content(Point::new(105.0, 110.0), scale, viewport);
        assert!((content - Point::new(100.0, 100.0)).hypot() < 1e-9);
    }

    #[test]
    fn zero_display_size_gives_identity_scale() {
        assert_eq!(SurfaceScale::from_sizes((800.0, 600.0), (0.0, 0.0)), SurfaceScale::IDENTITY);
    }

    #[test]
    fn press_release_without_move_clicks() {
        let words = words();
        let mut viewport = Viewport::default();
        let mut input = InputMapper::default();
        input.handle(PointerEvent::new(PointerKind::Down, 200.0, 100.0), &words, &mut viewport);
        let outcome = input.handle(PointerEvent::new(PointerKind::Up, 200.0, 100.0), &words, &mut viewport);
        assert_eq!(outcome.clicked, Some(1));
        assert_eq!(input.state(), PointerState::Idle);
    }

    #[test]
    fn drag_pans_and_suppresses_click() {
        let words = words();
        let mut viewport = Viewport::default();
        let mut input = InputMapper::default();
        input.handle(PointerEvent::new(PointerKind::Down, 200.0, 100.0), &words, &mut viewport);
        assert!(input.is_dragging());
        let moved = input.handle(PointerEvent::new(PointerKind::Move, 230.0, 90.0), &words, &mut viewport);
        assert!(moved.redraw);
        assert_eq!(viewport.pan(), Vec2::new(30.0, -10.0));
        let outcome = input.handle(PointerEvent::new(PointerKind::Up, 230.0, 90.0), &words, &mut viewport);
        assert_eq!(outcome.clicked, None);
        assert!(!input.is_dragging());
    }

    #[test]
    fn drag_returning_to_press_point_still_suppresses_click() {
        let words = words();
        let mut viewport = Viewport::default();
        let mut input = InputMapper::default();
        input.handle(PointerEvent::new(PointerKind::Down, 200.0, 100.0), &words, &mut viewport);
        input.handle(PointerEvent::new(PointerKind::Move, 210.0, 100.0), &words, &mut viewport);
        input.handle(PointerEvent::new(PointerKind::Move, 200.0, 100.0), &words, &mut viewport);
        let outcome = input.handle(PointerEvent::new(PointerKind::Up, 200.0, 100.0), &words, &mut viewport);
        assert_eq!(outcome.clicked, None);
        assert_eq!(viewport.pan(), Vec2::ZERO);
    }

    #[test]
    fn drag_continues_from_existing_pan() {
        let words = words();
        let mut viewport = Viewport::default();
        viewport.set_pan(Vec2::new(50.0, 50.0));
        let mut input = InputMapper::default();
        input.handle(PointerEvent::new(PointerKind::Down, 10.0, 10.0), &words, &mut viewport);
        input.handle(PointerEvent::new(PointerKind::Move, 15.0, 5.0), &words, &mut viewport);
        assert_eq!(viewport.pan(), Vec2::new(55.0, 45.0));
    }

    #[test]
    fn leave_ends_drag_without_click() {
        let words = words();
        let mut viewport = Viewport::default();
        let mut input = InputMapper::default();
        input.handle(PointerEvent::new(PointerKind::Down, 200.0, 100.0), &words, &mut viewport);
        let outcome = input.handle(PointerEvent::new(PointerKind::Leave, 200.0, 100.0), &words, &mut viewport);
        assert_eq!(outcome.clicked, None);
        assert_eq!(input.state(), PointerState::Idle);
        let after = input.handle(PointerEvent::new(PointerKind::Up, 200.0, 100.0), &words, &mut viewport);
        assert_eq!(after.clicked, None);
    }

    #[test]
    fn release_resyncs_hover_with_pointer() {
        let words = words();
        let mut viewport = Viewport::default();
        let mut input = InputMapper::default();
        input.handle(PointerEvent::new(PointerKind::Move, 200.0, 100.0), &words, &mut viewport);
        assert_eq!(input.hovered(), Some(1));

        // Press on empty space without an intervening move, drag, release.
        input.handle(PointerEvent::new(PointerKind::Down, 350.0, 250.0), &words, &mut viewport);
        input.handle(PointerEvent::new(PointerKind::Move, 340.0, 240.0), &words, &mut viewport);
        assert_eq!(input.hovered(), Some(1));
        let outcome = input.handle(PointerEvent::new(PointerKind::Up, 340.0, 240.0), &words, &mut viewport);
        assert!(outcome.redraw);
        assert_eq!(outcome.clicked, None);
        assert_eq!(input.hovered(), None);
    }

    #[test]
    fn stationary_release_hovers_the_clicked_word() {
        let words = words();
        let mut viewport = Viewport::default();
        let mut input = InputMapper::default();
        input.handle(PointerEvent::new(PointerKind::Down, 200.0, 100.0), &words, &mut viewport);
        let outcome = input.handle(PointerEvent::new(PointerKind::Up, 200.0, 100.0), &words, &mut viewport);
        assert_eq!(outcome.clicked, Some(1));
        assert!(outcome.redraw);
        assert_eq!(input.hovered(), Some(1));
    }

    #[test]
    fn hover_redraws_only_on_change() {
        let words = words();
        let mut viewport = Viewport::default();
        let mut input = InputMapper::default();
        let first = input.handle(PointerEvent::new(PointerKind::Move, 200.0, 100.0), &words, &mut viewport);
        assert!(first.redraw);
        assert_eq!(input.hovered(), Some(1));
        let same = input.handle(PointerEvent::new(PointerKind::Move, 201.0, 101.0), &words, &mut viewport);
        assert!(!same.redraw);
        let off = input.handle(PointerEvent::new(PointerKind::Move, 350.0, 250.0), &words, &mut viewport);
        assert!(off.redraw);
        assert_eq!(input.hovered(), None);
    }

    #[test]
    fn hover_respects_zoom() {
        let words = words();
        let mut viewport = Viewport::default();
        viewport.zoom_in();
        viewport.zoom_in();
        viewport.zoom_in();
        viewport.zoom_in();
        viewport.zoom_in();
        // zoom 2.0: beta's center (200, 100) is drawn at (400, 200).
        let mut input = InputMapper::default();
        input.handle(PointerEvent::new(PointerKind::Move, 400.0, 200.0), &words, &mut viewport);
        assert_eq!(input.hovered(), Some(1));
        input.handle(PointerEvent::new(PointerKind::Move, 200.0, 100.0), &words, &mut viewport);
        assert_eq!(input.hovered(), None);
    }

    #[test]
    fn leave_clears_hover() {
        let words = words();
        let mut viewport = Viewport::default();
        let mut input = InputMapper::default();
        input.handle(PointerEvent::new(PointerKind::Move, 100.0, 100.0), &words, &mut viewport);
        let outcome = input.handle(PointerEvent::new(PointerKind::Leave, 0.0, 0.0), &words, &mut viewport);
        assert!(outcome.redraw);
        assert_eq!(input.hovered(), None);
    }
}
