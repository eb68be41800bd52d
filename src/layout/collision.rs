use kurbo::{Point, Rect};

use crate::ir::CanvasSize;

use super::PlacedWord;

/// Padded AABB test: `placed` is grown by `padding` on every side and the
/// candidate box must stay strictly clear of it on at least one axis.
pub(super) fn collides(candidate: Rect, placed: &[PlacedWord], padding: f64) -> bool {
    placed.iter().any(|word| {
        let other = word.rect().inflate(padding, padding);
        candidate.x0 < other.x1
            && candidate.x1 > other.x0
            && candidate.y0 < other.y1
            && candidate.y1 > other.y0
    })
}

pub(super) fn within_canvas(candidate: Rect, size: CanvasSize, margin: f64) -> bool {
    candidate.x0 >= margin
        && candidate.y0 >= margin
        && candidate.x1 <= size.width - margin
        && candidate.y1 <= size.height - margin
}

/// Total area `candidate` shares with the placed boxes (unpadded).
pub(super) fn overlap_area(candidate: Rect, placed: &[PlacedWord]) -> f64 {
    placed
        .iter()
        .map(|word| candidate.intersect(word.rect()).area())
        .sum()
}

pub(super) fn box_at(center: Point, width: f64, height: f64) -> Rect {
    Rect::from_center_size(center, (width, height))
}
