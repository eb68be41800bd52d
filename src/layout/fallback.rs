use std::f64::consts::TAU;

use kurbo::Point;
use rand::Rng;

use crate::ir::CanvasSize;

use super::PlacedWord;
use super::collision::{box_at, overlap_area};

/// Last resort: sample the central disk and keep the position with the least
/// overlap. Always returns a position, overlapping or not.
pub(super) fn least_overlap<R: Rng>(
    size: CanvasSize,
    samples: usize,
    placed: &[PlacedWord],
    width: f64,
    height: f64,
    rng: &mut R,
) -> Point {
    let (cx, cy) = size.center();
    let radius = size.min_side() / 3.0;
    let mut best = Point::new(cx, cy);
    let mut best_overlap = f64::INFINITY;

    for _ in 0..samples.max(1) {
        let angle = rng.random::<f64>() * TAU;
        let distance = rng.random::<f64>() * radius;
        let pos = Point::new(cx + distance * angle.cos(), cy + distance * angle.sin());
        let overlap = overlap_area(box_at(pos, width, height), placed);
        if overlap < best_overlap {
            best = pos;
            best_overlap = overlap;
            if overlap <= 0.0 {
                break;
            }
        }
    }
    tracing::trace!(x = best.x, y = best.y, overlap = best_overlap, "fallback sample chosen");
    best
}
