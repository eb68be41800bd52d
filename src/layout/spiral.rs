use std::f64::consts::TAU;

use kurbo::Point;

use crate::ir::CanvasSize;

use super::PlacedWord;
use super::collision::{box_at, collides, within_canvas};

/// One of several interleaved Archimedean search sequences. Lanes differ in
/// starting angle, angular step and radial growth so neighbouring words
/// sweep the plane along different trajectories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SpiralLane {
    pub(super) angle_offset: f64,
    pub(super) angle_step: f64,
    pub(super) radius_step: f64,
}

impl SpiralLane {
    pub(super) fn new(lane: usize, lane_count: usize) -> Self {
        let lane_count = lane_count.max(1);
        let lane_f = lane as f64;
        Self {
            angle_offset: lane_f * TAU / lane_count as f64,
            angle_step: 0.1 + 0.02 * lane_f,
            radius_step: 0.5 + 0.1 * lane_f,
        }
    }

    pub(super) fn candidate(&self, center: Point, attempt: usize) -> Point {
        let k = attempt as f64;
        let angle = self.angle_offset + k * self.angle_step;
        let radius = k * self.radius_step;
        Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    }
}

pub(super) struct SpiralSearch<'a> {
    pub(super) size: CanvasSize,
    pub(super) margin: f64,
    pub(super) padding: f64,
    pub(super) max_attempts: usize,
    pub(super) placed: &'a [PlacedWord],
}

impl SpiralSearch<'_> {
    pub(super) fn find(&self, lane: SpiralLane, width: f64, height: f64) -> Option<Point> {
        let (cx, cy) = self.size.center();
        let center = Point::new(cx, cy);
        (0..self.max_attempts)
            .map(|attempt| lane.candidate(center, attempt))
            .find(|pos| {
                let candidate = box_at(*pos, width, height);
                within_canvas(candidate, self.size, self.margin)
                    && !collides(candidate, self.placed, self.padding)
            })
    }
}
