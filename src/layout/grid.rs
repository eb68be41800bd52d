use kurbo::Point;

use crate::ir::CanvasSize;

use super::PlacedWord;
use super::collision::{box_at, collides, within_canvas};

/// Row-major scan of a uniform grid over the inset canvas. Cells are sized
/// from the word's larger side so the scan stays coarse for big words.
pub(super) fn grid_scan(
    size: CanvasSize,
    margin: f64,
    padding: f64,
    cell_factor: f64,
    placed: &[PlacedWord],
    width: f64,
    height: f64,
) -> Option<Point> {
    let cell = width.max(height) + padding * cell_factor;
    if cell <= 0.0 {
        return None;
    }
    let first_x = margin + width / 2.0;
    let first_y = margin + height / 2.0;
    let last_x = size.width - margin - width / 2.0;
    let last_y = size.height - margin - height / 2.0;
    if first_x > last_x || first_y > last_y {
        return None;
    }

    let rows = ((last_y - first_y) / cell).floor() as usize + 1;
    let cols = ((last_x - first_x) / cell).floor() as usize + 1;
    (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .map(|(row, col)| Point::new(first_x + col as f64 * cell, first_y + row as f64 * cell))
        .find(|pos| {
            let candidate = box_at(*pos, width, height);
            within_canvas(candidate, size, margin) && !collides(candidate, placed, padding)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PlacementStrategy;

    fn word(x: f64, y: f64, width: f64, height: f64) -> PlacedWord {
        PlacedWord {
            text: "w".to_string(),
            value: 1.0,
            x,
            y,
            width,
            height,
            font_size: 12.0,
            color: "#000".to_string(),
            rank: 0,
            strategy: PlacementStrategy::Spiral,
        }
    }

    #[test]
    fn empty_canvas_uses_the_top_left_cell() {
        let size = CanvasSize::new(400.0, 300.0);
        let pos = grid_scan(size, 15.0, 4.0, 1.2, &[], 40.0, 20.0).unwrap();
        assert_eq!(pos, Point::new(35.0, 25.0));
    }

    #[test]
    fn scan_skips_occupied_cells_row_major() {
        let size = CanvasSize::new(400.0, 300.0);
        let placed = [word(35.0, 25.0, 40.0, 20.0)];
        let pos = grid_scan(size, 15.0, 4.0, 1.2, &placed, 40.0, 20.0).unwrap();
        assert_eq!(pos.y, 25.0);
        assert!(pos.x > 35.0);
    }

    #[test]
    fn cells_never_cross_the_margin() {
        // Half extents that need not round-trip through the box edges.
        let size = CanvasSize::new(400.0, 300.0);
        for width in [14.7, 33.3, 51.9, 70.1] {
            let pos = grid_scan(size, 15.0, 3.0, 1.2, &[], width, 17.3).unwrap();
            let rect = box_at(pos, width, 17.3);
            assert!(rect.x0 >= 15.0, "width {width}: x0 = {}", rect.x0);
            assert!(rect.y0 >= 15.0, "width {width}: y0 = {}", rect.y0);
            assert!(rect.x1 <= 385.0 && rect.y1 <= 285.0);
        }
    }

    #[test]
    fn word_larger_than_canvas_finds_nothing() {
        let size = CanvasSize::new(400.0, 300.0);
        assert!(grid_scan(size, 15.0, 4.0, 1.2, &[], 380.0, 20.0).is_none());
    }

    #[test]
    fn full_canvas_finds_nothing() {
        let size = CanvasSize::new(400.0, 300.0);
        let placed = [word(200.0, 150.0, 400.0, 300.0)];
        assert!(grid_scan(size, 15.0, 4.0, 1.2, &placed, 10.0, 10.0).is_none());
    }
}
