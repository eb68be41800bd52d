//! Count-dependent sizing: font range, padding and spiral lane count all
//! shrink as the cloud gets denser.

pub(super) fn font_range(count: usize) -> (f64, f64) {
    let root = (count.max(1) as f64).sqrt();
    let min_font = (40.0 / root).clamp(10.0, 14.0);
    let max_font = (60.0 / root).clamp(16.0, 32.0);
    (min_font, max_font)
}

pub(super) fn padding(count: usize) -> f64 {
    (15.0 / (count.max(1) as f64).sqrt()).clamp(3.0, 8.0)
}

pub(super) fn lane_count(count: usize, max_lanes: usize) -> usize {
    count.div_ceil(10).clamp(1, max_lanes.max(1))
}

/// Maps `value` linearly from `[min_value, max_value]` into the font range.
/// A flat value range maps every word to the midpoint.
pub(super) fn font_size_for(value: f64, (min_value, max_value): (f64, f64), range: (f64, f64)) -> f64 {
    let (min_font, max_font) = range;
    let span = max_value - min_value;
    if span <= 0.0 {
        return (min_font + max_font) / 2.0;
    }
    let t = ((value - min_value) / span).clamp(0.0, 1.0);
    min_font + t * (max_font - min_font)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_range_clamps_both_ends() {
        assert_eq!(font_range(1), (14.0, 32.0));
        assert_eq!(font_range(4), (14.0, 30.0));
        let (min, max) = font_range(10_000);
        assert_eq!(min, 10.0);
        assert_eq!(max, 16.0);
    }

    #[test]
    fn padding_shrinks_with_count() {
        assert_eq!(padding(1), 8.0);
        assert_eq!(padding(9), 5.0);
        assert_eq!(padding(400), 3.0);
    }

    #[test]
    fn lane_count_is_bounded() {
        assert_eq!(lane_count(1, 8), 1);
        assert_eq!(lane_count(10, 8), 1);
        assert_eq!(lane_count(11, 8), 2);
        assert_eq!(lane_count(500, 8), 8);
        assert_eq!(lane_count(0, 8), 1);
    }

    #[test]
    fn flat_value_range_uses_midpoint() {
        assert_eq!(font_size_for(5.0, (5.0, 5.0), (12.0, 20.0)), 16.0);
    }

    #[test]
    fn interpolation_hits_range_ends() {
        let range = (10.0, 30.0);
        assert_eq!(font_size_for(0.0, (0.0, 10.0), range), 10.0);
        assert_eq!(font_size_for(10.0, (0.0, 10.0), range), 30.0);
        assert_eq!(font_size_for(5.0, (0.0, 10.0), range), 20.0);
    }

    #[test]
    fn infinite_values_pin_to_range_ends() {
        let range = (10.0, 30.0);
        assert_eq!(font_size_for(f64::INFINITY, (0.0, 10.0), range), 30.0);
        assert_eq!(font_size_for(f64::NEG_INFINITY, (0.0, 10.0), range), 10.0);
        // No finite values at all leaves an empty range.
        let empty = (f64::INFINITY, f64::NEG_INFINITY);
        assert_eq!(font_size_for(f64::INFINITY, empty, range), 20.0);
    }
}
