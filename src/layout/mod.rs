mod collision;
mod fallback;
mod grid;
mod sizing;
mod spiral;
pub mod text;
pub(crate) mod types;
pub use types::*;

use kurbo::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::LayoutConfig;
use crate::ir::{CanvasSize, WordItem};
use crate::theme::Theme;

use fallback::least_overlap;
use grid::grid_scan;
use sizing::{font_range, font_size_for, lane_count, padding};
use spiral::{SpiralLane, SpiralSearch};
use text::{FastMetrics, FontMetrics, MetricsProvider};

/// Lays out `items` on a canvas of `size`.
///
/// Words are placed in descending value order (stable on ties). Each word
/// tries the spiral search first, then a grid scan, then a least-overlap
/// random sample, so the result always has one `PlacedWord` per item.
pub fn place<M, R>(
    items: &[WordItem],
    size: CanvasSize,
    metrics: &M,
    theme: &Theme,
    config: &LayoutConfig,
    rng: &mut R,
) -> WordLayout
where
    M: MetricsProvider + ?Sized,
    R: Rng,
{
    if items.is_empty() {
        return WordLayout::empty(size);
    }

    let mut order: Vec<&WordItem> = items.iter().collect();
    order.sort_by(|a, b| sort_weight(b.value).total_cmp(&sort_weight(a.value)));
    if items.iter().any(|item| !item.value.is_finite()) {
        tracing::warn!("non-finite word values are clamped to the ends of the font range");
    }

    let count = order.len();
    let font_range = font_range(count);
    let padding = padding(count);
    let lanes = lane_count(count, config.max_lanes);
    let value_range = order
        .iter()
        .map(|item| item.value)
        .filter(|value| value.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
            (lo.min(value), hi.max(value))
        });

    let mut words: Vec<PlacedWord> = Vec::with_capacity(count);
    let mut stats = PlacementStats::default();

    for (rank, item) in order.into_iter().enumerate() {
        let font_size = font_size_for(sort_weight(item.value), value_range, font_range);
        let extent = metrics.measure(&item.text, font_size, config.line_height);
        let (width, height) = (extent.width, extent.height);

        let spiral = SpiralSearch {
            size,
            margin: config.margin,
            padding,
            max_attempts: config.max_spiral_attempts,
            placed: &words,
        };
        let (pos, strategy) = if let Some(pos) =
            spiral.find(SpiralLane::new(rank % lanes, lanes), width, height)
        {
            (pos, PlacementStrategy::Spiral)
        } else if let Some(pos) = grid_scan(
            size,
            config.margin,
            padding,
            config.grid_cell_factor,
            &words,
            width,
            height,
        ) {
            tracing::debug!(word = %item.text, rank, "spiral exhausted, placed on grid");
            (pos, PlacementStrategy::Grid)
        } else {
            tracing::debug!(word = %item.text, rank, "grid exhausted, using least-overlap fallback");
            let pos = least_overlap(size, config.fallback_samples, &words, width, height, rng);
            (pos, PlacementStrategy::Fallback)
        };
        tracing::trace!(word = %item.text, x = pos.x, y = pos.y, font_size, ?strategy, "placed");

        stats.record(strategy);
        words.push(placed_word(item, pos, width, height, font_size, rank, strategy, theme));
    }

    let bounds = ContentBounds::from_words(&words);
    tracing::debug!(
        words = words.len(),
        spiral = stats.spiral,
        grid = stats.grid,
        fallback = stats.fallback,
        "word cloud layout complete"
    );

    WordLayout {
        size,
        words,
        bounds,
        font_range,
        padding,
        stats,
    }
}

/// Lays out `items` with the metrics and randomness selected by `config`.
///
/// A configured seed makes the fallback path reproducible; without one the
/// generator is seeded from the OS.
pub fn compute_layout(
    items: &[WordItem],
    size: CanvasSize,
    theme: &Theme,
    config: &LayoutConfig,
) -> WordLayout {
    let metrics = default_metrics(theme, config);
    let mut rng = layout_rng(config);
    place(items, size, metrics.as_ref(), theme, config, &mut rng)
}

pub fn default_metrics(theme: &Theme, config: &LayoutConfig) -> Box<dyn MetricsProvider> {
    if config.fast_text_metrics {
        Box::new(FastMetrics)
    } else {
        Box::new(FontMetrics::new(theme.font_family.clone()))
    }
}

pub fn layout_rng(config: &LayoutConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Ordering weight: NaN ranks below every other value.
fn sort_weight(value: f64) -> f64 {
    if value.is_nan() { f64::NEG_INFINITY } else { value }
}

#[allow(clippy::too_many_arguments)]
fn placed_word(
    item: &WordItem,
    pos: Point,
    width: f64,
    height: f64,
    font_size: f64,
    rank: usize,
    strategy: PlacementStrategy,
    theme: &Theme,
) -> PlacedWord {
    PlacedWord {
        text: item.text.clone(),
        value: item.value,
        x: pos.x,
        y: pos.y,
        width,
        height,
        font_size,
        color: theme.color_for_rank(rank),
        rank,
        strategy,
    }
}
