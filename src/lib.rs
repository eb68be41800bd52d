#[cfg(feature = "cli")]
pub mod cli;
pub mod cloud;
pub mod config;
pub mod error;
pub mod input;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod resize;
pub mod text_metrics;
pub mod theme;
pub mod viewport;

#[cfg(feature = "cli")]
pub use cli::run;
pub use cloud::WordCloud;
pub use config::{Config, LayoutConfig, RenderConfig, ViewportConfig};
pub use error::WordCloudError;
pub use input::{InputMapper, InputOutcome, PointerEvent, PointerKind, SurfaceScale};
pub use ir::{CanvasSize, WordItem};
pub use layout::text::{FastMetrics, FontMetrics, MetricsProvider};
pub use layout::{ContentBounds, PlacedWord, PlacementStrategy, WordLayout, compute_layout, place};
pub use parser::parse_wordcloud;
pub use render::{ControlAction, ControlLayout, Surface, SvgSurface, render_svg};
pub use resize::ResizeAdapter;
pub use theme::Theme;
pub use viewport::{Viewport, ViewportState};

/// Settings for one-shot rendering of a word list to SVG.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
            render: RenderConfig::default(),
        }
    }

    pub fn modern() -> Self {
        Self {
            theme: Theme::modern(),
            ..Self::classic()
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::classic()
    }
}

/// Parses `source`, lays it out at the nominal render size and returns the
/// SVG with an identity viewport.
pub fn render_with_options(source: &str, options: RenderOptions) -> anyhow::Result<String> {
    let parsed = parse_wordcloud(source)?;
    let mut config = Config {
        theme: options.theme,
        layout: options.layout,
        render: options.render,
        ..Config::default()
    };
    if let Some(init) = parsed.init_config {
        config = config::merge_init_config(config, init);
    }
    let size = ResizeAdapter::from_config(&config.render).fit(config.render.width);
    let layout = compute_layout(&parsed.items, size, &config.theme, &config.layout);
    Ok(render_svg(
        &layout,
        ViewportState::default(),
        None,
        &config.theme,
        &config.render,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_with_options_produces_svg() {
        let mut options = RenderOptions::modern();
        options.layout.fast_text_metrics = true;
        options.layout.seed = Some(11);
        let svg = render_with_options("wordcloud\nrust : 9\nwasm : 3", options).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains(">rust</text>"));
        assert!(svg.contains(">wasm</text>"));
    }

    #[test]
    fn render_with_options_surfaces_parse_errors() {
        assert!(render_with_options("rust : many", RenderOptions::default()).is_err());
    }
}
