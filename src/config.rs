use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Inset from every canvas edge that spiral and grid placements respect.
    pub margin: f64,
    pub max_spiral_attempts: usize,
    pub max_lanes: usize,
    pub fallback_samples: usize,
    pub line_height: f64,
    pub grid_cell_factor: f64,
    pub fast_text_metrics: bool,
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: 15.0,
            max_spiral_attempts: 20_000,
            max_lanes: 8,
            fallback_samples: 1000,
            line_height: 1.2,
            grid_cell_factor: 1.2,
            fast_text_metrics: false,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.5,
            max_zoom: 3.0,
            zoom_step: 0.2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    pub min_width: f64,
    pub min_height: f64,
    pub show_controls: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            min_width: 400.0,
            min_height: 300.0,
            show_controls: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub viewport: ViewportConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfig>,
    viewport: Option<ViewportConfig>,
    render: Option<RenderConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeVariables {
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
    pub palette: Option<Vec<String>>,
    pub highlight_color: Option<String>,
    pub background: Option<String>,
    pub control_fill: Option<String>,
    pub control_border: Option<String>,
    pub control_text: Option<String>,
}

impl ThemeVariables {
    pub fn apply(self, theme: &mut Theme) {
        if let Some(v) = self.font_family {
            theme.font_family = v;
        }
        if let Some(v) = self.font_weight {
            theme.font_weight = v;
        }
        if let Some(v) = self.palette
            && !v.is_empty()
        {
            theme.palette = v;
        }
        if let Some(v) = self.highlight_color {
            theme.highlight_color = v;
        }
        if let Some(v) = self.background {
            theme.background = v;
        }
        if let Some(v) = self.control_fill {
            theme.control_fill = v;
        }
        if let Some(v) = self.control_border {
            theme.control_border = v;
        }
        if let Some(v) = self.control_text {
            theme.control_text = v;
        }
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = Theme::by_name(theme_name)?;
    }
    if let Some(vars) = parsed.theme_variables {
        vars.apply(&mut config.theme);
    }
    if let Some(layout) = parsed.layout {
        config.layout = layout;
    }
    if let Some(viewport) = parsed.viewport {
        config.viewport = viewport;
    }
    if let Some(render) = parsed.render {
        config.render = render;
    }
    Ok(config)
}

/// Applies an inline `%%{init: ...}%%` directive on top of an existing config.
pub fn merge_init_config(mut config: Config, init: serde_json::Value) -> Config {
    if let Some(name) = init.get("theme").and_then(|v| v.as_str()) {
        match Theme::by_name(name) {
            Ok(theme) => config.theme = theme,
            Err(err) => tracing::warn!("ignoring init theme: {err}"),
        }
    }
    if let Some(vars) = init.get("themeVariables") {
        match serde_json::from_value::<ThemeVariables>(vars.clone()) {
            Ok(vars) => vars.apply(&mut config.theme),
            Err(err) => tracing::warn!("ignoring malformed themeVariables: {err}"),
        }
    }
    if let Some(seed) = init.get("seed").and_then(|v| v.as_u64()) {
        config.layout.seed = Some(seed);
    }
    config
}
