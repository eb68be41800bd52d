use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wordcloud_rs::{RenderOptions, render_with_options};

/// Seed used when the caller does not pick one, so the same input renders the
/// same cloud across calls.
const DEFAULT_SEED: u64 = 0x5eed;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WordCloudRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    seed: Option<u64>,
    show_controls: Option<bool>,
}

fn build_render_options(options: WordCloudRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("modern") {
        RenderOptions::modern()
    } else {
        RenderOptions::classic()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(width) = options.width {
        render_options.render.width = width;
    }
    if let Some(height) = options.height {
        render_options.render.height = height;
    }
    if let Some(show_controls) = options.show_controls {
        render_options.render.show_controls = show_controls;
    }
    // No system fonts in the browser sandbox.
    render_options.layout.fast_text_metrics = true;
    render_options.layout.seed = Some(options.seed.unwrap_or(DEFAULT_SEED));

    render_options
}

#[wasm_bindgen]
pub fn render_wordcloud_svg(source: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<WordCloudRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        WordCloudRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(source, render_options).map_err(|error| JsValue::from_str(&error.to_string()))
}
