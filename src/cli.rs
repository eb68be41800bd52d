use crate::cloud::WordCloud;
use crate::config::{Config, load_config, merge_init_config};
use crate::input::{PointerEvent, PointerKind};
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_wordcloud;
use crate::render::{SvgSurface, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use kurbo::Vec2;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "wcr", version, about = "Word cloud renderer in Rust")]
pub struct Args {
    /// Input file (word list, JSON array or Markdown) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Nominal width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Nominal height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f64>,

    /// Lay out for a container of this width (shrinks the canvas, keeping the aspect ratio)
    #[arg(long = "container-width")]
    pub container_width: Option<f64>,

    /// Seed for the fallback placement sampler
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Use the built-in width table instead of system fonts
    #[arg(long = "fast-text")]
    pub fast_text: bool,

    /// Zoom presses before rendering: positive zooms in, negative zooms out
    #[arg(long = "zoom-steps", default_value_t = 0, allow_hyphen_values = true)]
    pub zoom_steps: i32,

    /// Horizontal pan in pixels
    #[arg(long = "pan-x", default_value_t = 0.0, allow_hyphen_values = true)]
    pub pan_x: f64,

    /// Vertical pan in pixels
    #[arg(long = "pan-y", default_value_t = 0.0, allow_hyphen_values = true)]
    pub pan_y: f64,

    /// Render this word highlighted as if hovered
    #[arg(long = "hover")]
    pub hover: Option<String>,

    /// Draw the zoom controls and readout
    #[arg(long = "controls")]
    pub controls: bool,

    /// Write the computed layout as JSON
    #[arg(long = "dump-layout")]
    pub dump_layout: Option<PathBuf>,

    /// Log layout decisions to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut base_config = load_config(args.config.as_deref())?;
    apply_args(&mut base_config, &args);

    let (input, is_markdown) = read_input(args.input.as_deref())?;
    let documents = if is_markdown {
        extract_wordcloud_blocks(&input)
    } else {
        vec![input]
    };

    if documents.is_empty() {
        return Err(anyhow::anyhow!("No word cloud blocks found in input"));
    }

    let outputs: Vec<Option<PathBuf>> = if documents.len() == 1 {
        vec![args.output.clone()]
    } else {
        resolve_multi_outputs(args.output.as_deref(), args.output_format, documents.len())?
            .into_iter()
            .map(Some)
            .collect()
    };

    for (idx, (document, output)) in documents.iter().zip(outputs).enumerate() {
        let parsed = parse_wordcloud(document)?;
        tracing::info!(document = idx + 1, words = parsed.items.len(), "rendering word cloud");
        let mut config = base_config.clone();
        if let Some(init_cfg) = parsed.init_config {
            config = merge_init_config(config, init_cfg);
        }

        let cloud = build_cloud(parsed.items, config, &args);
        let mut surface = SvgSurface::new();
        cloud.render(&mut surface);
        let svg = surface.finish();

        if let Some(dump_path) = args.dump_layout.as_deref() {
            let dump_path = if documents.len() == 1 {
                dump_path.to_path_buf()
            } else {
                numbered_path(dump_path, idx + 1, "json")
            };
            write_layout_dump(&dump_path, cloud.layout())?;
        }

        match args.output_format {
            OutputFormat::Svg => write_output_svg(&svg, output.as_deref())?,
            OutputFormat::Png => {
                let output = ensure_output(&output, "png")?;
                write_png(&svg, &output, cloud.config())?;
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn apply_args(config: &mut Config, args: &Args) {
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if args.seed.is_some() {
        config.layout.seed = args.seed;
    }
    if args.fast_text {
        config.layout.fast_text_metrics = true;
    }
    if args.controls {
        config.render.show_controls = true;
    }
}

fn build_cloud(items: Vec<crate::ir::WordItem>, config: Config, args: &Args) -> WordCloud {
    let mut cloud = WordCloud::with_config(items, config);
    if let Some(container_width) = args.container_width {
        cloud.resize(container_width);
    }
    for _ in 0..args.zoom_steps.unsigned_abs() {
        if args.zoom_steps > 0 {
            cloud.zoom_in();
        } else {
            cloud.zoom_out();
        }
    }
    cloud.set_pan(Vec2::new(args.pan_x, args.pan_y));

    if let Some(text) = args.hover.as_deref() {
        let target = cloud
            .words()
            .iter()
            .find(|word| word.text == text)
            .map(|word| cloud.viewport().to_screen(word.center()));
        match target {
            Some(screen) => {
                cloud.pointer(PointerEvent::new(PointerKind::Move, screen.x, screen.y));
            }
            None => tracing::warn!(word = text, "hover target not found"),
        }
    }
    cloud
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render, &config.theme)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn read_input(path: Option<&Path>) -> Result<(String, bool)> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok((buf, false));
        }
        let content = std::fs::read_to_string(path)?;
        let is_md = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|ext| matches!(ext, "md" | "markdown"))
            .unwrap_or(false);
        return Ok((content, is_md));
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok((buf, false))
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

fn extract_wordcloud_blocks(input: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut in_block = false;
    let mut current = Vec::new();
    let mut fence = String::new();

    for line in input.lines() {
        let trimmed = line.trim();
        if !in_block {
            if let Some(start_fence) = detect_wordcloud_fence(trimmed) {
                in_block = true;
                fence = start_fence;
            }
            continue;
        }
        if is_fence_end(trimmed, &fence) {
            in_block = false;
            blocks.push(current.join("\n"));
            current.clear();
            continue;
        }
        current.push(line.to_string());
    }

    blocks
}

fn detect_wordcloud_fence(line: &str) -> Option<String> {
    for fence in ["```", "~~~"] {
        if let Some(rest) = line.strip_prefix(fence) {
            let info = rest.trim_start_matches(fence.chars().next()?).trim();
            if info.starts_with("wordcloud") || info.starts_with("word-cloud") {
                return Some(fence.to_string());
            }
        }
    }
    None
}

fn is_fence_end(line: &str, fence: &str) -> bool {
    line.strip_prefix(fence)
        .is_some_and(|rest| rest.trim().is_empty())
}

fn numbered_path(base: &Path, idx: usize, ext: &str) -> PathBuf {
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("wordcloud");
    let parent = base.parent().unwrap_or_else(|| Path::new("."));
    parent.join(format!("{}-{}.{}", stem, idx, ext))
}

fn resolve_multi_outputs(
    output: Option<&Path>,
    format: OutputFormat,
    count: usize,
) -> Result<Vec<PathBuf>> {
    let ext = match format {
        OutputFormat::Svg => "svg",
        OutputFormat::Png => "png",
    };
    let base = output.ok_or_else(|| anyhow::anyhow!("Output path required for markdown input"))?;
    if base.is_dir() {
        return Ok((1..=count)
            .map(|idx| base.join(format!("wordcloud-{}.{}", idx, ext)))
            .collect());
    }
    Ok((1..=count).map(|idx| numbered_path(base, idx, ext)).collect())
}
