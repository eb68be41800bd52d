use crate::config::RenderConfig;
use crate::ir::CanvasSize;
use crate::layout::{PlacedWord, WordLayout};
use crate::theme::Theme;
use crate::viewport::ViewportState;
use anyhow::Result;
use kurbo::{Affine, Point, Rect};
use std::path::Path;

const CONTROL_SIZE: f64 = 28.0;
const CONTROL_GAP: f64 = 6.0;
const CONTROL_INSET: f64 = 10.0;
const READOUT_WIDTH: f64 = 52.0;

#[derive(Debug, Clone, Copy)]
pub struct TextStyle<'a> {
    pub font_family: &'a str,
    pub font_weight: &'a str,
    pub font_size: f64,
    pub color: &'a str,
}

/// Minimal immediate-mode drawing target.
pub trait Surface {
    fn clear(&mut self, size: CanvasSize, background: &str);
    /// Replaces the current transform. Subsequent draws are mapped through it.
    fn set_transform(&mut self, transform: Affine);
    /// Draws `text` centered on `center`.
    fn fill_text(&mut self, text: &str, center: Point, style: TextStyle<'_>);
    fn fill_rect(&mut self, rect: Rect, fill: &str, stroke: &str);
}

/// Draws the placed words through the viewport transform.
///
/// The zoom/pan transform is applied once at the surface level, so words are
/// issued at their untransformed content positions and font sizes.
pub fn draw<S: Surface + ?Sized>(
    surface: &mut S,
    layout: &WordLayout,
    viewport: ViewportState,
    hovered: Option<usize>,
    theme: &Theme,
) {
    surface.clear(layout.size, &theme.background);
    surface.set_transform(viewport.transform());
    for word in &layout.words {
        let color = if hovered == Some(word.rank) {
            theme.highlight_color.as_str()
        } else {
            word.color.as_str()
        };
        surface.fill_text(&word.text, word.center(), word_style(word, color, theme));
    }
    surface.set_transform(Affine::IDENTITY);
}

fn word_style<'a>(word: &PlacedWord, color: &'a str, theme: &'a Theme) -> TextStyle<'a> {
    TextStyle {
        font_family: &theme.font_family,
        font_weight: &theme.font_weight,
        font_size: word.font_size,
        color,
    }
}

/// Zoom control buttons, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    ZoomIn,
    ZoomOut,
    Reset,
}

impl ControlAction {
    pub const ALL: [ControlAction; 3] = [Self::ZoomIn, Self::ZoomOut, Self::Reset];

    pub fn label(self) -> &'static str {
        match self {
            Self::ZoomIn => "+",
            Self::ZoomOut => "\u{2212}",
            Self::Reset => "\u{27f2}",
        }
    }
}

/// Screen-space geometry of the zoom controls, anchored to the top-right
/// corner. Shared by drawing and pointer hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlLayout {
    pub readout: Rect,
    pub buttons: [(ControlAction, Rect); 3],
}

impl ControlLayout {
    pub fn new(size: CanvasSize) -> Self {
        let total = READOUT_WIDTH + ControlAction::ALL.len() as f64 * (CONTROL_SIZE + CONTROL_GAP);
        let left = size.width - CONTROL_INSET - total;
        let y = CONTROL_INSET;
        let readout = Rect::new(left, y, left + READOUT_WIDTH, y + CONTROL_SIZE);
        let button = |idx: usize| {
            let x = readout.x1 + CONTROL_GAP + idx as f64 * (CONTROL_SIZE + CONTROL_GAP);
            Rect::new(x, y, x + CONTROL_SIZE, y + CONTROL_SIZE)
        };
        Self {
            readout,
            buttons: [
                (ControlAction::ZoomIn, button(0)),
                (ControlAction::ZoomOut, button(1)),
                (ControlAction::Reset, button(2)),
            ],
        }
    }

    /// Button under `screen`, edges included.
    pub fn hit(&self, screen: Point) -> Option<ControlAction> {
        self.buttons
            .iter()
            .find(|(_, rect)| {
                screen.x >= rect.x0 && screen.x <= rect.x1 && screen.y >= rect.y0 && screen.y <= rect.y1
            })
            .map(|(action, _)| *action)
    }

    /// Whether `screen` falls on the controls strip, readout included.
    pub fn covers(&self, screen: Point) -> bool {
        let strip = self.readout.union(self.buttons[2].1);
        screen.x >= strip.x0 && screen.x <= strip.x1 && screen.y >= strip.y0 && screen.y <= strip.y1
    }
}

/// Zoom-in, zoom-out and reset buttons plus the zoom readout, drawn in screen
/// space. Returns the geometry that was drawn.
pub fn draw_controls<S: Surface + ?Sized>(
    surface: &mut S,
    size: CanvasSize,
    zoom_percent: u32,
    theme: &Theme,
) -> ControlLayout {
    surface.set_transform(Affine::IDENTITY);
    let controls = ControlLayout::new(size);
    let style = TextStyle {
        font_family: &theme.font_family,
        font_weight: "normal",
        font_size: 13.0,
        color: &theme.control_text,
    };

    surface.fill_rect(controls.readout, &theme.control_fill, &theme.control_border);
    surface.fill_text(&format!("{zoom_percent}%"), controls.readout.center(), style);

    for (action, button) in controls.buttons {
        surface.fill_rect(button, &theme.control_fill, &theme.control_border);
        surface.fill_text(action.label(), button.center(), TextStyle { font_size: 16.0, ..style });
    }
    controls
}

/// Builds an SVG document from draw calls.
#[derive(Debug, Default)]
pub struct SvgSurface {
    body: String,
    size: Option<CanvasSize>,
    group_open: bool,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(mut self) -> String {
        self.close_group();
        let size = self.size.unwrap_or(CanvasSize::new(0.0, 0.0));
        let (width, height) = (size.width, size.height);
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">{}</svg>",
            self.body
        )
    }

    fn close_group(&mut self) {
        if self.group_open {
            self.body.push_str("</g>");
            self.group_open = false;
        }
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self, size: CanvasSize, background: &str) {
        self.body.clear();
        self.group_open = false;
        self.size = Some(size);
        self.body.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            escape_xml(background)
        ));
    }

    fn set_transform(&mut self, transform: Affine) {
        self.close_group();
        if transform == Affine::IDENTITY {
            return;
        }
        let [a, b, c, d, e, f] = transform.as_coeffs();
        self.body.push_str(&format!(
            "<g transform=\"matrix({a:.4} {b:.4} {c:.4} {d:.4} {e:.2} {f:.2})\">"
        ));
        self.group_open = true;
    }

    fn fill_text(&mut self, text: &str, center: Point, style: TextStyle<'_>) {
        self.body.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-weight=\"{}\" font-size=\"{:.2}\" fill=\"{}\">{}</text>",
            center.x,
            center.y,
            escape_xml(style.font_family),
            escape_xml(style.font_weight),
            style.font_size,
            escape_xml(style.color),
            escape_xml(text)
        ));
    }

    fn fill_rect(&mut self, rect: Rect, fill: &str, stroke: &str) {
        self.body.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"4\" ry=\"4\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>",
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
            escape_xml(fill),
            escape_xml(stroke)
        ));
    }
}

pub fn render_svg(
    layout: &WordLayout,
    viewport: ViewportState,
    hovered: Option<usize>,
    theme: &Theme,
    config: &RenderConfig,
) -> String {
    let mut surface = SvgSurface::new();
    draw(&mut surface, layout, viewport, hovered, theme);
    if config.show_controls {
        let percent = (viewport.zoom * 100.0).round() as u32;
        draw_controls(&mut surface, layout.size, percent, theme);
    }
    surface.finish()
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .map(|part| part.trim().trim_matches('"').trim_matches('\''))
        .find(|part| !part.is_empty())
        .unwrap_or("sans-serif")
        .to_string();
    if let Some(size) = usvg::Size::from_wh(render_cfg.width as f32, render_cfg.height as f32) {
        opt.default_size = size;
    }
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::WordItem;
    use crate::layout::compute_layout;
    use kurbo::Vec2;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear,
        Transform(Affine),
        Text(String, Point, String),
        Rect,
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl Surface for Recorder {
        fn clear(&mut self, _size: CanvasSize, _background: &str) {
            self.0.push(Op::Clear);
        }
        fn set_transform(&mut self, transform: Affine) {
            self.0.push(Op::Transform(transform));
        }
        fn fill_text(&mut self, text: &str, center: Point, style: TextStyle<'_>) {
            self.0.push(Op::Text(text.to_string(), center, style.color.to_string()));
        }
        fn fill_rect(&mut self, _rect: Rect, _fill: &str, _stroke: &str) {
            self.0.push(Op::Rect);
        }
    }

    fn sample_layout() -> WordLayout {
        let config = LayoutConfig {
            fast_text_metrics: true,
            seed: Some(1),
            ..LayoutConfig::default()
        };
        let items = vec![
            WordItem::new("Alpha", 10.0),
            WordItem::new("Beta", 5.0),
            WordItem::new("<Gamma & co>", 1.0),
        ];
        compute_layout(&items, CanvasSize::new(400.0, 300.0), &Theme::classic(), &config)
    }

    #[test]
    fn draw_clears_then_transforms_then_writes_untransformed_words() {
        let layout = sample_layout();
        let viewport = ViewportState {
            zoom: 2.0,
            pan: Vec2::new(5.0, 7.0),
        };
        let mut recorder = Recorder::default();
        draw(&mut recorder, &layout, viewport, None, &Theme::classic());
        assert_eq!(recorder.0[0], Op::Clear);
        assert_eq!(recorder.0[1], Op::Transform(viewport.transform()));
        for (op, word) in recorder.0[2..].iter().zip(&layout.words) {
            assert_eq!(op, &Op::Text(word.text.clone(), word.center(), word.color.clone()));
        }
        assert_eq!(recorder.0.last(), Some(&Op::Transform(Affine::IDENTITY)));
    }

    #[test]
    fn hovered_word_uses_highlight_color() {
        let layout = sample_layout();
        let theme = Theme::classic();
        let mut recorder = Recorder::default();
        draw(&mut recorder, &layout, ViewportState::default(), Some(1), &theme);
        let colors: Vec<&str> = recorder
            .0
            .iter()
            .filter_map(|op| match op {
                Op::Text(_, _, color) => Some(color.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[1], theme.highlight_color);
        assert_eq!(colors[0], layout.words[0].color);
        assert_eq!(colors[2], layout.words[2].color);
    }

    #[test]
    fn render_svg_basic() {
        let layout = sample_layout();
        let svg = render_svg(
            &layout,
            ViewportState::default(),
            None,
            &Theme::classic(),
            &RenderConfig::default(),
        );
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Alpha"));
        assert!(svg.contains("&lt;Gamma &amp; co&gt;"));
        assert!(!svg.contains("<g transform"));
    }

    #[test]
    fn render_svg_wraps_words_in_viewport_matrix() {
        let layout = sample_layout();
        let viewport = ViewportState {
            zoom: 1.5,
            pan: Vec2::new(-20.0, 10.0),
        };
        let svg = render_svg(&layout, viewport, None, &Theme::classic(), &RenderConfig::default());
        assert!(svg.contains("matrix(1.5000 0.0000 0.0000 1.5000 -20.00 10.00)"));
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
    }

    #[test]
    fn controls_show_zoom_readout() {
        let layout = sample_layout();
        let config = RenderConfig {
            show_controls: true,
            ..RenderConfig::default()
        };
        let viewport = ViewportState {
            zoom: 1.4,
            pan: Vec2::ZERO,
        };
        let svg = render_svg(&layout, viewport, None, &Theme::classic(), &config);
        assert!(svg.contains(">140%</text>"));
    }

    #[test]
    fn drawn_controls_match_hit_geometry() {
        let size = CanvasSize::new(400.0, 300.0);
        let mut recorder = Recorder::default();
        let drawn = draw_controls(&mut recorder, size, 100, &Theme::classic());
        assert_eq!(drawn, ControlLayout::new(size));
        assert_eq!(recorder.0.iter().filter(|op| **op == Op::Rect).count(), 4);

        let (_, plus) = drawn.buttons[0];
        assert!(plus.x1 <= 400.0 - CONTROL_INSET + 1e-9);
        assert_eq!(drawn.hit(plus.center()), Some(ControlAction::ZoomIn));
        assert_eq!(drawn.hit(drawn.buttons[2].1.center()), Some(ControlAction::Reset));
        assert_eq!(drawn.hit(drawn.readout.center()), None);
        assert!(drawn.covers(drawn.readout.center()));
        assert_eq!(drawn.hit(Point::new(200.0, 150.0)), None);
        assert!(!drawn.covers(Point::new(200.0, 150.0)));
    }

    #[test]
    fn empty_layout_renders_background_only() {
        let layout = WordLayout::empty(CanvasSize::new(400.0, 300.0));
        let svg = render_svg(
            &layout,
            ViewportState::default(),
            None,
            &Theme::classic(),
            &RenderConfig::default(),
        );
        assert!(!svg.contains("<text"));
        assert!(svg.contains("width=\"400\""));
    }
}
