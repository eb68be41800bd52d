use crate::text_metrics;

pub const DEFAULT_LINE_HEIGHT: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

/// Text measurement capability used by the layout engine.
///
/// Implementors only need to provide a width; the box height is derived from
/// the font size and a line-height factor.
pub trait MetricsProvider {
    fn text_width(&self, text: &str, font_size: f64) -> f64;

    fn measure(&self, text: &str, font_size: f64, line_height: f64) -> TextExtent {
        TextExtent {
            width: self.text_width(text, font_size).max(0.0),
            height: font_size * line_height,
        }
    }
}

/// Width table metrics. Deterministic and independent of installed fonts.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastMetrics;

impl MetricsProvider for FastMetrics {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        fallback_text_width(text, font_size)
    }
}

/// Metrics backed by the system font matching `font_family`, falling back to
/// the width table when no face resolves.
#[derive(Debug, Clone)]
pub struct FontMetrics {
    font_family: String,
}

impl FontMetrics {
    pub fn new(font_family: impl Into<String>) -> Self {
        Self {
            font_family: font_family.into(),
        }
    }
}

impl MetricsProvider for FontMetrics {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        text_metrics::measure_text_width(text, font_size as f32, &self.font_family)
            .map(f64::from)
            .unwrap_or_else(|| fallback_text_width(text, font_size))
    }
}

impl<M: MetricsProvider + ?Sized> MetricsProvider for &M {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        (**self).text_width(text, font_size)
    }
}

impl<M: MetricsProvider + ?Sized> MetricsProvider for Box<M> {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        (**self).text_width(text, font_size)
    }
}

pub fn fallback_text_width(text: &str, font_size: f64) -> f64 {
    text.chars()
        .filter(|ch| *ch != '\n')
        .map(|ch| f64::from(char_width_factor(ch)))
        .sum::<f64>()
        * font_size
}

pub fn char_width_factor(ch: char) -> f32 {
    // Advance widths in em units, calibrated against a trebuchet/verdana
    // stack at a 16px baseline.
    match ch {
        ' ' => 0.306,
        '\\' | '.' | ',' | ':' | ';' | '|' | '!' | '(' | ')' | '[' | ']' | '{' | '}' => 0.321,
        'A' => 0.652,
        'B' => 0.648,
        'C' => 0.734,
        'D' => 0.723,
        'E' => 0.594,
        'F' => 0.575,
        'G' | 'H' => 0.742,
        'I' => 0.272,
        'J' => 0.557,
        'K' => 0.648,
        'L' => 0.559,
        'M' => 0.903,
        'N' => 0.763,
        'O' => 0.754,
        'P' => 0.623,
        'Q' => 0.755,
        'R' => 0.637,
        'S' => 0.633,
        'T' => 0.599,
        'U' => 0.746,
        'V' => 0.661,
        'W' => 0.958,
        'X' => 0.655,
        'Y' => 0.646,
        'Z' => 0.621,
        'a' => 0.550,
        'b' => 0.603,
        'c' => 0.547,
        'd' => 0.609,
        'e' => 0.570,
        'f' => 0.340,
        'g' | 'h' => 0.600,
        'i' => 0.235,
        'j' => 0.227,
        'k' => 0.522,
        'l' => 0.239,
        'm' => 0.867,
        'n' => 0.585,
        'o' => 0.574,
        'p' => 0.595,
        'q' => 0.585,
        'r' => 0.364,
        's' => 0.523,
        't' => 0.305,
        'u' => 0.585,
        'v' => 0.545,
        'w' => 0.811,
        'x' => 0.538,
        'y' => 0.556,
        'z' => 0.550,
        '0' => 0.613,
        '1' => 0.396,
        '2' => 0.609,
        '3' => 0.597,
        '4' => 0.614,
        '5' => 0.586,
        '6' => 0.608,
        '7' => 0.559,
        '8' => 0.611,
        '9' => 0.595,
        '@' | '#' | '%' | '&' => 0.946,
        _ => 0.568,
    }
}
