use crate::error::WordCloudError;
use crate::ir::{WordItem, validate_items};
use once_cell::sync::Lazy;
use regex::Regex;

static INIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^%%\{\s*init\s*:\s*(\{.*\})\s*\}%%").unwrap());
static HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^word-?cloud$").unwrap());

#[derive(Debug, Default)]
pub struct ParseOutput {
    pub items: Vec<WordItem>,
    pub init_config: Option<serde_json::Value>,
}

/// Parses a word list.
///
/// Input starting with `[` is read as a JSON array of `{"text", "value"}`
/// objects. Anything else uses the line format: an optional `wordcloud`
/// header, `%%` comments, `%%{init: ...}%%` directives and `label : value`
/// item lines with optionally quoted labels.
pub fn parse_wordcloud(input: &str) -> Result<ParseOutput, WordCloudError> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('[') {
        let items: Vec<WordItem> = serde_json::from_str(trimmed)?;
        validate_items(&items)?;
        return Ok(ParseOutput {
            items,
            init_config: None,
        });
    }

    let mut output = ParseOutput::default();
    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(caps) = INIT_RE.captures(line) {
            if let Some(json_str) = caps.get(1).map(|m| m.as_str()) {
                output.init_config = parse_init(json_str);
            }
            continue;
        }
        let line = strip_trailing_comment(line);
        let line = line.trim();
        if line.is_empty() || HEADER_RE.is_match(line) {
            continue;
        }
        let item = parse_item_line(line, line_no)?;
        item.validate()?;
        output.items.push(item);
    }
    Ok(output)
}

fn parse_init(json_str: &str) -> Option<serde_json::Value> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(json_str) {
        return Some(value);
    }
    match json5::from_str::<serde_json::Value>(json_str) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("ignoring unparsable init directive: {err}");
            None
        }
    }
}

fn parse_item_line(line: &str, line_no: usize) -> Result<WordItem, WordCloudError> {
    let (label_part, value_part) =
        line.rsplit_once(':')
            .ok_or_else(|| WordCloudError::MalformedLine {
                line: line_no,
                found: line.to_string(),
            })?;
    let label = strip_quotes(label_part.trim());
    let value_str = value_part.trim();
    if label.is_empty() || value_str.is_empty() {
        return Err(WordCloudError::MalformedLine {
            line: line_no,
            found: line.to_string(),
        });
    }
    let value = value_str
        .parse::<f64>()
        .map_err(|_| WordCloudError::InvalidNumber {
            line: line_no,
            raw: value_str.to_string(),
        })?;
    Ok(WordItem::new(label, value))
}

fn strip_quotes(input: &str) -> String {
    let bytes = input.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return input[1..input.len() - 1].to_string();
        }
    }
    input.to_string()
}

fn strip_trailing_comment(line: &str) -> String {
    let mut quote: Option<char> = None;
    let mut chars = line.chars().peekable();
    let mut out = String::new();
    while let Some(ch) = chars.next() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            out.push(ch);
            continue;
        }
        if ch == '"' || ch == '\'' {
            quote = Some(ch);
            out.push(ch);
            continue;
        }
        if ch == '%'
            && let Some('%') = chars.peek().copied()
        {
            break;
        }
        out.push(ch);
    }
    out
}
