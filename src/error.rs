use thiserror::Error;

#[derive(Debug, Error)]
pub enum WordCloudError {
    #[error("line {line}: expected `label : value`, found {found:?}")]
    MalformedLine { line: usize, found: String },

    #[error("line {line}: {raw:?} is not a number")]
    InvalidNumber { line: usize, raw: String },

    #[error("word {text:?} has weight {value}, weights must be finite and non-negative")]
    InvalidWeight { text: String, value: f64 },

    #[error("invalid JSON word list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown theme {0:?} (expected \"classic\" or \"modern\")")]
    UnknownTheme(String),
}
