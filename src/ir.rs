use serde::{Deserialize, Serialize};

use crate::error::WordCloudError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordItem {
    pub text: String,
    pub value: f64,
}

impl WordItem {
    pub fn new(text: impl Into<String>, value: f64) -> Self {
        Self {
            text: text.into(),
            value,
        }
    }

    pub fn validate(&self) -> Result<(), WordCloudError> {
        if !self.value.is_finite() || self.value < 0.0 {
            return Err(WordCloudError::InvalidWeight {
                text: self.text.clone(),
                value: self.value,
            });
        }
        Ok(())
    }
}

pub fn validate_items(items: &[WordItem]) -> Result<(), WordCloudError> {
    items.iter().try_for_each(WordItem::validate)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }
}
