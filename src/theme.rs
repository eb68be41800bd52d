use serde::{Deserialize, Serialize};

use crate::error::WordCloudError;

const CLASSIC_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

const MODERN_PALETTE: [&str; 8] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#14B8A6", "#F97316",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_weight: String,
    pub palette: Vec<String>,
    pub highlight_color: String,
    pub background: String,
    pub control_fill: String,
    pub control_border: String,
    pub control_text: String,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_weight: "bold".to_string(),
            palette: CLASSIC_PALETTE.iter().map(|c| c.to_string()).collect(),
            highlight_color: "#ff4d4f".to_string(),
            background: "#FFFFFF".to_string(),
            control_fill: "#FFFFFF".to_string(),
            control_border: "#CCCCCC".to_string(),
            control_text: "#333333".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_weight: "600".to_string(),
            palette: MODERN_PALETTE.iter().map(|c| c.to_string()).collect(),
            highlight_color: "#DC2626".to_string(),
            background: "#FFFFFF".to_string(),
            control_fill: "#F8FAFF".to_string(),
            control_border: "#C7D2E5".to_string(),
            control_text: "#1C2430".to_string(),
        }
    }

    pub fn by_name(name: &str) -> Result<Self, WordCloudError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" | "default" | "base" => Ok(Self::classic()),
            "modern" => Ok(Self::modern()),
            _ => Err(WordCloudError::UnknownTheme(name.to_string())),
        }
    }

    /// Color for the word at `rank` in placement order.
    pub fn color_for_rank(&self, rank: usize) -> String {
        if self.palette.is_empty() {
            return CLASSIC_PALETTE[rank % CLASSIC_PALETTE.len()].to_string();
        }
        self.palette[rank % self.palette.len()].clone()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
