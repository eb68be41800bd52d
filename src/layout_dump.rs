use crate::layout::{ContentBounds, PlacementStrategy, WordLayout};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f64,
    pub height: f64,
    pub font_range: [f64; 2],
    pub padding: f64,
    pub bounds: ContentBounds,
    pub strategies: StrategyCounts,
    pub words: Vec<WordDump>,
}

#[derive(Debug, Serialize)]
pub struct StrategyCounts {
    pub spiral: usize,
    pub grid: usize,
    pub fallback: usize,
}

#[derive(Debug, Serialize)]
pub struct WordDump {
    pub rank: usize,
    pub text: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub color: String,
    pub strategy: PlacementStrategy,
}

impl LayoutDump {
    pub fn from_layout(layout: &WordLayout) -> Self {
        let words = layout
            .words
            .iter()
            .map(|word| WordDump {
                rank: word.rank,
                text: word.text.clone(),
                value: word.value,
                x: word.x,
                y: word.y,
                width: word.width,
                height: word.height,
                font_size: word.font_size,
                color: word.color.clone(),
                strategy: word.strategy,
            })
            .collect();

        LayoutDump {
            width: layout.size.width,
            height: layout.size.height,
            font_range: [layout.font_range.0, layout.font_range.1],
            padding: layout.padding,
            bounds: layout.bounds,
            strategies: StrategyCounts {
                spiral: layout.stats.spiral,
                grid: layout.stats.grid,
                fallback: layout.stats.fallback,
            },
            words,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &WordLayout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
