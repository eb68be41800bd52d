use kurbo::{Point, Rect};
use serde::Serialize;

use crate::ir::CanvasSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementStrategy {
    Spiral,
    Grid,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct PlacedWord {
    pub text: String,
    pub value: f64,
    /// Center of the box in content space.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub color: String,
    pub rank: usize,
    pub strategy: PlacementStrategy,
}

impl PlacedWord {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center(), (self.width, self.height))
    }

    /// Edge-inclusive containment, so points on a word's border still hit it.
    pub fn contains(&self, point: Point) -> bool {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        point.x >= self.x - half_w
            && point.x <= self.x + half_w
            && point.y >= self.y - half_h
            && point.y <= self.y + half_h
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ContentBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl ContentBounds {
    pub fn from_words(words: &[PlacedWord]) -> Self {
        let Some(first) = words.first() else {
            return Self::default();
        };
        let union = words
            .iter()
            .skip(1)
            .fold(first.rect(), |acc, word| acc.union(word.rect()));
        Self::from(union)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

impl From<Rect> for ContentBounds {
    fn from(rect: Rect) -> Self {
        Self {
            min_x: rect.x0,
            min_y: rect.y0,
            max_x: rect.x1,
            max_y: rect.y1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlacementStats {
    pub spiral: usize,
    pub grid: usize,
    pub fallback: usize,
}

impl PlacementStats {
    pub fn record(&mut self, strategy: PlacementStrategy) {
        match strategy {
            PlacementStrategy::Spiral => self.spiral += 1,
            PlacementStrategy::Grid => self.grid += 1,
            PlacementStrategy::Fallback => self.fallback += 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WordLayout {
    pub size: CanvasSize,
    pub words: Vec<PlacedWord>,
    pub bounds: ContentBounds,
    pub font_range: (f64, f64),
    pub padding: f64,
    pub stats: PlacementStats,
}

impl WordLayout {
    pub fn empty(size: CanvasSize) -> Self {
        Self {
            size,
            words: Vec::new(),
            bounds: ContentBounds::default(),
            font_range: (0.0, 0.0),
            padding: 0.0,
            stats: PlacementStats::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
