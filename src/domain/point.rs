// Time-series point domain models
use serde_json::{Map, Value};

/// A single timestamped sample in a data stream.
///
/// `timestamp` is epoch milliseconds and is non-decreasing within a stream.
/// `metadata` is an open mapping for source-specific annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub timestamp: i64,
    pub value: f64,
    pub category: String,
    pub metadata: Option<Map<String, Value>>,
}

impl Point {
    pub fn new(timestamp: i64, value: f64, category: impl Into<String>) -> Self {
        Self {
            timestamp,
            value,
            category: category.into(),
            metadata: None,
        }
    }
}

/// A point mapped into drawing-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
    Heatmap,
}
