// Scale derivation and data-to-pixel mapping
use crate::domain::point::{PixelPoint, Point};

/// Affine parameters mapping the data domain onto a pixel range.
///
/// Ranges are never zero: a degenerate extent is substituted with 1.0 so the
/// mapping stays well-defined without callers branching on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub x_min: f64,
    pub x_max: f64,
    pub x_range: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub y_range: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 1.0,
            x_range: 1.0,
            y_min: 0.0,
            y_max: 1.0,
            y_range: 1.0,
        }
    }
}

/// Compute the scale over a point sequence in a single pass.
///
/// Empty input yields the default scale rather than an error.
pub fn compute_scale(points: &[Point]) -> Scale {
    let Some(first) = points.first() else {
        return Scale::default();
    };

    let mut x_min = first.timestamp as f64;
    let mut x_max = x_min;
    let mut y_min = first.value;
    let mut y_max = y_min;

    for point in &points[1..] {
        let t = point.timestamp as f64;
        if t < x_min {
            x_min = t;
        }
        if t > x_max {
            x_max = t;
        }
        if point.value < y_min {
            y_min = point.value;
        }
        if point.value > y_max {
            y_max = point.value;
        }
    }

    let x_range = x_max - x_min;
    let y_range = y_max - y_min;

    Scale {
        x_min,
        x_max,
        x_range: if x_range == 0.0 { 1.0 } else { x_range },
        y_min,
        y_max,
        y_range: if y_range == 0.0 { 1.0 } else { y_range },
    }
}

/// Map a point into pixel space for a `width` x `height` surface.
///
/// Y is inverted: pixel rows grow downward while value grows upward.
pub fn map_to_pixel(
    point: &Point,
    scale: &Scale,
    width: f64,
    height: f64,
    padding: f64,
) -> PixelPoint {
    let inner_width = width - 2.0 * padding;
    let inner_height = height - 2.0 * padding;

    let x = padding + ((point.timestamp as f64 - scale.x_min) / scale.x_range) * inner_width;
    let y = padding + inner_height - ((point.value - scale.y_min) / scale.y_range) * inner_height;

    PixelPoint { x, y }
}
