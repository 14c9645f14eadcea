// Aggregation and filtering over point sequences
use std::collections::{BTreeMap, HashMap};

use crate::domain::point::Point;

/// Category label attached to synthetic bucket-average points.
pub const AGGREGATE_CATEGORY: &str = "aggregate";

/// Sum values per category label. Categories without points are absent.
pub fn sum_by_category(points: &[Point]) -> HashMap<String, f64> {
    let mut sums = HashMap::new();
    for point in points {
        *sums.entry(point.category.clone()).or_insert(0.0) += point.value;
    }
    sums
}

/// Average values per fixed-width time bucket.
///
/// Each point is keyed by `floor(timestamp / window_ms) * window_ms`; one
/// synthetic point per bucket carries the mean, emitted in ascending bucket
/// order regardless of input order.
pub fn average_by_window(points: &[Point], window_ms: i64) -> Vec<Point> {
    if window_ms <= 0 {
        return Vec::new();
    }

    let mut buckets: BTreeMap<i64, (f64, usize)> = BTreeMap::new();
    for point in points {
        let bucket = point.timestamp.div_euclid(window_ms) * window_ms;
        let entry = buckets.entry(bucket).or_insert((0.0, 0));
        entry.0 += point.value;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(bucket, (sum, count))| {
            Point::new(bucket, sum / count as f64, AGGREGATE_CATEGORY)
        })
        .collect()
}

/// Keep only points carrying the given category label.
pub fn filter_by_category(points: &[Point], category: &str) -> Vec<Point> {
    points
        .iter()
        .filter(|p| p.category == category)
        .cloned()
        .collect()
}

/// Keep only points within `[from, to]` (inclusive bounds).
pub fn filter_by_time_range(points: &[Point], from: i64, to: i64) -> Vec<Point> {
    points
        .iter()
        .filter(|p| p.timestamp >= from && p.timestamp <= to)
        .cloned()
        .collect()
}
