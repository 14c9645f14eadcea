// Source trait for streamed point data
use async_trait::async_trait;

use crate::domain::point::Point;

/// Boundary trait for whatever produces the time series.
///
/// The engine only requires monotonically non-decreasing timestamps and
/// numeric values; where the points come from is an adapter concern.
#[async_trait]
pub trait PointSource: Send {
    /// The initial batch seeding the sliding window.
    async fn initial_points(&mut self) -> anyhow::Result<Vec<Point>>;

    /// One new point per tick, given the previous tick's timestamp
    /// (`None` when the window is empty).
    async fn next_point(&mut self, prev_timestamp: Option<i64>) -> Point;
}
