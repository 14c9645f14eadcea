// Bounded sliding-window buffer for live streams
use std::collections::VecDeque;

use crate::domain::point::Point;

/// An append-optimized bounded sequence modeling a live stream.
///
/// Appending past `max_points` evicts the oldest entries. `replace` adopts a
/// sequence wholesale without eviction; capacity is only enforced on
/// incremental appends.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    points: VecDeque<Point>,
    max_points: usize,
}

impl SlidingWindow {
    pub fn new(max_points: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(max_points),
            max_points,
        }
    }

    pub fn with_points(max_points: usize, points: Vec<Point>) -> Self {
        let mut window = Self::new(max_points);
        window.extend(points);
        window
    }

    /// Append one point, evicting from the front once over capacity.
    ///
    /// The drain loop also restores the capacity invariant after an
    /// oversized `replace`.
    pub fn append(&mut self, point: Point) {
        self.points.push_back(point);
        while self.points.len() > self.max_points {
            self.points.pop_front();
        }
    }

    /// Append a batch of points, keeping only the most recent `max_points`.
    pub fn extend(&mut self, points: impl IntoIterator<Item = Point>) {
        for point in points {
            self.append(point);
        }
    }

    /// Discard current contents and adopt `points` wholesale.
    ///
    /// No eviction is applied here, even when `points` exceeds capacity.
    pub fn replace(&mut self, points: Vec<Point>) {
        self.points = points.into();
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// An immutable copy for a render pass; never a torn view.
    pub fn snapshot(&self) -> Vec<Point> {
        self.points.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_points
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.back()
    }
}
