// Synthetic point source - random walk with sine noise
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::application::point_source::PointSource;
use crate::domain::point::Point;

const VALUE_MIN: f64 = 0.0;
const VALUE_MAX: f64 = 100.0;
const WALK_STEP: f64 = 4.0;
const SINE_AMPLITUDE: f64 = 8.0;
const SINE_STEP: f64 = 0.35;

/// Generates a clamped random-walk-plus-sine series with monotonically
/// increasing timestamps and round-robin category labels.
///
/// The exact waveform is not a contract; consumers only rely on timestamp
/// ordering and the [0, 100] value convention.
pub struct SyntheticSource {
    rng: StdRng,
    categories: Vec<String>,
    next_category: usize,
    level: f64,
    phase: f64,
    tick_interval_ms: i64,
    initial_points: usize,
}

impl SyntheticSource {
    pub fn new(
        categories: Vec<String>,
        seed: Option<u64>,
        tick_interval_ms: i64,
        initial_points: usize,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            categories,
            next_category: 0,
            level: (VALUE_MIN + VALUE_MAX) / 2.0,
            phase: 0.0,
            tick_interval_ms,
            initial_points,
        }
    }

    fn generate(&mut self, timestamp: i64) -> Point {
        self.level = (self.level + self.rng.gen_range(-WALK_STEP..=WALK_STEP))
            .clamp(VALUE_MIN, VALUE_MAX);
        self.phase += SINE_STEP;

        let value =
            (self.level + self.phase.sin() * SINE_AMPLITUDE).clamp(VALUE_MIN, VALUE_MAX);

        let category = self.categories[self.next_category].clone();
        self.next_category = (self.next_category + 1) % self.categories.len();

        Point::new(timestamp, value, category)
    }
}

#[async_trait]
impl PointSource for SyntheticSource {
    async fn initial_points(&mut self) -> anyhow::Result<Vec<Point>> {
        let now = chrono::Utc::now().timestamp_millis();
        let start = now - self.initial_points as i64 * self.tick_interval_ms;

        Ok((0..self.initial_points)
            .map(|i| self.generate(start + (i as i64 + 1) * self.tick_interval_ms))
            .collect())
    }

    async fn next_point(&mut self, prev_timestamp: Option<i64>) -> Point {
        let timestamp = match prev_timestamp {
            Some(prev) => prev + self.tick_interval_ms,
            None => chrono::Utc::now().timestamp_millis(),
        };
        self.generate(timestamp)
    }
}
