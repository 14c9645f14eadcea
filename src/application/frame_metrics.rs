// Rendering performance self-reporting
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const SAMPLE_WINDOW: usize = 120;

/// Rolling window over recent frames: render durations and completion
/// instants, for frames-per-second and render-time reporting.
#[derive(Debug)]
pub struct FrameMetrics {
    durations: VecDeque<Duration>,
    completions: VecDeque<Instant>,
}

impl Default for FrameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameMetrics {
    pub fn new() -> Self {
        Self {
            durations: VecDeque::with_capacity(SAMPLE_WINDOW),
            completions: VecDeque::with_capacity(SAMPLE_WINDOW),
        }
    }

    pub fn record(&mut self, render_time: Duration) {
        self.record_at(Instant::now(), render_time);
    }

    fn record_at(&mut self, completed_at: Instant, render_time: Duration) {
        if self.durations.len() == SAMPLE_WINDOW {
            self.durations.pop_front();
            self.completions.pop_front();
        }
        self.durations.push_back(render_time);
        self.completions.push_back(completed_at);
    }

    /// Frames per second over the sampled window; 0.0 until two frames exist.
    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.completions.front(), self.completions.back()) else {
            return 0.0;
        };
        let elapsed = last.duration_since(*first).as_secs_f64();
        if elapsed <= 0.0 {
            return 0.0;
        }
        (self.completions.len() - 1) as f64 / elapsed
    }

    pub fn last_render_time(&self) -> Option<Duration> {
        self.durations.back().copied()
    }

    pub fn mean_render_time(&self) -> Duration {
        if self.durations.is_empty() {
            return Duration::ZERO;
        }
        self.durations.iter().sum::<Duration>() / self.durations.len() as u32
    }

    pub fn frames_sampled(&self) -> usize {
        self.durations.len()
    }
}
