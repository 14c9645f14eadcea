// Streaming dashboard engine - timer-driven append and render loop
use std::time::Duration;

use anyhow::Context;
use futures::Stream;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};

use crate::application::frame_metrics::FrameMetrics;
use crate::application::point_source::PointSource;
use crate::application::render_service::RenderService;
use crate::domain::point::Point;
use crate::domain::window::SlidingWindow;

const METRICS_LOG_EVERY: u64 = 60;

/// Control messages accepted by the engine loop.
#[derive(Debug)]
pub enum StreamCommand {
    /// (Re)start the append timer. Always installs exactly one fresh timer.
    Start,
    /// Disable the append timer; no tick can fire after this is processed.
    Stop,
    /// Adopt a dataset wholesale (no capacity eviction, unlike appends).
    Replace(Vec<Point>),
    Clear,
    Shutdown,
}

/// Per-frame progress published to consumers.
#[derive(Debug, Clone, Copy)]
pub struct FrameUpdate {
    pub frame: u64,
    pub raw_points: usize,
    pub rendered_points: usize,
    pub render_time: Duration,
    pub fps: f64,
}

/// Owns the sliding window and drives the tick -> append -> render cycle.
///
/// The window has a single writer: this loop. Render passes read a
/// per-frame snapshot, so a consumer never observes a half-appended
/// sequence.
pub struct StreamingDashboardService {
    source: Box<dyn PointSource>,
    render_service: RenderService,
    window: SlidingWindow,
    tick_interval: Duration,
    metrics: FrameMetrics,
}

impl StreamingDashboardService {
    pub fn new(
        source: Box<dyn PointSource>,
        render_service: RenderService,
        window: SlidingWindow,
        tick_interval: Duration,
    ) -> Self {
        Self {
            source,
            render_service,
            window,
            tick_interval,
            metrics: FrameMetrics::new(),
        }
    }

    /// Run the engine until `Shutdown` or the command channel closes.
    ///
    /// Streaming starts enabled. `Stop` clears the timer slot synchronously
    /// within the loop, so no stale tick can fire afterwards; `Start`
    /// replaces the slot with one fresh timer and never compounds intervals.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<StreamCommand>,
        updates: mpsc::Sender<FrameUpdate>,
    ) -> anyhow::Result<()> {
        let initial = self
            .source
            .initial_points()
            .await
            .context("failed to load initial points")?;
        tracing::info!(points = initial.len(), "seeding sliding window");
        self.window.extend(initial);

        let mut ticker = Some(new_ticker(self.tick_interval));
        let mut frame: u64 = 0;

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(StreamCommand::Start) => {
                        ticker = Some(new_ticker(self.tick_interval));
                        tracing::info!("streaming started");
                    }
                    Some(StreamCommand::Stop) => {
                        ticker = None;
                        tracing::info!("streaming stopped");
                    }
                    Some(StreamCommand::Replace(points)) => {
                        tracing::debug!(points = points.len(), "replacing window contents");
                        self.window.replace(points);
                    }
                    Some(StreamCommand::Clear) => self.window.clear(),
                    Some(StreamCommand::Shutdown) | None => break,
                },
                _ = tick(&mut ticker), if ticker.is_some() => {
                    frame += 1;
                    self.step(frame, &updates).await;
                }
            }
        }

        tracing::info!(frames = frame, "engine shut down");
        Ok(())
    }

    async fn step(&mut self, frame: u64, updates: &mpsc::Sender<FrameUpdate>) {
        let prev = self.window.last().map(|p| p.timestamp);
        let point = self.source.next_point(prev).await;
        self.window.append(point);

        let snapshot = self.window.snapshot();
        match self.render_service.render_frame(&snapshot) {
            Some(report) => {
                self.metrics.record(report.duration);
                let update = FrameUpdate {
                    frame,
                    raw_points: report.raw_points,
                    rendered_points: report.rendered_points,
                    render_time: report.duration,
                    fps: self.metrics.fps(),
                };

                if frame % METRICS_LOG_EVERY == 0 {
                    tracing::info!(
                        frame,
                        fps = update.fps,
                        render_ms = update.render_time.as_secs_f64() * 1_000.0,
                        raw = update.raw_points,
                        rendered = update.rendered_points,
                        "frame metrics"
                    );
                }

                let _ = updates.send(update).await;
            }
            None => {
                tracing::warn!(frame, "drawing surface unavailable; frame skipped");
            }
        }
    }
}

fn new_ticker(period: Duration) -> Interval {
    let mut ticker = tokio::time::interval(period);
    // A long stall must not burst a backlog of appends afterwards.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

async fn tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        // Branch is guarded on is_some; park forever if polled anyway.
        None => std::future::pending().await,
    }
}

/// Expose engine updates as a `Stream` for `StreamExt`-style consumers.
pub fn frame_stream(mut rx: mpsc::Receiver<FrameUpdate>) -> impl Stream<Item = FrameUpdate> {
    async_stream::stream! {
        while let Some(update) = rx.recv().await {
            yield update;
        }
    }
}
