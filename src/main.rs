// Main entry point - Dependency injection and engine startup
use std::time::Duration;

use anyhow::Context;
use futures::StreamExt;
use tokio::sync::mpsc;

use stream_dashboard::application::render_service::{RenderService, RenderSettings};
use stream_dashboard::application::streaming_service::{
    StreamCommand, StreamingDashboardService, frame_stream,
};
use stream_dashboard::domain::window::SlidingWindow;
use stream_dashboard::infrastructure::config::load_dashboard_config;
use stream_dashboard::infrastructure::synthetic_source::SyntheticSource;
use stream_dashboard::infrastructure::trace_renderer::TraceRenderer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let dashboard_config = load_dashboard_config().context("failed to load configuration")?;

    // Create adapters (infrastructure layer)
    let source = SyntheticSource::new(
        dashboard_config.source.categories.clone(),
        dashboard_config.source.seed,
        dashboard_config.stream.tick_interval_ms as i64,
        dashboard_config.source.initial_points,
    );
    let renderer = TraceRenderer::new(
        dashboard_config.render.width,
        dashboard_config.render.height,
    );

    // Create services (application layer)
    let settings = RenderSettings {
        padding: dashboard_config.render.padding,
        max_render_points: dashboard_config.render.max_render_points,
        strategy: dashboard_config.strategy()?,
        chart: dashboard_config.chart_kind()?,
        aggregation_window_ms: dashboard_config.aggregation.window_ms,
    };
    let render_service = RenderService::new(Box::new(renderer), settings);
    let window = SlidingWindow::new(dashboard_config.stream.max_data_points);
    let engine = StreamingDashboardService::new(
        Box::new(source),
        render_service,
        window,
        Duration::from_millis(dashboard_config.stream.tick_interval_ms),
    );

    let (command_tx, command_rx) = mpsc::channel(8);
    let (update_tx, update_rx) = mpsc::channel(100);

    tracing::info!(
        capacity = dashboard_config.stream.max_data_points,
        tick_ms = dashboard_config.stream.tick_interval_ms,
        chart = %dashboard_config.render.chart,
        strategy = %dashboard_config.render.strategy,
        "starting stream-dashboard engine"
    );
    let engine_task = tokio::spawn(engine.run(command_rx, update_tx));

    // Consume frame updates until ctrl-c
    let mut frames = std::pin::pin!(frame_stream(update_rx));
    loop {
        tokio::select! {
            update = frames.next() => match update {
                Some(update) => {
                    tracing::debug!(
                        frame = update.frame,
                        raw = update.raw_points,
                        rendered = update.rendered_points,
                        fps = update.fps,
                        "frame complete"
                    );
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown requested");
                let _ = command_tx.send(StreamCommand::Shutdown).await;
                break;
            }
        }
    }

    engine_task
        .await
        .context("engine task panicked")?
        .context("engine failed")?;

    Ok(())
}
