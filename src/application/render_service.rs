// Render service - One pass of the reduction and mapping pipeline
use std::time::{Duration, Instant};

use crate::application::renderer::{DrawCommand, Renderer};
use crate::domain::aggregate::average_by_window;
use crate::domain::downsample::{DownsampleStrategy, downsample};
use crate::domain::point::{ChartKind, PixelPoint, Point};
use crate::domain::scale::{Scale, compute_scale, map_to_pixel};

const MARKER_RADIUS: f64 = 2.5;

/// Per-frame pipeline settings, fixed at startup from configuration.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub padding: f64,
    pub max_render_points: usize,
    pub strategy: DownsampleStrategy,
    pub chart: ChartKind,
    /// When set, points are collapsed into bucket averages before scaling.
    pub aggregation_window_ms: Option<i64>,
}

/// What one render pass did, for the metrics layer.
#[derive(Debug, Clone, Copy)]
pub struct FrameReport {
    pub raw_points: usize,
    pub rendered_points: usize,
    pub duration: Duration,
}

/// Runs snapshot -> aggregate -> scale -> downsample -> map -> draw.
pub struct RenderService {
    renderer: Box<dyn Renderer>,
    settings: RenderSettings,
}

impl RenderService {
    pub fn new(renderer: Box<dyn Renderer>, settings: RenderSettings) -> Self {
        Self { renderer, settings }
    }

    /// Render one frame from a window snapshot.
    ///
    /// Returns `None` when the drawing surface is unavailable; every other
    /// input, including an empty snapshot, produces a frame.
    pub fn render_frame(&mut self, points: &[Point]) -> Option<FrameReport> {
        let started = Instant::now();

        let (width, height) = self.renderer.surface_size()?;

        let aggregated;
        let working: &[Point] = match self.settings.aggregation_window_ms {
            Some(window_ms) => {
                aggregated = average_by_window(points, window_ms);
                &aggregated
            }
            None => points,
        };

        let scale = compute_scale(working);
        let sampled = downsample(working, self.settings.max_render_points, self.settings.strategy);
        let commands = self.build_commands(&sampled, &scale, width, height);

        tracing::debug!(
            raw = points.len(),
            rendered = sampled.len(),
            commands = commands.len(),
            "rendering frame"
        );
        self.renderer.draw(&commands);

        Some(FrameReport {
            raw_points: points.len(),
            rendered_points: sampled.len(),
            duration: started.elapsed(),
        })
    }

    fn build_commands(
        &self,
        points: &[Point],
        scale: &Scale,
        width: f64,
        height: f64,
    ) -> Vec<DrawCommand> {
        let padding = self.settings.padding;
        let mapped: Vec<PixelPoint> = points
            .iter()
            .map(|p| map_to_pixel(p, scale, width, height, padding))
            .collect();

        let slot = if points.is_empty() {
            0.0
        } else {
            (width - 2.0 * padding) / points.len() as f64
        };

        match self.settings.chart {
            ChartKind::Line => mapped
                .windows(2)
                .map(|pair| DrawCommand::LineSegment {
                    from: pair[0],
                    to: pair[1],
                })
                .collect(),
            ChartKind::Scatter => mapped
                .iter()
                .map(|&at| DrawCommand::Marker {
                    at,
                    radius: MARKER_RADIUS,
                })
                .collect(),
            ChartKind::Bar => {
                let baseline = height - padding;
                mapped
                    .iter()
                    .map(|p| DrawCommand::Bar {
                        x: p.x - slot * 0.4,
                        y: p.y,
                        width: slot * 0.8,
                        height: baseline - p.y,
                    })
                    .collect()
            }
            ChartKind::Heatmap => points
                .iter()
                .zip(&mapped)
                .map(|(point, pixel)| DrawCommand::HeatCell {
                    x: pixel.x - slot / 2.0,
                    y: padding,
                    width: slot,
                    height: height - 2.0 * padding,
                    intensity: (point.value - scale.y_min) / scale.y_range,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct RecordingRenderer {
        size: Option<(f64, f64)>,
        drawn: Arc<Mutex<Vec<DrawCommand>>>,
    }

    impl RecordingRenderer {
        fn available() -> (Self, Arc<Mutex<Vec<DrawCommand>>>) {
            Self::with_size(Some((800.0, 600.0)))
        }

        fn unavailable() -> (Self, Arc<Mutex<Vec<DrawCommand>>>) {
            Self::with_size(None)
        }

        fn with_size(size: Option<(f64, f64)>) -> (Self, Arc<Mutex<Vec<DrawCommand>>>) {
            let drawn = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    size,
                    drawn: drawn.clone(),
                },
                drawn,
            )
        }
    }

    impl Renderer for RecordingRenderer {
        fn surface_size(&self) -> Option<(f64, f64)> {
            self.size
        }

        fn draw(&mut self, commands: &[DrawCommand]) {
            self.drawn.lock().unwrap().extend_from_slice(commands);
        }
    }

    fn settings(chart: ChartKind) -> RenderSettings {
        RenderSettings {
            padding: 0.0,
            max_render_points: 100,
            strategy: DownsampleStrategy::Lttb,
            chart,
            aggregation_window_ms: None,
        }
    }

    fn ramp(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as i64, i as f64, "t")).collect()
    }

    #[test]
    fn unavailable_surface_yields_none() {
        let (renderer, drawn) = RecordingRenderer::unavailable();
        let mut service = RenderService::new(Box::new(renderer), settings(ChartKind::Line));

        assert!(service.render_frame(&ramp(10)).is_none());
        assert!(drawn.lock().unwrap().is_empty());
    }

    #[test]
    fn empty_snapshot_still_renders_a_frame() {
        let (renderer, drawn) = RecordingRenderer::available();
        let mut service = RenderService::new(Box::new(renderer), settings(ChartKind::Line));
        let report = service.render_frame(&[]).unwrap();

        assert_eq!(report.raw_points, 0);
        assert_eq!(report.rendered_points, 0);
        assert!(drawn.lock().unwrap().is_empty());
    }

    #[test]
    fn line_chart_emits_one_segment_per_pair() {
        let (renderer, drawn) = RecordingRenderer::available();
        let mut service = RenderService::new(Box::new(renderer), settings(ChartKind::Line));
        let report = service.render_frame(&ramp(5)).unwrap();

        assert_eq!(report.rendered_points, 5);
        assert_eq!(drawn.lock().unwrap().len(), 4);
    }

    #[test]
    fn downsampling_caps_rendered_points() {
        let (renderer, _) = RecordingRenderer::available();
        let mut service = RenderService::new(Box::new(renderer), {
            let mut s = settings(ChartKind::Line);
            s.max_render_points = 20;
            s
        });
        let report = service.render_frame(&ramp(500)).unwrap();

        assert_eq!(report.raw_points, 500);
        assert_eq!(report.rendered_points, 20);
    }

    #[test]
    fn aggregation_runs_before_scaling_and_reduction() {
        let (renderer, _) = RecordingRenderer::available();
        let mut service = RenderService::new(Box::new(renderer), {
            let mut s = settings(ChartKind::Line);
            s.aggregation_window_ms = Some(100);
            s
        });

        let points = vec![
            Point::new(0, 10.0, "a"),
            Point::new(50, 20.0, "a"),
            Point::new(150, 30.0, "a"),
        ];
        let report = service.render_frame(&points).unwrap();

        // Two buckets remain out of three raw points.
        assert_eq!(report.raw_points, 3);
        assert_eq!(report.rendered_points, 2);
    }

    #[test]
    fn heatmap_intensity_is_normalized() {
        let (renderer, drawn) = RecordingRenderer::with_size(Some((100.0, 100.0)));
        let mut service = RenderService::new(Box::new(renderer), settings(ChartKind::Heatmap));

        let points = vec![Point::new(0, 0.0, "t"), Point::new(1, 100.0, "t")];
        service.render_frame(&points).unwrap();

        let commands = drawn.lock().unwrap();
        let intensities: Vec<f64> = commands
            .iter()
            .map(|c| match c {
                DrawCommand::HeatCell { intensity, .. } => *intensity,
                other => panic!("expected heat cells, got {other:?}"),
            })
            .collect();
        assert_eq!(intensities, vec![0.0, 1.0]);
    }
}
