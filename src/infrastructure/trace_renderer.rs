// Logging renderer - stand-in drawing surface
use crate::application::renderer::{DrawCommand, Renderer};

/// A renderer that counts primitives and logs them instead of drawing.
///
/// Stands in for a real drawing surface; the pipeline stays exercised
/// end to end without a windowing stack.
pub struct TraceRenderer {
    width: f64,
    height: f64,
    draw_passes: u64,
}

impl TraceRenderer {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            draw_passes: 0,
        }
    }
}

impl Renderer for TraceRenderer {
    fn surface_size(&self) -> Option<(f64, f64)> {
        Some((self.width, self.height))
    }

    fn draw(&mut self, commands: &[DrawCommand]) {
        self.draw_passes += 1;

        let mut segments = 0usize;
        let mut bars = 0usize;
        let mut markers = 0usize;
        let mut cells = 0usize;
        for command in commands {
            match command {
                DrawCommand::LineSegment { .. } => segments += 1,
                DrawCommand::Bar { .. } => bars += 1,
                DrawCommand::Marker { .. } => markers += 1,
                DrawCommand::HeatCell { .. } => cells += 1,
            }
        }

        tracing::debug!(
            pass = self.draw_passes,
            segments,
            bars,
            markers,
            cells,
            "draw pass"
        );
    }
}
