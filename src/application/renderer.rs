// Drawing-surface boundary
use crate::domain::point::PixelPoint;

/// Primitive draw operations handed to the drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    LineSegment {
        from: PixelPoint,
        to: PixelPoint,
    },
    Bar {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Marker {
        at: PixelPoint,
        radius: f64,
    },
    HeatCell {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        /// Normalized 0..=1 against the frame's value span.
        intensity: f64,
    },
}

/// Consumer side of the pipeline: something that can draw primitives.
///
/// An unavailable surface is reported as `None` from `surface_size`, never
/// as an error.
pub trait Renderer: Send {
    /// Current surface dimensions, or `None` when no surface is available.
    fn surface_size(&self) -> Option<(f64, f64)>;

    fn draw(&mut self, commands: &[DrawCommand]);
}
