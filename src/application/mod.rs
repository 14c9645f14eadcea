// Application layer - Use cases and boundary traits
pub mod frame_metrics;
pub mod point_source;
pub mod render_service;
pub mod renderer;
pub mod streaming_service;
