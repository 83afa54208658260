pub mod color;
pub mod commands;
pub mod traits;

// Re-export key types for convenient access
pub use color::Rgba;
pub use commands::{CommandBuffer, DrawCommand};
pub use traits::{BlendMode, DrawContext, GradientStop, LinearGradient, Paint};
