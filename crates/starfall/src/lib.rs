pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use crate::api::config::{ConfigSource, MotionMode, StarfieldConfig};
pub use crate::api::handle::LoopHandle;
pub use crate::core::engine::{LoopState, Starfield};
pub use crate::core::rng::Rng;
pub use crate::core::surface::SurfaceState;
pub use crate::core::time::FrameClock;
pub use crate::renderer::{
    BlendMode, CommandBuffer, DrawCommand, DrawContext, GradientStop, LinearGradient, Paint, Rgba,
};
pub use crate::systems::meteors::{Meteor, MeteorSystem};
pub use crate::systems::stars::{Star, StarField};
