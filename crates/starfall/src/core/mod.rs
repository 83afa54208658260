pub mod engine;
pub mod rng;
pub mod surface;
pub mod time;
