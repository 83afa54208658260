//! Drawing surface contract.
//!
//! The engine never talks to a concrete graphics API. Everything it draws
//! goes through [`DrawContext`], a small immediate-mode interface modelled
//! on the Canvas 2D API (path construction, solid and gradient paints,
//! global alpha, compositing). The web crate implements it on top of
//! `CanvasRenderingContext2d`; [`CommandBuffer`](super::commands::CommandBuffer)
//! implements it by recording calls.

use glam::Vec2;

use super::color::Rgba;

/// Compositing mode for subsequent draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard source-over alpha blending.
    #[default]
    Alpha,
    /// Additive blending: overlapping regions sum brightness (Canvas `"lighter"`).
    Additive,
}

/// A single color stop in a gradient. `offset` is in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Linear gradient between two points with ordered color stops.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            stops: Vec::with_capacity(4),
        }
    }

    /// Append a stop. Stops must be added in increasing offset order.
    pub fn with_stop(mut self, offset: f32, color: Rgba) -> Self {
        self.stops.push(GradientStop { offset, color });
        self
    }
}

/// Fill or stroke style.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
}

/// Immediate-mode 2D drawing context.
///
/// Coordinates are logical surface units. Implementations are responsible
/// for any device-pixel scaling, and must saturate alpha values above 1.
pub trait DrawContext {
    /// Clear a rectangle to fully transparent.
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Push the current style state (alpha, blend mode, paints, line width).
    fn save(&mut self);

    /// Pop the style state pushed by the matching `save`.
    fn restore(&mut self);

    fn set_global_alpha(&mut self, alpha: f32);

    fn set_blend_mode(&mut self, mode: BlendMode);

    fn set_fill(&mut self, paint: &Paint);

    fn set_stroke(&mut self, paint: &Paint);

    fn set_line_width(&mut self, width: f32);

    fn begin_path(&mut self);

    fn move_to(&mut self, p: Vec2);

    fn line_to(&mut self, p: Vec2);

    /// Add a circular arc around `center` from `start_angle` to `end_angle` (radians).
    fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32);

    fn close_path(&mut self);

    /// Fill the current path with the fill paint.
    fn fill(&mut self);

    /// Stroke the current path with the stroke paint.
    fn stroke(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_mode_default_is_alpha() {
        assert_eq!(BlendMode::default(), BlendMode::Alpha);
    }

    #[test]
    fn gradient_keeps_stop_order() {
        let g = LinearGradient::new(Vec2::ZERO, Vec2::new(10.0, 0.0))
            .with_stop(0.0, Rgba::WHITE)
            .with_stop(0.6, Rgba::WHITE.with_alpha(0.25))
            .with_stop(1.0, Rgba::WHITE.with_alpha(0.0));
        let offsets: Vec<f32> = g.stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.6, 1.0]);
    }
}
