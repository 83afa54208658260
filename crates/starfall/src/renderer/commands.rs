use glam::Vec2;

use super::traits::{BlendMode, DrawContext, Paint};

/// One recorded [`DrawContext`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect { x: f32, y: f32, width: f32, height: f32 },
    Save,
    Restore,
    GlobalAlpha(f32),
    Blend(BlendMode),
    Fill(Paint),
    Stroke(Paint),
    LineWidth(f32),
    BeginPath,
    MoveTo(Vec2),
    LineTo(Vec2),
    Arc { center: Vec2, radius: f32, start_angle: f32, end_angle: f32 },
    ClosePath,
    FillPath,
    StrokePath,
}

/// Drawing context that records every call instead of rasterizing.
///
/// Used by tests and by hosts that replay frames on their own backend.
pub struct CommandBuffer {
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(1024),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// Number of `fill()` calls recorded.
    pub fn fill_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::FillPath)).count()
    }

    /// Number of `stroke()` calls recorded.
    pub fn stroke_count(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::StrokePath)).count()
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawContext for CommandBuffer {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.commands.push(DrawCommand::Blend(mode));
    }

    fn set_fill(&mut self, paint: &Paint) {
        self.commands.push(DrawCommand::Fill(paint.clone()));
    }

    fn set_stroke(&mut self, paint: &Paint) {
        self.commands.push(DrawCommand::Stroke(paint.clone()));
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, p: Vec2) {
        self.commands.push(DrawCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Vec2) {
        self.commands.push(DrawCommand::LineTo(p));
    }

    fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32) {
        self.commands.push(DrawCommand::Arc { center, radius, start_angle, end_angle });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::FillPath);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::StrokePath);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::color::Rgba;

    #[test]
    fn records_calls_in_order() {
        let mut buf = CommandBuffer::new();
        buf.begin_path();
        buf.move_to(Vec2::new(1.0, 2.0));
        buf.line_to(Vec2::new(3.0, 4.0));
        buf.set_fill(&Paint::Solid(Rgba::WHITE));
        buf.fill();
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.commands[1], DrawCommand::MoveTo(Vec2::new(1.0, 2.0)));
        assert_eq!(buf.fill_count(), 1);
        assert_eq!(buf.stroke_count(), 0);
    }

    #[test]
    fn clear_empties_buffer() {
        let mut buf = CommandBuffer::new();
        buf.save();
        buf.restore();
        buf.clear();
        assert!(buf.is_empty());
    }
}
