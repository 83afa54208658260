//! Shooting stars: spawned at random in the upper-left band of the surface,
//! moved along a fixed heading every tick, retired once well past the edge.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::core::rng::Rng;
use crate::renderer::{BlendMode, DrawContext, LinearGradient, Paint, Rgba};

/// How far past the right/bottom edge a meteor travels before removal.
pub const EXIT_MARGIN: f32 = 100.0;
pub const TRAIL_WIDTH: f32 = 2.2;
pub const HEAD_RADIUS: f32 = 2.6;
pub const HEAD_ALPHA: f32 = 0.9;

/// A single streaking trail.
#[derive(Debug, Clone, PartialEq)]
pub struct Meteor {
    /// Head position.
    pub position: Vec2,
    /// Trail length behind the head.
    pub length: f32,
    /// Distance travelled per tick.
    pub speed: f32,
    /// Heading in radians, between 20 and 50 degrees below the horizontal.
    pub angle: f32,
    /// Ticks lived so far.
    pub life: f32,
    /// Advisory lifetime in ticks. Removal only looks at position.
    pub ttl: f32,
}

impl Meteor {
    /// Draw a random meteor for a `width` x `height` surface.
    pub fn random(width: f32, height: f32, rng: &mut Rng) -> Self {
        let length = 120.0 + rng.upto(220.0);
        let speed = 6.0 + rng.upto(10.0);
        let x = rng.upto(width * 0.6);
        let y = rng.upto(height * 0.3);
        let angle = (20.0 + rng.upto(30.0)).to_radians();
        Meteor {
            position: Vec2::new(x, y),
            length,
            speed,
            angle,
            life: 0.0,
            ttl: (width + height) / speed,
        }
    }

    /// Unit vector along the heading.
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// End of the trail, `length` units behind the head.
    pub fn tail(&self) -> Vec2 {
        self.position - self.direction() * self.length
    }

    /// Move `step` ticks worth of distance along the heading.
    pub fn advance(&mut self, step: f32) {
        self.position += self.direction() * self.speed * step;
        self.life += step;
    }

    /// True once the head is strictly beyond the exit margin on either axis.
    pub fn is_off_surface(&self, width: f32, height: f32) -> bool {
        self.position.x > width + EXIT_MARGIN || self.position.y > height + EXIT_MARGIN
    }

    /// Head-to-tail fade used for the trail stroke.
    pub fn trail_gradient(&self) -> LinearGradient {
        LinearGradient::new(self.position, self.tail())
            .with_stop(0.0, Rgba::WHITE.with_alpha(0.95))
            .with_stop(0.6, Rgba::WHITE.with_alpha(0.25))
            .with_stop(1.0, Rgba::WHITE.with_alpha(0.0))
    }
}

/// All meteors currently in flight.
#[derive(Debug, Default)]
pub struct MeteorSystem {
    meteors: Vec<Meteor>,
    spawned: u64,
}

impl MeteorSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn one meteor with probability `chance`. Returns true if one was spawned.
    /// Empty surfaces never spawn.
    pub fn maybe_spawn(&mut self, width: f32, height: f32, chance: f32, rng: &mut Rng) -> bool {
        if !(width > 0.0 && height > 0.0) {
            return false;
        }
        if !rng.chance(chance) {
            return false;
        }
        self.spawn(width, height, rng);
        true
    }

    /// Unconditionally spawn one meteor.
    pub fn spawn(&mut self, width: f32, height: f32, rng: &mut Rng) {
        let meteor = Meteor::random(width, height, rng);
        log::debug!(
            "meteor: spawned at ({:.1}, {:.1}) speed {:.1} angle {:.1}deg",
            meteor.position.x,
            meteor.position.y,
            meteor.speed,
            meteor.angle.to_degrees()
        );
        self.meteors.push(meteor);
        self.spawned += 1;
    }

    /// Advance every meteor by `step` ticks and drop those that left the surface.
    /// Survivors keep their relative order.
    pub fn update(&mut self, width: f32, height: f32, step: f32) {
        self.meteors.retain_mut(|m| {
            m.advance(step);
            !m.is_off_surface(width, height)
        });
    }

    /// Draw each meteor as an additive gradient streak with a bright head.
    pub fn draw(&self, ctx: &mut dyn DrawContext) {
        let head = Paint::Solid(Rgba::WHITE.with_alpha(HEAD_ALPHA));
        for m in &self.meteors {
            ctx.save();
            ctx.set_blend_mode(BlendMode::Additive);

            ctx.set_stroke(&Paint::Linear(m.trail_gradient()));
            ctx.set_line_width(TRAIL_WIDTH);
            ctx.begin_path();
            ctx.move_to(m.position);
            ctx.line_to(m.tail());
            ctx.stroke();

            ctx.begin_path();
            ctx.arc(m.position, HEAD_RADIUS, 0.0, TAU);
            ctx.set_fill(&head);
            ctx.fill();
            ctx.restore();
        }
    }

    pub fn meteors(&self) -> &[Meteor] {
        &self.meteors
    }

    pub fn len(&self) -> usize {
        self.meteors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meteors.is_empty()
    }

    /// Total meteors spawned since creation.
    pub fn total_spawned(&self) -> u64 {
        self.spawned
    }

    #[cfg(test)]
    fn push(&mut self, meteor: Meteor) {
        self.meteors.push(meteor);
    }
}
