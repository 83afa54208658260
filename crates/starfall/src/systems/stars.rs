//! Twinkling star field.
//!
//! Stars are generated once per surface size and never mutated afterwards.
//! Their per-frame brightness is a pure function of the timestamp, so a
//! frame only costs one polygon per star.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use crate::core::rng::Rng;
use crate::renderer::{DrawContext, Paint, Rgba};

/// Number of spikes on the star polygon.
pub const STAR_SPIKES: usize = 5;
/// Peak deviation of twinkle brightness around `base_alpha`.
pub const TWINKLE_AMPLITUDE: f32 = 0.25;
/// Upper bound on stars per field, whatever the configured density.
pub const MAX_STARS: usize = 50_000;

/// A single fixed star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub radius: f32,
    pub base_alpha: f32,
    /// Angular rate of the brightness oscillation (radians per second).
    pub twinkle_speed: f32,
    pub twinkle_phase: f32,
}

impl Star {
    /// Draw a random star uniformly placed inside `width` x `height`.
    pub fn random(width: f32, height: f32, rng: &mut Rng) -> Self {
        // Sum of two uniforms skews toward small stars with the odd bright one
        let radius = rng.upto(1.4) + rng.upto(1.8);
        Star {
            position: Vec2::new(rng.upto(width), rng.upto(height)),
            radius,
            base_alpha: 0.4 + rng.upto(0.6),
            twinkle_speed: 0.6 + rng.upto(1.8),
            twinkle_phase: rng.upto(TAU),
        }
    }

    /// Brightness at `time_ms`. Floored at 0, not capped at 1.
    pub fn alpha_at(&self, time_ms: f64) -> f32 {
        let seconds = time_ms / 1000.0;
        let wave = (seconds * self.twinkle_speed as f64 + self.twinkle_phase as f64).sin();
        (self.base_alpha + wave as f32 * TWINKLE_AMPLITUDE).max(0.0)
    }

    /// Outer radius of the rendered polygon.
    pub fn outer_radius(&self) -> f32 {
        self.radius * 2.0
    }
}

/// Vertices of a closed five-pointed star, starting and ending at the top spike.
pub fn star_polygon(center: Vec2, outer: f32, inner: f32) -> [Vec2; 2 * STAR_SPIKES + 1] {
    let step = PI / STAR_SPIKES as f32;
    let mut points = [center; 2 * STAR_SPIKES + 1];
    // Pointing straight up in a y-down space
    let mut rot = PI * 1.5;
    for i in 0..STAR_SPIKES {
        points[2 * i] = center + Vec2::from_angle(rot) * outer;
        rot += step;
        points[2 * i + 1] = center + Vec2::from_angle(rot) * inner;
        rot += step;
    }
    points[2 * STAR_SPIKES] = center - Vec2::Y * outer;
    points
}

/// The set of stars covering the current surface.
#[derive(Debug, Default)]
pub struct StarField {
    stars: Vec<Star>,
}

impl StarField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expected star count for a surface: `round(width * height * density)`,
    /// never negative and capped at [`MAX_STARS`].
    pub fn target_count(width: f32, height: f32, density: f32) -> usize {
        let count = (width as f64 * height as f64 * density as f64).round();
        if !count.is_finite() || count <= 0.0 {
            return 0;
        }
        if count > MAX_STARS as f64 {
            log::warn!(
                "starfield: {} stars requested for {}x{}, capping at {}",
                count,
                width,
                height,
                MAX_STARS
            );
            return MAX_STARS;
        }
        count as usize
    }

    /// Replace the whole field with a fresh random set for the given size.
    pub fn regenerate(&mut self, width: f32, height: f32, density: f32, rng: &mut Rng) {
        let count = Self::target_count(width, height, density);
        self.stars.clear();
        self.stars.reserve(count);
        for _ in 0..count {
            self.stars.push(Star::random(width, height, rng));
        }
        log::debug!("starfield: regenerated {} stars for {}x{}", count, width, height);
    }

    /// Draw every star at its brightness for `time_ms`.
    pub fn draw(&self, ctx: &mut dyn DrawContext, time_ms: f64) {
        let white = Paint::Solid(Rgba::WHITE);
        for star in &self.stars {
            let outer = star.outer_radius();
            let points = star_polygon(star.position, outer, outer / 2.0);

            ctx.save();
            ctx.set_global_alpha(star.alpha_at(time_ms));
            ctx.set_fill(&white);
            ctx.set_stroke(&white);
            ctx.set_line_width(outer / 3.0);

            ctx.begin_path();
            ctx.move_to(points[0]);
            for p in &points {
                ctx.line_to(*p);
            }
            ctx.close_path();
            ctx.fill();
            ctx.restore();
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{CommandBuffer, DrawCommand};

    #[test]
    fn count_matches_rounded_area_times_density() {
        let mut rng = Rng::new(1);
        let mut field = StarField::new();
        for &(w, h, d) in &[
            (800.0, 600.0, 0.001),
            (1920.0, 1080.0, 0.001),
            (333.0, 77.0, 0.0025),
            (10.0, 10.0, 0.001),
            (0.0, 500.0, 0.001),
        ] {
            field.regenerate(w, h, d, &mut rng);
            assert_eq!(field.len(), (w * h * d).round() as usize, "{}x{} @ {}", w, h, d);
        }
    }

    #[test]
    fn huge_density_is_capped() {
        assert_eq!(StarField::target_count(1920.0, 1080.0, 1e6), MAX_STARS);
        assert_eq!(StarField::target_count(1920.0, 1080.0, f32::MAX), MAX_STARS);

        let mut rng = Rng::new(10);
        let mut field = StarField::new();
        field.regenerate(800.0, 600.0, 1e6, &mut rng);
        assert_eq!(field.len(), MAX_STARS);
    }

    #[test]
    fn every_star_is_inside_bounds() {
        let mut rng = Rng::new(2);
        let mut field = StarField::new();
        field.regenerate(640.0, 480.0, 0.003, &mut rng);
        assert!(!field.is_empty());
        for s in field.stars() {
            assert!(s.position.x >= 0.0 && s.position.x < 640.0);
            assert!(s.position.y >= 0.0 && s.position.y < 480.0);
        }
    }

    #[test]
    fn attributes_fall_in_their_ranges() {
        let mut rng = Rng::new(3);
        let mut field = StarField::new();
        field.regenerate(500.0, 500.0, 0.01, &mut rng);
        for s in field.stars() {
            assert!(s.radius >= 0.0 && s.radius < 3.2);
            assert!(s.base_alpha >= 0.4 && s.base_alpha < 1.0);
            assert!(s.twinkle_speed >= 0.6 && s.twinkle_speed < 2.4);
            assert!(s.twinkle_phase >= 0.0 && s.twinkle_phase < TAU);
        }
    }

    #[test]
    fn radius_distribution_favors_small_stars() {
        let mut rng = Rng::new(4);
        let mut field = StarField::new();
        field.regenerate(1000.0, 1000.0, 0.01, &mut rng);
        let large = field.stars().iter().filter(|s| s.radius > 2.6).count();
        let small = field.stars().iter().filter(|s| s.radius < 1.0).count();
        assert!(large > 0, "expected a few large stars");
        assert!(large < field.len() / 10);
        assert!(small > large);
    }

    #[test]
    fn regenerate_replaces_previous_set() {
        let mut rng = Rng::new(5);
        let mut field = StarField::new();
        field.regenerate(400.0, 300.0, 0.001, &mut rng);
        let first: Vec<Star> = field.stars().to_vec();
        field.regenerate(400.0, 300.0, 0.001, &mut rng);
        assert_eq!(field.len(), first.len());
        assert_ne!(field.stars(), &first[..]);

        field.regenerate(100.0, 100.0, 0.001, &mut rng);
        assert_eq!(field.len(), 10);
    }

    #[test]
    fn negative_or_degenerate_sizes_yield_empty_field() {
        let mut rng = Rng::new(6);
        let mut field = StarField::new();
        field.regenerate(-100.0, 300.0, 0.001, &mut rng);
        assert!(field.is_empty());
        field.regenerate(f32::NAN, 300.0, 0.001, &mut rng);
        assert!(field.is_empty());
    }

    #[test]
    fn alpha_stays_within_twinkle_band_and_non_negative() {
        let mut rng = Rng::new(7);
        let mut field = StarField::new();
        field.regenerate(300.0, 300.0, 0.01, &mut rng);
        for s in field.stars() {
            for step in 0..200 {
                let t = step as f64 * 137.0;
                let a = s.alpha_at(t);
                assert!(a >= 0.0);
                assert!(a <= s.base_alpha + TWINKLE_AMPLITUDE + 1e-6);
                assert!(a >= s.base_alpha - TWINKLE_AMPLITUDE - 1e-6);
            }
        }
    }

    #[test]
    fn alpha_floor_is_zero() {
        let star = Star {
            position: Vec2::ZERO,
            radius: 1.0,
            base_alpha: 0.1,
            twinkle_speed: 1.0,
            twinkle_phase: -PI / 2.0,
        };
        assert_eq!(star.alpha_at(0.0), 0.0);
    }

    #[test]
    fn alpha_is_not_capped_at_one() {
        let star = Star {
            position: Vec2::ZERO,
            radius: 1.0,
            base_alpha: 0.95,
            twinkle_speed: 1.0,
            twinkle_phase: PI / 2.0,
        };
        assert!((star.alpha_at(0.0) - 1.2).abs() < 1e-6);
    }

    #[test]
    fn alpha_keeps_precision_on_long_running_pages() {
        let star = Star {
            position: Vec2::ZERO,
            radius: 1.0,
            base_alpha: 0.5,
            twinkle_speed: 2.0,
            twinkle_phase: 0.3,
        };
        // About eleven days of uptime: f32 seconds would be quantized to 0.0625 s here
        let t = 1.0e9;
        let expected = 0.5 + ((t / 1000.0) * 2.0f32 as f64 + 0.3f32 as f64).sin() as f32 * 0.25;
        assert!((star.alpha_at(t) - expected).abs() < 1e-6);
        let later = star.alpha_at(t + 16.0);
        let expected_later =
            0.5 + (((t + 16.0) / 1000.0) * 2.0f32 as f64 + 0.3f32 as f64).sin() as f32 * 0.25;
        assert!((later - expected_later).abs() < 1e-6);
    }

    #[test]
    fn polygon_starts_at_top_and_alternates_radii() {
        let center = Vec2::new(10.0, 20.0);
        let pts = star_polygon(center, 4.0, 2.0);
        assert!((pts[0] - Vec2::new(10.0, 16.0)).length() < 1e-4);
        assert_eq!(pts[10], Vec2::new(10.0, 16.0));
        for (i, p) in pts[..10].iter().enumerate() {
            let r = (*p - center).length();
            let expected = if i % 2 == 0 { 4.0 } else { 2.0 };
            assert!((r - expected).abs() < 1e-4, "vertex {} at radius {}", i, r);
        }
    }

    #[test]
    fn draw_fills_one_white_polygon_per_star() {
        let mut rng = Rng::new(8);
        let mut field = StarField::new();
        field.regenerate(200.0, 100.0, 0.001, &mut rng);
        let mut buf = CommandBuffer::new();
        field.draw(&mut buf, 1234.0);

        assert_eq!(buf.fill_count(), field.len());
        assert_eq!(buf.stroke_count(), 0);
        let alphas: Vec<f32> = buf
            .iter()
            .filter_map(|c| match c {
                DrawCommand::GlobalAlpha(a) => Some(*a),
                _ => None,
            })
            .collect();
        let expected: Vec<f32> = field.stars().iter().map(|s| s.alpha_at(1234.0)).collect();
        assert_eq!(alphas, expected);
        assert!(buf
            .iter()
            .any(|c| *c == DrawCommand::Fill(Paint::Solid(Rgba::WHITE))));
    }

    #[test]
    fn draw_does_not_mutate_stars() {
        let mut rng = Rng::new(9);
        let mut field = StarField::new();
        field.regenerate(200.0, 200.0, 0.002, &mut rng);
        let before: Vec<Star> = field.stars().to_vec();
        let mut buf = CommandBuffer::new();
        field.draw(&mut buf, 0.0);
        field.draw(&mut buf, 99_999.0);
        assert_eq!(field.stars(), &before[..]);
    }
}
