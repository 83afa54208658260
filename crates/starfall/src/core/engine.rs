use crate::api::config::{MotionMode, StarfieldConfig};
use crate::core::rng::Rng;
use crate::core::surface::SurfaceState;
use crate::core::time::FrameClock;
use crate::renderer::DrawContext;
use crate::systems::meteors::MeteorSystem;
use crate::systems::stars::StarField;

/// Seed used when the config does not provide one.
pub const DEFAULT_SEED: u64 = 0x5EED_F417;

/// Loop lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Created but not yet measured; ticks are ignored.
    #[default]
    Idle,
    /// Steady per-frame cycle.
    Running,
}

/// The whole animation: surface geometry, stars, meteors and the frame clock.
///
/// One instance per drawing surface. The host owns it, calls
/// [`start`](Self::start) once, [`resize`](Self::resize) whenever the surface
/// changes size and [`tick`](Self::tick) once per display refresh.
pub struct Starfield {
    config: StarfieldConfig,
    surface: SurfaceState,
    stars: StarField,
    meteors: MeteorSystem,
    clock: FrameClock,
    rng: Rng,
    state: LoopState,
}

impl Starfield {
    pub fn new(config: StarfieldConfig) -> Self {
        let seed = config.seed.unwrap_or(DEFAULT_SEED);
        Self {
            config,
            surface: SurfaceState::default(),
            stars: StarField::new(),
            meteors: MeteorSystem::new(),
            clock: FrameClock::default(),
            rng: Rng::new(seed),
            state: LoopState::Idle,
        }
    }

    /// Take the first measurement, build the first star field and start the clock at `now_ms`.
    pub fn start(&mut self, width: f32, height: f32, device_pixel_ratio: f32, now_ms: f64) {
        self.resize(width, height, device_pixel_ratio);
        self.clock = FrameClock::new(now_ms);
        self.state = LoopState::Running;
        log::info!(
            "starfield: running at {}x{} (dpr {}), {} stars",
            self.surface.width(),
            self.surface.height(),
            self.surface.device_pixel_ratio(),
            self.stars.len()
        );
    }

    /// Apply a new surface size. Stars are regenerated; meteors in flight are kept.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        self.surface.resize(width, height, device_pixel_ratio);
        self.stars.regenerate(
            self.surface.width(),
            self.surface.height(),
            self.config.star_density,
            &mut self.rng,
        );
    }

    /// Run one frame at host timestamp `t` (milliseconds): clear, draw stars,
    /// advance and draw meteors, then maybe spawn a new one.
    pub fn tick(&mut self, ctx: &mut dyn DrawContext, t: f64) {
        if self.state == LoopState::Idle {
            return;
        }

        self.clock.tick(t);
        let step = match self.config.motion {
            MotionMode::Frame => 1.0,
            MotionMode::DeltaTime => self.clock.frame_ratio(),
        };
        let (width, height) = (self.surface.width(), self.surface.height());

        ctx.clear_rect(0.0, 0.0, width, height);
        self.stars.draw(ctx, t);

        self.meteors.update(width, height, step);
        self.meteors.draw(ctx);

        self.meteors.maybe_spawn(
            width,
            height,
            self.config.effective_shooting_chance(),
            &mut self.rng,
        );

        log::trace!(
            "starfield: tick t={:.1} dt={:.1} meteors={}",
            t,
            self.clock.last_dt(),
            self.meteors.len()
        );
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    pub fn surface(&self) -> &SurfaceState {
        &self.surface
    }

    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    pub fn meteors(&self) -> &MeteorSystem {
        &self.meteors
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    pub fn meteor_count(&self) -> usize {
        self.meteors.len()
    }

    /// Clamped delta of the most recent tick. Only consumed in delta-time motion mode.
    pub fn last_dt(&self) -> f64 {
        self.clock.last_dt()
    }
}

impl Default for Starfield {
    fn default() -> Self {
        Self::new(StarfieldConfig::default())
    }
}
