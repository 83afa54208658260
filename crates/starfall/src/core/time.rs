/// Upper bound on a single frame delta, in milliseconds.
/// Keeps a tab that was suspended for minutes from producing one huge step.
pub const MAX_FRAME_DT_MS: f64 = 40.0;

/// Nominal display refresh interval used to scale delta-time motion.
pub const TARGET_FRAME_MS: f64 = 1000.0 / 60.0;

/// Frame clock driven by host timestamps (milliseconds, monotonic).
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Timestamp of the previous tick.
    last_time: f64,
    /// Clamped delta computed on the previous tick.
    last_dt: f64,
}

impl FrameClock {
    pub fn new(now_ms: f64) -> Self {
        Self {
            last_time: now_ms,
            last_dt: 0.0,
        }
    }

    /// Advance to `t`. Returns `min(MAX_FRAME_DT_MS, t - last)`.
    pub fn tick(&mut self, t: f64) -> f64 {
        let dt = (t - self.last_time).min(MAX_FRAME_DT_MS);
        self.last_time = t;
        self.last_dt = dt;
        dt
    }

    /// Ratio of the last delta to one nominal frame.
    pub fn frame_ratio(&self) -> f32 {
        (self.last_dt / TARGET_FRAME_MS) as f32
    }

    pub fn last_time(&self) -> f64 {
        self.last_time
    }

    pub fn last_dt(&self) -> f64 {
        self.last_dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.0)
    }
}
