use serde::{Deserialize, Serialize};

/// Style property holding the star density (stars per square logical unit).
pub const STAR_DENSITY_PROPERTY: &str = "--star-density";
/// Style property holding the per-tick meteor spawn probability.
pub const SHOOTING_CHANCE_PROPERTY: &str = "--shooting-chance";

pub const DEFAULT_STAR_DENSITY: f32 = 0.001;
pub const DEFAULT_SHOOTING_CHANCE: f32 = 0.004;

/// How meteor displacement relates to elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MotionMode {
    /// Fixed step per tick; apparent speed follows the display refresh rate.
    #[default]
    Frame,
    /// Step scaled by the clamped frame delta relative to a 60 Hz frame.
    DeltaTime,
}

/// Host environment that supplies the tunables (a page's computed style on the web).
pub trait ConfigSource {
    /// Raw value of a named property, if the host defines it.
    fn property(&self, name: &str) -> Option<String>;

    /// Whether the user asked for reduced motion.
    fn prefers_reduced_motion(&self) -> bool;
}

/// Animation tunables, read once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StarfieldConfig {
    /// Stars per square logical unit (default: 0.001).
    pub star_density: f32,
    /// Probability of spawning a meteor on each tick (default: 0.004).
    pub shooting_chance: f32,
    /// Disables meteors entirely when set.
    pub reduced_motion: bool,
    /// Meteor motion model (default: frame-based).
    pub motion: MotionMode,
    /// RNG seed. `None` lets the host pick one.
    pub seed: Option<u64>,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            star_density: DEFAULT_STAR_DENSITY,
            shooting_chance: DEFAULT_SHOOTING_CHANCE,
            reduced_motion: false,
            motion: MotionMode::Frame,
            seed: None,
        }
    }
}

impl StarfieldConfig {
    /// Parse a config from a JSON string. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read tunables from a host source, falling back to defaults for
    /// anything missing, non-numeric, zero or infinite.
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        let read = |name: &str, default: f32| {
            let value = source
                .property(name)
                .and_then(|raw| parse_float_prefix(&raw))
                .filter(|v| v.is_finite() && *v != 0.0);
            match value {
                Some(v) => v,
                None => {
                    log::debug!("config: {} not set, using {}", name, default);
                    default
                }
            }
        };

        Self {
            star_density: read(STAR_DENSITY_PROPERTY, DEFAULT_STAR_DENSITY),
            shooting_chance: read(SHOOTING_CHANCE_PROPERTY, DEFAULT_SHOOTING_CHANCE),
            reduced_motion: source.prefers_reduced_motion(),
            ..Self::default()
        }
    }

    /// Spawn probability actually used by the loop: zero under reduced motion.
    pub fn effective_shooting_chance(&self) -> f32 {
        if self.reduced_motion {
            0.0
        } else {
            self.shooting_chance
        }
    }
}

/// Parse the longest leading decimal number in `raw`, ignoring leading
/// whitespace and any trailing text (`" 0.002px"` -> `0.002`).
pub fn parse_float_prefix(raw: &str) -> Option<f32> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }
    // Exponent only counts if it has at least one digit
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapSource {
        props: HashMap<&'static str, &'static str>,
        reduced: bool,
    }

    impl ConfigSource for MapSource {
        fn property(&self, name: &str) -> Option<String> {
            self.props.get(name).map(|v| v.to_string())
        }

        fn prefers_reduced_motion(&self) -> bool {
            self.reduced
        }
    }

    fn source(props: &[(&'static str, &'static str)], reduced: bool) -> MapSource {
        MapSource {
            props: props.iter().copied().collect(),
            reduced,
        }
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = StarfieldConfig::from_source(&source(&[], false));
        assert_eq!(config, StarfieldConfig::default());
        assert_eq!(config.star_density, 0.001);
        assert_eq!(config.effective_shooting_chance(), 0.004);
    }

    #[test]
    fn reads_style_properties() {
        let config = StarfieldConfig::from_source(&source(
            &[("--star-density", " 0.002"), ("--shooting-chance", "0.01")],
            false,
        ));
        assert_eq!(config.star_density, 0.002);
        assert_eq!(config.shooting_chance, 0.01);
    }

    #[test]
    fn non_numeric_or_zero_falls_back() {
        let config = StarfieldConfig::from_source(&source(
            &[("--star-density", "lots"), ("--shooting-chance", "0")],
            false,
        ));
        assert_eq!(config.star_density, DEFAULT_STAR_DENSITY);
        assert_eq!(config.shooting_chance, DEFAULT_SHOOTING_CHANCE);
    }

    #[test]
    fn reduced_motion_forces_zero_chance() {
        let config = StarfieldConfig::from_source(&source(&[("--shooting-chance", "0.5")], true));
        assert!(config.reduced_motion);
        assert_eq!(config.shooting_chance, 0.5);
        assert_eq!(config.effective_shooting_chance(), 0.0);
    }

    #[test]
    fn float_prefix_parsing() {
        assert_eq!(parse_float_prefix("0.004"), Some(0.004));
        assert_eq!(parse_float_prefix("  .5"), Some(0.5));
        assert_eq!(parse_float_prefix("3px"), Some(3.0));
        assert_eq!(parse_float_prefix("-2.5e-1x"), Some(-0.25));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("7."), Some(7.0));
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("abc"), None);
    }

    #[test]
    fn parse_json_config() {
        let json = r#"{ "starDensity": 0.0005, "reducedMotion": true, "motion": "deltaTime", "seed": 7 }"#;
        let config = StarfieldConfig::from_json(json).unwrap();
        assert_eq!(config.star_density, 0.0005);
        assert_eq!(config.shooting_chance, DEFAULT_SHOOTING_CHANCE);
        assert!(config.reduced_motion);
        assert_eq!(config.motion, MotionMode::DeltaTime);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn parse_json_rejects_garbage() {
        assert!(StarfieldConfig::from_json("{ not json").is_err());
    }
}
