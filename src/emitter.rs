//! Emitter configuration.
//!
//! An [`EmitterConfig`] describes everything that is randomized when a
//! particle respawns, plus how the collection is drawn. It is built with
//! `with_*` methods or loaded from JSON, and validated once when a
//! [`ParticleSystem`](crate::ParticleSystem) is created.
//!
//! # Defaults
//!
//! | Field | Default |
//! |-------|---------|
//! | `particle_count` | 10 000 |
//! | `angle_degrees` | `0..360` |
//! | `speed` | `50..100` px/s |
//! | `lifetime` | `1s..3s` |
//! | `fade` | [`Fade::Fixed`] 3s |
//! | `color` | cycle red, green, blue |
//! | `shape` | [`Shape::Point`] |
//!
//! # Example
//!
//! ```ignore
//! let config = EmitterConfig::new(1_000)
//!     .with_lifetime(Duration::from_secs(2), Duration::from_secs(4))
//!     .with_color(ColorMode::Random)
//!     .with_shape(Shape::Fan { radius: 10.0, segments: 12 });
//! ```
//!
//! The same config as JSON (lifetimes in seconds):
//!
//! ```json
//! {
//!   "particle_count": 1000,
//!   "lifetime": { "start": 2.0, "end": 4.0 },
//!   "color": "random",
//!   "shape": { "fan": { "radius": 10.0, "segments": 12 } }
//! }
//! ```

use crate::color::ColorMode;
use crate::error::ConfigError;
use crate::geometry::Shape;
use crate::particle::Particle;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;
use std::time::Duration;

/// Reference lifetime the alpha fade is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fade {
    /// One reference for every particle. Particles that live longer than
    /// this stay fully opaque until they drop below it.
    Fixed(#[serde(with = "secs")] Duration),
    /// Each particle fades over its own sampled lifetime.
    Spawned,
}

impl Default for Fade {
    fn default() -> Self {
        Fade::Fixed(Duration::from_secs(3))
    }
}

impl Fade {
    #[inline]
    pub fn reference(&self, particle: &Particle) -> Duration {
        match *self {
            Fade::Fixed(reference) => reference,
            Fade::Spawned => particle.spawned_lifetime,
        }
    }
}

/// Particle emitter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Fixed number of particles in the collection.
    pub particle_count: usize,
    /// Respawn direction range in degrees.
    pub angle_degrees: Range<f32>,
    /// Respawn speed range in pixels per second.
    pub speed: Range<f32>,
    /// Respawn lifetime range.
    #[serde(with = "secs_range")]
    pub lifetime: Range<Duration>,
    /// Alpha fade reference.
    pub fade: Fade,
    /// Respawn color.
    pub color: ColorMode,
    /// Vertex packing.
    pub shape: Shape,
    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            particle_count: 10_000,
            angle_degrees: 0.0..360.0,
            speed: 50.0..100.0,
            lifetime: Duration::from_millis(1000)..Duration::from_millis(3000),
            fade: Fade::default(),
            color: ColorMode::default(),
            shape: Shape::default(),
            seed: None,
        }
    }
}

impl EmitterConfig {
    pub fn new(particle_count: usize) -> Self {
        Self {
            particle_count,
            ..Default::default()
        }
    }

    /// Set the respawn direction range (degrees).
    pub fn with_angle(mut self, min: f32, max: f32) -> Self {
        self.angle_degrees = min..max;
        self
    }

    /// Set the respawn speed range (pixels per second).
    pub fn with_speed(mut self, min: f32, max: f32) -> Self {
        self.speed = min..max;
        self
    }

    /// Set the respawn lifetime range.
    pub fn with_lifetime(mut self, min: Duration, max: Duration) -> Self {
        self.lifetime = min..max;
        self
    }

    pub fn with_fade(mut self, fade: Fade) -> Self {
        self.fade = fade;
        self
    }

    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// Seed the respawn RNG for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every range and parameter. Sampling never panics on a
    /// config that passes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }

        check_range("angle", &self.angle_degrees)?;
        check_range("speed", &self.speed)?;
        if self.speed.start < 0.0 {
            return Err(ConfigError::NegativeSpeed {
                start: self.speed.start,
                end: self.speed.end,
            });
        }

        // Lifetimes start strictly above zero so a respawn is always alive.
        if self.lifetime.start.is_zero() || self.lifetime.start >= self.lifetime.end {
            return Err(ConfigError::InvalidRange {
                field: "lifetime",
                start: self.lifetime.start.as_secs_f64(),
                end: self.lifetime.end.as_secs_f64(),
            });
        }

        if let Fade::Fixed(reference) = self.fade {
            if reference.is_zero() {
                return Err(ConfigError::ZeroFade);
            }
        }

        if let ColorMode::Cycle(palette) = &self.color {
            if palette.is_empty() {
                return Err(ConfigError::EmptyPalette);
            }
        }

        self.shape.validate()?;
        self.shape.vertex_count(self.particle_count)?;
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), particles = config.particle_count, "loaded emitter config");
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_range(field: &'static str, range: &Range<f32>) -> Result<(), ConfigError> {
    // The span must be finite too, or uniform sampling overflows.
    if !(range.end - range.start).is_finite() || range.start >= range.end {
        return Err(ConfigError::InvalidRange {
            field,
            start: range.start as f64,
            end: range.end as f64,
        });
    }
    Ok(())
}

/// Durations as floating-point seconds.
mod secs {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}

/// `Range<Duration>` as `{ "start": secs, "end": secs }`.
mod secs_range {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::ops::Range;
    use std::time::Duration;

    #[derive(Serialize, Deserialize)]
    struct SecsRange {
        start: f64,
        end: f64,
    }

    pub fn serialize<S: Serializer>(value: &Range<Duration>, s: S) -> Result<S::Ok, S::Error> {
        SecsRange {
            start: value.start.as_secs_f64(),
            end: value.end.as_secs_f64(),
        }
        .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Range<Duration>, D::Error> {
        let raw = SecsRange::deserialize(d)?;
        let start = Duration::try_from_secs_f64(raw.start).map_err(D::Error::custom)?;
        let end = Duration::try_from_secs_f64(raw.end).map_err(D::Error::custom)?;
        Ok(start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_defaults_validate() {
        let config = EmitterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.particle_count, 10_000);
        assert_eq!(config.speed, 50.0..100.0);
        assert_eq!(config.lifetime, Duration::from_secs(1)..Duration::from_secs(3));
    }

    #[test]
    fn test_rejects_bad_ranges() {
        let err = EmitterConfig::new(10).with_speed(100.0, 50.0).validate();
        assert!(matches!(err, Err(ConfigError::InvalidRange { field: "speed", .. })));

        let err = EmitterConfig::new(10).with_angle(0.0, f32::NAN).validate();
        assert!(matches!(err, Err(ConfigError::InvalidRange { field: "angle", .. })));

        let err = EmitterConfig::new(10).with_angle(-f32::MAX, f32::MAX).validate();
        assert!(matches!(err, Err(ConfigError::InvalidRange { field: "angle", .. })));

        let err = EmitterConfig::new(10).with_speed(0.0, f32::INFINITY).validate();
        assert!(matches!(err, Err(ConfigError::InvalidRange { field: "speed", .. })));

        let err = EmitterConfig::new(10).with_speed(-5.0, 5.0).validate();
        assert!(matches!(err, Err(ConfigError::NegativeSpeed { .. })));

        let err = EmitterConfig::new(10)
            .with_lifetime(Duration::ZERO, Duration::from_secs(1))
            .validate();
        assert!(matches!(err, Err(ConfigError::InvalidRange { field: "lifetime", .. })));
    }

    #[test]
    fn test_rejects_degenerate_parameters() {
        assert!(matches!(EmitterConfig::new(0).validate(), Err(ConfigError::NoParticles)));
        assert!(matches!(
            EmitterConfig::new(1).with_fade(Fade::Fixed(Duration::ZERO)).validate(),
            Err(ConfigError::ZeroFade)
        ));
        assert!(matches!(
            EmitterConfig::new(1).with_color(ColorMode::Cycle(vec![])).validate(),
            Err(ConfigError::EmptyPalette)
        ));
        assert!(matches!(
            EmitterConfig::new(1)
                .with_shape(Shape::Fan { radius: 4.0, segments: 1 })
                .validate(),
            Err(ConfigError::TooFewSegments(1))
        ));
        assert!(matches!(
            EmitterConfig::new(usize::MAX / 4)
                .with_shape(Shape::Fan { radius: 1.0, segments: 3 })
                .validate(),
            Err(ConfigError::TooManyVertices { .. })
        ));
        assert!(matches!(
            EmitterConfig::from_json_str(r#"{ "particle_count": 100000000 }"#),
            Err(ConfigError::TooManyVertices { .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EmitterConfig::from_json_str(
            r#"{
                "particle_count": 1000,
                "lifetime": { "start": 2.0, "end": 4.0 },
                "color": "random",
                "shape": { "fan": { "radius": 10.0, "segments": 12 } }
            }"#,
        )
        .unwrap();

        assert_eq!(config.particle_count, 1000);
        assert_eq!(config.lifetime, Duration::from_secs(2)..Duration::from_secs(4));
        assert_eq!(config.color, ColorMode::Random);
        assert_eq!(config.shape, Shape::Fan { radius: 10.0, segments: 12 });
        assert_eq!(config.speed, 50.0..100.0);
        assert_eq!(config.fade, Fade::Fixed(Duration::from_secs(3)));
    }

    #[test]
    fn test_json_round_trip_keeps_fade() {
        let config = EmitterConfig::new(5)
            .with_fade(Fade::Spawned)
            .with_color(ColorMode::Solid(Color::BLUE))
            .with_seed(9);
        let json = config.to_json_string().unwrap();
        assert_eq!(EmitterConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert!(matches!(
            EmitterConfig::from_json_str(r#"{ "particle_count": 0 }"#),
            Err(ConfigError::NoParticles)
        ));
        assert!(matches!(
            EmitterConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EmitterConfig::from_json_str(r#"{ "lifetime": { "start": -1.0, "end": 2.0 } }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            EmitterConfig::from_path("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
