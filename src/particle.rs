//! The particle record.

use crate::color::Color;
use glam::Vec2;
use std::time::Duration;

/// A single particle.
///
/// Particles are never destroyed individually. When `lifetime` runs out the
/// owning [`ParticleSystem`](crate::ParticleSystem) reinitializes the record
/// in place at the emitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in window pixels (y down).
    pub position: Vec2,
    /// Velocity in pixels per second.
    pub velocity: Vec2,
    /// Remaining lifetime.
    pub lifetime: Duration,
    /// Lifetime sampled at the last respawn.
    pub spawned_lifetime: Duration,
    /// Current color. Alpha follows the remaining lifetime.
    pub color: Color,
}

impl Particle {
    /// A dormant particle sitting at `position`. It respawns on the first update.
    pub fn dormant(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            lifetime: Duration::ZERO,
            spawned_lifetime: Duration::ZERO,
            color: Color::TRANSPARENT,
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.lifetime.is_zero()
    }

    /// Remaining lifetime as a fraction of `reference`, clamped to `[0, 1]`.
    ///
    /// A zero reference yields `0.0`.
    #[inline]
    pub fn life_ratio(&self, reference: Duration) -> f32 {
        if reference.is_zero() {
            return 0.0;
        }
        (self.lifetime.as_secs_f32() / reference.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Set the alpha channel from [`life_ratio`](Self::life_ratio).
    #[inline]
    pub fn apply_fade(&mut self, reference: Duration) {
        let alpha = (self.life_ratio(reference) * 255.0) as u8;
        self.color.a = alpha;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dormant_is_expired() {
        let p = Particle::dormant(Vec2::new(3.0, 4.0));
        assert!(p.is_expired());
        assert_eq!(p.position, Vec2::new(3.0, 4.0));
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_life_ratio_clamps() {
        let mut p = Particle::dormant(Vec2::ZERO);
        p.lifetime = Duration::from_secs(4);
        assert_eq!(p.life_ratio(Duration::from_secs(3)), 1.0);

        p.lifetime = Duration::from_millis(1500);
        assert!((p.life_ratio(Duration::from_secs(3)) - 0.5).abs() < 1e-6);

        assert_eq!(p.life_ratio(Duration::ZERO), 0.0);
    }

    #[test]
    fn test_apply_fade() {
        let mut p = Particle::dormant(Vec2::ZERO);
        p.color = Color::RED;
        p.lifetime = Duration::from_secs(3);
        p.apply_fade(Duration::from_secs(3));
        assert_eq!(p.color.a, 255);

        p.lifetime = Duration::ZERO;
        p.apply_fade(Duration::from_secs(3));
        assert_eq!(p.color.a, 0);
        assert_eq!(p.color.with_alpha(255), Color::RED);
    }
}
