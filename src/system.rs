//! The particle system: a fixed-size particle collection following an emitter.

use crate::emitter::EmitterConfig;
use crate::error::ConfigError;
use crate::geometry::{Geometry, Topology, Vertex};
use crate::particle::Particle;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Counters from one [`ParticleSystem::update`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Particles that expired and were reinitialized at the emitter.
    pub respawned: usize,
    /// Particles that only moved.
    pub advanced: usize,
}

/// A fixed-size particle collection and its packed vertex buffer.
///
/// Call [`set_emitter`](Self::set_emitter) and [`update`](Self::update)
/// once per frame, then hand [`vertices`](Self::vertices) to the renderer.
///
/// # Example
///
/// ```ignore
/// let mut system = ParticleSystem::new(EmitterConfig::new(10_000))?;
/// loop {
///     system.set_emitter(cursor);
///     system.update(clock.update());
///     renderer.draw(system.vertices(), system.topology());
/// }
/// ```
pub struct ParticleSystem {
    config: EmitterConfig,
    particles: Vec<Particle>,
    geometry: Geometry,
    emitter: Vec2,
    rng: SmallRng,
}

impl ParticleSystem {
    /// Validate `config` and allocate the collection.
    ///
    /// Every particle starts dormant at the origin with zero lifetime, so
    /// the first [`update`](Self::update) respawns all of them at the emitter.
    pub fn new(config: EmitterConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let particles = vec![Particle::dormant(Vec2::ZERO); config.particle_count];
        let geometry = Geometry::new(config.shape, config.particle_count);

        tracing::debug!(
            particles = config.particle_count,
            shape = ?config.shape,
            vertices = geometry.vertices().len(),
            "created particle system"
        );

        Ok(Self {
            config,
            particles,
            geometry,
            emitter: Vec2::ZERO,
            rng,
        })
    }

    /// Move the point respawned particles start from.
    #[inline]
    pub fn set_emitter(&mut self, position: Vec2) {
        self.emitter = position;
    }

    #[inline]
    pub fn emitter(&self) -> Vec2 {
        self.emitter
    }

    /// Advance every particle by `elapsed`.
    ///
    /// Each particle loses `elapsed` of lifetime. Expired particles are
    /// reinitialized at the emitter with a random direction, speed,
    /// lifetime and color. The rest move by `velocity * elapsed`. Alpha is
    /// then recomputed from the remaining lifetime and the particle's
    /// vertex slot is rewritten.
    pub fn update(&mut self, elapsed: Duration) -> UpdateStats {
        let Self {
            config,
            particles,
            geometry,
            emitter,
            rng,
        } = self;

        let dt = elapsed.as_secs_f32();
        let mut stats = UpdateStats::default();

        for (index, particle) in particles.iter_mut().enumerate() {
            particle.lifetime = particle.lifetime.saturating_sub(elapsed);

            if particle.is_expired() {
                respawn(particle, index, config, *emitter, rng);
                stats.respawned += 1;
            } else {
                particle.position += particle.velocity * dt;
                stats.advanced += 1;
            }

            particle.apply_fade(config.fade.reference(particle));
            geometry.write(index, particle);
        }

        tracing::trace!(
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            respawned = stats.respawned,
            "particle update"
        );

        stats
    }

    /// Reinitialize every particle at the emitter right now.
    pub fn respawn_all(&mut self) {
        let Self {
            config,
            particles,
            geometry,
            emitter,
            rng,
        } = self;

        for (index, particle) in particles.iter_mut().enumerate() {
            respawn(particle, index, config, *emitter, rng);
            particle.apply_fade(config.fade.reference(particle));
            geometry.write(index, particle);
        }

        tracing::debug!(particles = particles.len(), emitter = ?*emitter, "respawned all particles");
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Packed vertices, one slot per particle in collection order.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        self.geometry.vertices()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.geometry.vertices().len()
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.geometry.topology()
    }

    #[inline]
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }
}

fn respawn(
    particle: &mut Particle,
    index: usize,
    config: &EmitterConfig,
    emitter: Vec2,
    rng: &mut SmallRng,
) {
    let angle = rng.gen_range(config.angle_degrees.clone()).to_radians();
    let speed = rng.gen_range(config.speed.clone());
    let lifetime = rng.gen_range(config.lifetime.clone());

    particle.velocity = Vec2::from_angle(angle) * speed;
    particle.lifetime = lifetime;
    particle.spawned_lifetime = lifetime;
    particle.position = emitter;
    particle.color = config.color.pick(index, rng);
}
