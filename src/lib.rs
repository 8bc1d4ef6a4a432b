//! # pfx2d
//!
//! 2D particle emitters: a fixed-size particle collection that follows an
//! emitter point, with per-particle lifetime, randomized respawn, velocity
//! integration and a lifetime-driven alpha fade. The particles are packed
//! into a vertex buffer each frame, ready for any renderer; a small
//! [`wgpu`]-based [`Viewer`] is included.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pfx2d::prelude::*;
//!
//! let mut system = ParticleSystem::new(EmitterConfig::new(10_000))?;
//! let mut clock = Clock::new();
//!
//! loop {
//!     system.set_emitter(cursor_position);
//!     system.update(clock.update());
//!     draw(system.vertices(), system.topology());
//! }
//! ```
//!
//! Or let the viewer drive it:
//!
//! ```ignore
//! Viewer::new(EmitterConfig::new(10_000)).run()?;
//! ```
//!
//! ## The update pass
//!
//! For every particle, once per frame:
//!
//! 1. Subtract the elapsed time from its remaining lifetime.
//! 2. If nothing is left, respawn it at the emitter with a random
//!    direction, speed, lifetime and color.
//! 3. Otherwise move it by `velocity * elapsed`.
//! 4. Set alpha to `255 * remaining / reference` (see [`Fade`]).
//! 5. Rewrite its slot in the vertex buffer.
//!
//! ## Shapes
//!
//! | Shape | Vertices per particle |
//! |-------|-----------------------|
//! | [`Shape::Point`] | 1 |
//! | [`Shape::Fan`] | `3 * segments` |

pub mod color;
pub mod emitter;
pub mod error;
pub mod geometry;
mod gpu;
pub mod input;
mod particle;
mod system;
pub mod time;
mod viewer;

pub use bytemuck;
pub use color::{Color, ColorMode};
pub use emitter::{EmitterConfig, Fade};
pub use error::{ConfigError, GpuError, ViewerError};
pub use geometry::{Geometry, Shape, Topology, Vertex};
pub use glam::Vec2;
pub use gpu::Renderer;
pub use particle::Particle;
pub use system::{ParticleSystem, UpdateStats};
pub use viewer::Viewer;

/// WGSL source of the particle render shader.
pub use gpu::SHADER_SOURCE;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use pfx2d::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{Color, ColorMode};
    pub use crate::emitter::{EmitterConfig, Fade};
    pub use crate::geometry::{Shape, Topology, Vertex};
    pub use crate::particle::Particle;
    pub use crate::input::{Input, KeyCode, MouseButton};
    pub use crate::system::{ParticleSystem, UpdateStats};
    pub use crate::time::{Clock, Stopwatch};
    pub use crate::viewer::Viewer;
    pub use crate::Vec2;
}
