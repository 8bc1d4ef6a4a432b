//! Vertex packing for rendering.
//!
//! Every particle owns a fixed slice of the vertex buffer, so the buffer is
//! rewritten in place each frame and never reallocates after construction.
//!
//! | Shape | Vertices per particle | Topology |
//! |-------|-----------------------|----------|
//! | [`Shape::Point`] | 1 | point list |
//! | [`Shape::Fan`] | `3 * segments` | triangle list |

use crate::error::ConfigError;
use crate::particle::Particle;
use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Largest vertex buffer a config may ask for. Keeps the GPU buffer under
/// wgpu's default 256 MiB limit after power-of-two growth.
pub const MAX_VERTICES: usize = 1 << 24;

/// GPU vertex: pixel position plus RGBA8 color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [u8; 4],
}

/// How each particle is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// A single point.
    Point,
    /// A filled circle built from `segments` triangles around the particle.
    Fan {
        /// Circle radius in pixels.
        radius: f32,
        /// Number of triangles.
        segments: u32,
    },
}

impl Default for Shape {
    fn default() -> Self {
        Shape::Point
    }
}

/// Primitive topology the vertex buffer is laid out for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    PointList,
    TriangleList,
}

impl Shape {
    #[inline]
    pub fn vertices_per_particle(&self) -> usize {
        match *self {
            Shape::Point => 1,
            Shape::Fan { segments, .. } => 3 * segments as usize,
        }
    }

    /// Vertices needed for `particle_count` particles, if within [`MAX_VERTICES`].
    pub fn vertex_count(&self, particle_count: usize) -> Result<usize, ConfigError> {
        let per_particle = self.vertices_per_particle();
        particle_count
            .checked_mul(per_particle)
            .filter(|&count| count <= MAX_VERTICES)
            .ok_or(ConfigError::TooManyVertices {
                particles: particle_count,
                per_particle,
            })
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        match self {
            Shape::Point => Topology::PointList,
            Shape::Fan { .. } => Topology::TriangleList,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Shape::Fan { radius, segments } = *self {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(ConfigError::InvalidRadius(radius));
            }
            if segments < 3 {
                return Err(ConfigError::TooFewSegments(segments));
            }
        }
        Ok(())
    }
}

/// The packed vertex buffer for a particle collection.
#[derive(Debug, Clone)]
pub struct Geometry {
    shape: Shape,
    /// Rim offsets for a fan, `segments + 1` entries with the first repeated last.
    rim: Vec<Vec2>,
    vertices: Vec<Vertex>,
}

impl Geometry {
    pub fn new(shape: Shape, particle_count: usize) -> Self {
        let rim = match shape {
            Shape::Point => Vec::new(),
            Shape::Fan { radius, segments } => {
                let step = TAU / segments as f32;
                (0..=segments)
                    .map(|k| Vec2::from_angle((k % segments) as f32 * step) * radius)
                    .collect()
            }
        };

        Self {
            shape,
            rim,
            vertices: vec![Vertex::default(); particle_count * shape.vertices_per_particle()],
        }
    }

    /// Rewrite the slot of particle `index`.
    pub fn write(&mut self, index: usize, particle: &Particle) {
        let per = self.shape.vertices_per_particle();
        let start = index * per;
        let Some(slot) = self.vertices.get_mut(start..start + per) else {
            return;
        };

        let color = particle.color.to_array();
        let center = particle.position;

        match self.shape {
            Shape::Point => {
                slot[0] = Vertex {
                    position: center.to_array(),
                    color,
                };
            }
            Shape::Fan { .. } => {
                for (tri, edge) in slot.chunks_exact_mut(3).zip(self.rim.windows(2)) {
                    tri[0] = Vertex { position: center.to_array(), color };
                    tri[1] = Vertex { position: (center + edge[0]).to_array(), color };
                    tri[2] = Vertex { position: (center + edge[1]).to_array(), color };
                }
            }
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.shape.topology()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn particle_at(x: f32, y: f32) -> Particle {
        let mut p = Particle::dormant(Vec2::new(x, y));
        p.color = Color::rgba(1, 2, 3, 4);
        p
    }

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<Vertex>(), 12);
    }

    #[test]
    fn test_point_packing() {
        let mut geometry = Geometry::new(Shape::Point, 2);
        geometry.write(1, &particle_at(5.0, 6.0));

        assert_eq!(geometry.vertices().len(), 2);
        assert_eq!(geometry.vertices()[1].position, [5.0, 6.0]);
        assert_eq!(geometry.vertices()[1].color, [1, 2, 3, 4]);
        assert_eq!(geometry.topology(), Topology::PointList);
    }

    #[test]
    fn test_fan_packing_stays_on_circle() {
        let shape = Shape::Fan { radius: 10.0, segments: 12 };
        let mut geometry = Geometry::new(shape, 3);
        assert_eq!(geometry.vertices().len(), 3 * 36);

        geometry.write(2, &particle_at(100.0, 50.0));
        let slot = &geometry.vertices()[72..108];
        let center = Vec2::new(100.0, 50.0);

        for tri in slot.chunks_exact(3) {
            assert_eq!(Vec2::from(tri[0].position), center);
            for v in &tri[1..] {
                let d = Vec2::from(v.position).distance(center);
                assert!((d - 10.0).abs() < 1e-3);
            }
        }

        // Last triangle closes the circle on the first rim vertex
        assert_eq!(slot[35].position, slot[1].position);
    }

    #[test]
    fn test_out_of_range_write_is_ignored() {
        let mut geometry = Geometry::new(Shape::Point, 1);
        geometry.write(4, &particle_at(1.0, 1.0));
        assert_eq!(geometry.vertices()[0], Vertex::default());
    }

    #[test]
    fn test_shape_validation() {
        assert!(Shape::Point.validate().is_ok());
        assert!(matches!(
            Shape::Fan { radius: 0.0, segments: 8 }.validate(),
            Err(ConfigError::InvalidRadius(_))
        ));
        assert!(matches!(
            Shape::Fan { radius: 2.0, segments: 2 }.validate(),
            Err(ConfigError::TooFewSegments(2))
        ));
    }

    #[test]
    fn test_vertex_count_limit() {
        let fan = Shape::Fan { radius: 1.0, segments: 12 };
        assert_eq!(fan.vertex_count(1000).unwrap(), 36_000);
        assert_eq!(Shape::Point.vertex_count(MAX_VERTICES).unwrap(), MAX_VERTICES);

        assert!(matches!(
            Shape::Point.vertex_count(MAX_VERTICES + 1),
            Err(ConfigError::TooManyVertices { .. })
        ));
        // Would overflow usize
        assert!(matches!(
            Shape::Fan { radius: 1.0, segments: 3 }.vertex_count(usize::MAX / 4),
            Err(ConfigError::TooManyVertices { per_particle: 9, .. })
        ));
    }
}
