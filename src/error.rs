//! Error types for pfx2d.
//!
//! The particle update pass itself never fails. Errors only come from the
//! edges: validating an [`EmitterConfig`](crate::EmitterConfig), bringing up
//! the GPU, and running the viewer window.

use thiserror::Error;

/// Errors produced while validating or loading an emitter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The collection must hold at least one particle.
    #[error("particle count must be greater than zero")]
    NoParticles,

    /// A sampling range has `start >= end` or a non-finite bound.
    #[error("{field} range is empty or not finite: {start}..{end}")]
    InvalidRange {
        field: &'static str,
        start: f64,
        end: f64,
    },

    /// Respawn speed range dips below zero.
    #[error("speed range must not be negative, got {start}..{end}")]
    NegativeSpeed { start: f32, end: f32 },

    /// `Fade::Fixed` with a zero reference would divide by zero.
    #[error("fade reference lifetime must be greater than zero")]
    ZeroFade,

    /// `ColorMode::Cycle` needs at least one color.
    #[error("color palette is empty")]
    EmptyPalette,

    /// Fan radius must be finite and positive.
    #[error("fan radius must be finite and positive, got {0}")]
    InvalidRadius(f32),

    /// A fan needs at least three triangles to look like a circle.
    #[error("fan needs at least 3 segments, got {0}")]
    TooFewSegments(u32),

    /// The packed vertex buffer would exceed [`MAX_VERTICES`](crate::geometry::MAX_VERTICES).
    #[error("{particles} particles with {per_particle} vertices each exceed the vertex limit")]
    TooManyVertices { particles: usize, per_particle: usize },

    /// Failed to parse a JSON config.
    #[error("failed to parse emitter config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Failed to read a config file from disk.
    #[error("failed to read emitter config: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support")]
    NoAdapter,

    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),

    /// The surface reports no usable texture format.
    #[error("surface has no supported texture formats")]
    NoSurfaceFormat,
}

/// Errors that can occur when running the viewer.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Failed to create event loop.
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Failed to create window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),

    /// The particle configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_error_message() {
        let err = ConfigError::InvalidRange {
            field: "speed",
            start: 5.0,
            end: 1.0,
        };
        assert_eq!(err.to_string(), "speed range is empty or not finite: 5..1");
    }

    #[test]
    fn test_vertex_limit_message() {
        let err = ConfigError::TooManyVertices {
            particles: 10,
            per_particle: 36,
        };
        assert_eq!(
            err.to_string(),
            "10 particles with 36 vertices each exceed the vertex limit"
        );
    }

    #[test]
    fn test_viewer_error_wraps_config() {
        let err: ViewerError = ConfigError::EmptyPalette.into();
        assert!(matches!(err, ViewerError::Config(ConfigError::EmptyPalette)));
        assert!(err.to_string().contains("color palette is empty"));
    }
}
