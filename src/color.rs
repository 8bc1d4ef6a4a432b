//! Particle colors.
//!
//! Colors are stored as 8-bit RGBA, the same layout the vertex buffer
//! carries to the GPU. The alpha channel is owned by the updater: it is
//! rewritten every frame from the particle's remaining lifetime.

use bytemuck::{Pod, Zeroable};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    #[inline]
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// How a respawned particle picks its color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Particle `i` always gets `palette[i % palette.len()]`.
    Cycle(Vec<Color>),
    /// A fresh random RGB color on every respawn.
    Random,
    /// Every particle gets the same color.
    Solid(Color),
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode::Cycle(vec![Color::RED, Color::GREEN, Color::BLUE])
    }
}

impl ColorMode {
    /// Pick the color for particle `index`. Alpha is left opaque.
    pub fn pick<R: Rng>(&self, index: usize, rng: &mut R) -> Color {
        match self {
            // An empty palette is rejected by `EmitterConfig::validate`.
            ColorMode::Cycle(palette) => palette
                .get(index % palette.len().max(1))
                .copied()
                .unwrap_or(Color::WHITE),
            ColorMode::Random => Color::rgb(rng.gen(), rng.gen(), rng.gen()),
            ColorMode::Solid(color) => color.with_alpha(255),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_cycle_wraps_by_index() {
        let mode = ColorMode::default();
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(mode.pick(0, &mut rng), Color::RED);
        assert_eq!(mode.pick(1, &mut rng), Color::GREEN);
        assert_eq!(mode.pick(2, &mut rng), Color::BLUE);
        assert_eq!(mode.pick(3, &mut rng), Color::RED);
    }

    #[test]
    fn test_random_is_opaque() {
        let mut rng = SmallRng::seed_from_u64(7);
        for i in 0..32 {
            assert_eq!(ColorMode::Random.pick(i, &mut rng).a, 255);
        }
    }

    #[test]
    fn test_solid_resets_alpha() {
        let mode = ColorMode::Solid(Color::rgba(10, 20, 30, 0));
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(mode.pick(5, &mut rng), Color::rgb(10, 20, 30));
    }

    #[test]
    fn test_color_mode_json() {
        let mode: ColorMode = serde_json::from_str(r#"{"solid":{"r":1,"g":2,"b":3,"a":4}}"#).unwrap();
        assert_eq!(mode, ColorMode::Solid(Color::rgba(1, 2, 3, 4)));

        let mode: ColorMode = serde_json::from_str(r#""random""#).unwrap();
        assert_eq!(mode, ColorMode::Random);
    }
}
