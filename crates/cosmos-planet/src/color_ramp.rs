//! Biome color ramp: one texture row per biome, sampled by the vertex UVs.

use std::path::Path;

use crate::error::SettingsError;
use crate::gradient::to_rgba8;
use crate::settings::Biome;

/// Row-major RGBA8 texture mapping (gradient position, biome) to a color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorRamp {
    /// Texels per row; equals the mesh resolution.
    pub width: u32,
    /// One row per biome.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl ColorRamp {
    /// Sample every biome gradient across `resolution` columns.
    ///
    /// Column `i` of row `b` holds `biomes[b].gradient.evaluate(i / (resolution - 1))`.
    pub fn build(biomes: &[Biome], resolution: u32) -> Self {
        let width = resolution;
        let height = biomes.len() as u32;
        let last_column = resolution.saturating_sub(1).max(1) as f32;

        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for biome in biomes {
            for i in 0..width {
                let color = biome.gradient.evaluate(i as f32 / last_column);
                pixels.extend_from_slice(&to_rgba8(color));
            }
        }

        Self {
            width,
            height,
            pixels,
        }
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Texel at column `x` of biome row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Write the ramp as a PNG.
    pub fn save_png(&self, path: &Path) -> Result<(), SettingsError> {
        image::save_buffer(
            path,
            &self.pixels,
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )
        .map_err(SettingsError::Image)
    }
}
