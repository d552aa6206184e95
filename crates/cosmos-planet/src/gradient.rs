//! Piecewise-linear color gradients for biome bands.

use serde::{Deserialize, Serialize};

/// Linear RGBA color, each channel in `[0, 1]`.
pub type Rgba = [f32; 4];

/// Opaque white, returned by empty gradients.
pub const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];

/// One stop of a [`ColorGradient`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorKey {
    /// Position along the gradient in `[0, 1]`.
    pub time: f32,
    /// Color at that position.
    pub color: Rgba,
}

impl ColorKey {
    /// A key at `time` with `color`.
    pub fn new(time: f32, color: Rgba) -> Self {
        Self { time, color }
    }
}

/// A color ramp defined by keys sorted by time.
///
/// Evaluation blends linearly between neighbouring keys and holds the first
/// and last colors outside the keyed range.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ColorKey>", into = "Vec<ColorKey>")]
pub struct ColorGradient {
    keys: Vec<ColorKey>,
}

impl From<Vec<ColorKey>> for ColorGradient {
    fn from(keys: Vec<ColorKey>) -> Self {
        Self::new(keys)
    }
}

impl From<ColorGradient> for Vec<ColorKey> {
    fn from(gradient: ColorGradient) -> Self {
        gradient.keys
    }
}

impl ColorGradient {
    /// Build a gradient; keys are sorted by time.
    pub fn new(mut keys: Vec<ColorKey>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// A gradient that is `color` everywhere.
    pub fn solid(color: Rgba) -> Self {
        Self::new(vec![ColorKey::new(0.0, color)])
    }

    /// The keys, sorted by time.
    pub fn keys(&self) -> &[ColorKey] {
        &self.keys
    }

    /// Color at `t`.
    pub fn evaluate(&self, t: f32) -> Rgba {
        let Some(first) = self.keys.first() else {
            return WHITE;
        };
        if t <= first.time {
            return first.color;
        }
        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.time {
                let span = b.time - a.time;
                let f = if span > 0.0 { (t - a.time) / span } else { 1.0 };
                return lerp_rgba(a.color, b.color, f);
            }
        }
        self.keys[self.keys.len() - 1].color
    }
}

fn lerp_rgba(a: Rgba, b: Rgba, t: f32) -> Rgba {
    std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t)
}

/// Quantize a linear color to 8 bits per channel.
pub fn to_rgba8(color: Rgba) -> [u8; 4] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}
