//! Running min/max of displaced vertex radii.

/// Tracks the lowest and highest displaced radius seen during a rebuild.
///
/// Starts empty (`min = f32::MAX`, `max = f32::MIN`). Trackers from separate
/// faces combine with [`merge`](Self::merge) in any order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElevationMinMax {
    min: f32,
    max: f32,
}

impl Default for ElevationMinMax {
    fn default() -> Self {
        Self::new()
    }
}

impl ElevationMinMax {
    /// An empty tracker.
    pub fn new() -> Self {
        Self {
            min: f32::MAX,
            max: f32::MIN,
        }
    }

    /// Record one value.
    #[inline]
    pub fn add(&mut self, value: f32) {
        if value > self.max {
            self.max = value;
        }
        if value < self.min {
            self.min = value;
        }
    }

    /// Fold another tracker into this one.
    pub fn merge(&mut self, other: &ElevationMinMax) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Smallest value recorded.
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Largest value recorded.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}
