use crate::consts::{
    DEFAULT_HUE_HIGH, DEFAULT_HUE_LOW, DEFAULT_ITERATIONS, DEFAULT_SAT_HIGH, DEFAULT_SAT_LOW,
    DEFAULT_VAL_HIGH, DEFAULT_VAL_LOW, HUE_MAX, ITERATIONS_MAX,
};

/// The user-tunable HSV threshold window plus the transform intensity.
///
/// Bounds are inclusive. Hue is limited to `0..=180`, saturation and value use
/// the full `u8` range, and `iterations` to `0..=20`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdWindow {
    pub hue_low: u8,
    pub hue_high: u8,
    pub sat_low: u8,
    pub sat_high: u8,
    pub val_low: u8,
    pub val_high: u8,
    /// Number of passes per morphology stage. Zero behaves like one.
    pub iterations: u8,
}

impl Default for ThresholdWindow {
    fn default() -> Self {
        Self {
            hue_low: DEFAULT_HUE_LOW,
            hue_high: DEFAULT_HUE_HIGH,
            sat_low: DEFAULT_SAT_LOW,
            sat_high: DEFAULT_SAT_HIGH,
            val_low: DEFAULT_VAL_LOW,
            val_high: DEFAULT_VAL_HIGH,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl ThresholdWindow {
    /// Restore every bound and the iteration count to the defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Pull out-of-range values back into their declared ranges.
    pub fn clamp(&mut self) {
        self.hue_low = self.hue_low.min(HUE_MAX);
        self.hue_high = self.hue_high.min(HUE_MAX);
        self.iterations = self.iterations.min(ITERATIONS_MAX);
    }

    /// Copy with every value inside its declared range.
    pub fn clamped(mut self) -> Self {
        self.clamp();
        self
    }

    pub fn lower(&self) -> [u8; 3] {
        [self.hue_low, self.sat_low, self.val_low]
    }

    pub fn upper(&self) -> [u8; 3] {
        [self.hue_high, self.sat_high, self.val_high]
    }

    /// Morphology pass count actually applied (0 is treated as 1).
    pub fn effective_iterations(&self) -> usize {
        usize::from(self.iterations.max(1))
    }

    /// True if an `[h, s, v]` pixel lies inside the window on all three channels.
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        let lo = self.lower();
        let hi = self.upper();
        (0..3).all(|c| lo[c] <= hsv[c] && hsv[c] <= hi[c])
    }
}
