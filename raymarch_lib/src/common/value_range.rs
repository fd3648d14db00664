/// Closed range of sample values, used for volume statistics and normalization.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ValueRange {
    /// Lower bound
    pub low: f32,
    /// Upper bound
    pub high: f32,
}

impl ValueRange {
    /// Constructs new, empty range.
    pub fn empty() -> ValueRange {
        ValueRange {
            low: f32::NAN,
            high: f32::NAN,
        }
    }

    /// Constructs minimal range containing every finite sample.
    /// Non-finite samples are ignored.
    pub fn from_samples(iter: impl IntoIterator<Item = f32>) -> ValueRange {
        let mut range = ValueRange::empty();
        for val in iter {
            range.extend(val);
        }
        range
    }

    pub fn is_empty(&self) -> bool {
        self.low.is_nan() || self.high.is_nan()
    }

    /// Extend the range with new value.
    pub fn extend(&mut self, val: f32) {
        if !val.is_finite() {
            return;
        }

        if self.is_empty() {
            self.low = val;
            self.high = val;
            return;
        }

        self.low = f32::min(self.low, val);
        self.high = f32::max(self.high, val);
    }

    /// Check if value is inside the range.
    pub fn contains(&self, val: f32) -> bool {
        self.low <= val && val <= self.high
    }

    /// `high - low`, zero for empty range
    pub fn span(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.high - self.low
        }
    }

    /// Map `val` linearly so that `low -> 0` and `high -> 1`.
    /// Degenerate (single value or empty) range maps everything to 0.
    pub fn normalize(&self, val: f32) -> f32 {
        let span = self.span();
        if span > 0.0 {
            (val - self.low) / span
        } else {
            0.0
        }
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::empty()
    }
}
