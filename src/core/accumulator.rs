//! Time-weighted running sums for a single open interval.

/// Running sums of `value * elapsed_ms` for each axis.
///
/// One accumulator covers exactly one interval. The scheduler resets it in
/// place when the interval closes instead of allocating a new one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    sum_x: f64,
    sum_y: f64,
    sum_z: f64,
}

impl Accumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reading held for `weight` milliseconds.
    ///
    /// A zero weight leaves the sums untouched.
    pub fn add(&mut self, x: f64, y: f64, z: f64, weight: i64) {
        debug_assert!(weight >= 0, "negative weight {weight}");
        if weight == 0 {
            return;
        }
        let w = weight as f64;
        self.sum_x += x * w;
        self.sum_y += y * w;
        self.sum_z += z * w;
    }

    /// Divide the sums by `normalizer` (the interval duration in ms).
    pub fn average(&self, normalizer: i64) -> (f64, f64, f64) {
        debug_assert!(normalizer > 0, "normalizer must be positive");
        let n = normalizer as f64;
        (self.sum_x / n, self.sum_y / n, self.sum_z / n)
    }

    /// Raw weighted sums.
    pub fn sums(&self) -> (f64, f64, f64) {
        (self.sum_x, self.sum_y, self.sum_z)
    }

    /// Zero all sums.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_weights_each_axis() {
        let mut acc = Accumulator::new();
        acc.add(1.0, -2.0, 0.5, 10);
        acc.add(3.0, 0.0, 0.5, 30);

        assert_eq!(acc.sums(), (100.0, -20.0, 20.0));
    }

    #[test]
    fn test_zero_weight_is_noop() {
        let mut acc = Accumulator::new();
        acc.add(9.81, 9.81, 9.81, 0);
        assert_eq!(acc, Accumulator::new());
    }

    #[test]
    fn test_average_is_idempotent() {
        let mut acc = Accumulator::new();
        acc.add(2.0, 4.0, 6.0, 50);

        let first = acc.average(100);
        let second = acc.average(100);
        assert_eq!(first, (1.0, 2.0, 3.0));
        assert_eq!(first, second);
    }

    #[test]
    fn test_reset_clears_sums() {
        let mut acc = Accumulator::new();
        acc.add(1.0, 1.0, 1.0, 100);
        acc.reset();
        assert_eq!(acc.average(100), (0.0, 0.0, 0.0));
    }
}
