//! Single-pass scalar statistics.
//!
//! [`Stats`] accumulates min/max/mean/RMS/stddev over a stream of
//! samples in O(1) per sample and O(1) memory. The mean and variance
//! use Welford's online update, which avoids the catastrophic
//! cancellation a naive sum-of-squares computation suffers when the
//! mean is large relative to the spread -- exactly the shape of clock
//! offset data, where samples sit nanoseconds apart around a large
//! offset.
//!
//! Samples are not validated: NaN and infinity propagate into the
//! results and it is the caller's job to keep them out.

use crate::series::{Series, Slot};
use crate::Error;

/// Online scalar statistics over a stream of `f64` samples.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stats {
    num: u32,
    min: f64,
    max: f64,
    mean: f64,
    sum_sqr: f64,
    sum_diff_sqr: f64,
}

/// The frozen output of a [`Stats`] accumulator.
///
/// A plain value copy; the accumulator's internal running sums are not
/// part of the observable contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsResult {
    /// Smallest sample seen.
    pub min: f64,
    /// Largest sample seen.
    pub max: f64,
    /// Largest magnitude seen, computed as `max(max, -min)`.
    pub max_abs: f64,
    /// Arithmetic mean of all samples.
    pub mean: f64,
    /// Root mean square of all samples.
    pub rms: f64,
    /// Population standard deviation.
    pub stddev: f64,
}

impl Stats {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sample into the running statistics.
    pub fn add_value(&mut self, value: f64) {
        let old_mean = self.mean;

        // Strict comparison: ties keep the existing extreme.
        if self.num == 0 || self.max < value {
            self.max = value;
        }
        if self.num == 0 || self.min > value {
            self.min = value;
        }

        self.num += 1;
        self.mean = old_mean + (value - old_mean) / f64::from(self.num);
        self.sum_sqr += value * value;
        self.sum_diff_sqr += (value - old_mean) * (value - self.mean);
    }

    /// Number of samples folded in since creation or the last reset.
    #[must_use]
    pub fn num_values(&self) -> u32 {
        self.num
    }

    /// Read the accumulated statistics.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if no sample has been added.
    pub fn result(&self) -> Result<StatsResult, Error> {
        if self.num == 0 {
            return Err(Error::Empty);
        }
        let num = f64::from(self.num);
        Ok(StatsResult {
            min: self.min,
            max: self.max,
            max_abs: if self.max > -self.min { self.max } else { -self.min },
            mean: self.mean,
            rms: (self.sum_sqr / num).sqrt(),
            stddev: (self.sum_diff_sqr / num).sqrt(),
        })
    }

    /// Return to the empty state without reallocating anything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Slot for Stats {
    type Output = StatsResult;

    fn reset(&mut self) {
        Stats::reset(self);
    }

    fn output(&self) -> Result<StatsResult, Error> {
        self.result()
    }
}

/// A rotating window ring of scalar statistics.
pub type StatsSeries = Series<Stats>;

impl StatsSeries {
    /// Create a series of `length` statistics windows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if slot storage cannot be
    /// reserved.
    pub fn new(length: usize) -> Result<Self, Error> {
        Series::new_with(length, Stats::new)
    }

    /// Fold one sample into the currently open window.
    pub fn add_value(&mut self, value: f64) {
        self.current_mut().add_value(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        let scale = a.abs().max(b.abs()).max(1.0);
        (a - b).abs() <= 1e-9 * scale
    }

    #[test]
    fn empty_accumulator_has_no_result() {
        let stats = Stats::new();
        assert_eq!(stats.result(), Err(Error::Empty));
        assert_eq!(stats.num_values(), 0);
    }

    #[test]
    fn reset_discards_all_samples() {
        let mut stats = Stats::new();
        stats.add_value(3.0);
        stats.add_value(-7.0);
        assert_eq!(stats.num_values(), 2);

        stats.reset();
        assert_eq!(stats.num_values(), 0);
        assert_eq!(stats.result(), Err(Error::Empty));
    }

    #[test]
    fn known_sequence() {
        let mut stats = Stats::new();
        for v in [1.0, 2.0, 3.0] {
            stats.add_value(v);
        }
        let r = stats.result().expect("has samples");
        assert!(close(r.min, 1.0));
        assert!(close(r.max, 3.0));
        assert!(close(r.max_abs, 3.0));
        assert!(close(r.mean, 2.0));
        assert!(close(r.rms, (14.0f64 / 3.0).sqrt()));
        assert!(close(r.stddev, (2.0f64 / 3.0).sqrt()));
    }

    #[test]
    fn single_sample_has_zero_spread() {
        let mut stats = Stats::new();
        stats.add_value(10.0);
        let r = stats.result().expect("has a sample");
        assert!(close(r.min, 10.0));
        assert!(close(r.max, 10.0));
        assert!(close(r.mean, 10.0));
        assert!(close(r.rms, 10.0));
        assert!(close(r.stddev, 0.0));
    }

    #[test]
    fn max_abs_tracks_the_negative_extreme() {
        let mut stats = Stats::new();
        stats.add_value(-50.0);
        stats.add_value(2.0);
        let r = stats.result().expect("has samples");
        assert!(close(r.min, -50.0));
        assert!(close(r.max, 2.0));
        assert!(close(r.max_abs, 50.0));
    }

    #[test]
    fn extremes_start_from_the_first_sample() {
        // A first sample of 0.0 must not leave min/max stuck at the
        // zero-initialized fields when later samples are all positive
        // or all negative.
        let mut stats = Stats::new();
        stats.add_value(5.0);
        stats.add_value(7.0);
        let r = stats.result().expect("has samples");
        assert!(close(r.min, 5.0));
        assert!(close(r.max, 7.0));
    }

    // The model here is the obviously-correct two-pass computation
    // over the full sample vector.
    proptest! {
        #[test]
        fn tracks_two_pass_model(samples in prop::collection::vec(-1e6f64..1e6f64, 1..256)) {
            let mut stats = Stats::new();
            for &v in &samples {
                stats.add_value(v);
            }
            let r = stats.result().expect("non-empty input");

            let n = samples.len() as f64;
            let mean = samples.iter().sum::<f64>() / n;
            let var = samples.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
            let rms = (samples.iter().map(|v| v * v).sum::<f64>() / n).sqrt();
            let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
            let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            prop_assert!(close(r.mean, mean), "mean {} vs model {}", r.mean, mean);
            prop_assert!(close(r.stddev, var.sqrt()), "stddev {} vs model {}", r.stddev, var.sqrt());
            prop_assert!(close(r.rms, rms), "rms {} vs model {}", r.rms, rms);
            prop_assert!(close(r.min, min));
            prop_assert!(close(r.max, max));
            prop_assert!(r.min <= r.mean + 1e-9 && r.mean <= r.max + 1e-9);
        }
    }
}
