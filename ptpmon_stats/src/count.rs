//! Per-type event counters.
//!
//! [`Count`] holds one monotonically increasing counter per
//! distinguishable event type, up to [`MAX_COUNTERS`] of them. Unlike
//! the scalar accumulator an all-zero counter set is a perfectly valid
//! result -- a quiet window is still a window -- so reading a counter
//! slot never fails.

use crate::series::{Series, Slot};
use crate::Error;

/// Maximum number of distinguishable event types.
pub const MAX_COUNTERS: usize = 17;

/// A fixed set of per-type event counters.
///
/// The cardinality is fixed at creation; the backing array is inline,
/// so a counter costs no heap allocation of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Count {
    size: usize,
    counters: [u32; MAX_COUNTERS],
}

/// The frozen output of a [`Count`] accumulator: a structured copy of
/// the counter values at snapshot time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountResult {
    size: usize,
    counters: [u32; MAX_COUNTERS],
}

impl CountResult {
    /// Number of event types this result covers.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The counter values, one per event type.
    #[must_use]
    pub fn counters(&self) -> &[u32] {
        &self.counters[..self.size]
    }
}

impl Count {
    /// Create a counter set covering `size` event types, all zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`] when `size` exceeds
    /// [`MAX_COUNTERS`].
    pub fn new(size: usize) -> Result<Self, Error> {
        if size > MAX_COUNTERS {
            return Err(Error::InvalidSize {
                requested: size,
                max: MAX_COUNTERS,
            });
        }
        Ok(Self {
            size,
            counters: [0; MAX_COUNTERS],
        })
    }

    /// Count one occurrence of `event`.
    ///
    /// # Panics
    ///
    /// An `event` at or beyond the cardinality given at creation is a
    /// caller bug and fails fast.
    pub fn update(&mut self, event: usize) {
        assert!(
            event < self.size,
            "event type {event} out of range for counter set of size {size}",
            size = self.size
        );
        self.counters[event] += 1;
    }

    /// Snapshot the counter values. Always succeeds; an all-zero set
    /// is a valid result.
    #[must_use]
    pub fn result(&self) -> CountResult {
        CountResult {
            size: self.size,
            counters: self.counters,
        }
    }

    /// Zero every counter, keeping the cardinality.
    pub fn reset(&mut self) {
        self.counters = [0; MAX_COUNTERS];
    }
}

impl Slot for Count {
    type Output = CountResult;

    fn reset(&mut self) {
        Count::reset(self);
    }

    fn output(&self) -> Result<CountResult, Error> {
        Ok(self.result())
    }
}

/// A rotating window ring of event counters.
pub type CountSeries = Series<Count>;

impl CountSeries {
    /// Create a series of `length` counter windows, each covering
    /// `size` event types.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`] when `size` exceeds
    /// [`MAX_COUNTERS`], [`Error::OutOfMemory`] if slot storage cannot
    /// be reserved.
    pub fn new(length: usize, size: usize) -> Result<Self, Error> {
        // Validate the cardinality once up front so the per-slot
        // constructor below is infallible.
        let template = Count::new(size)?;
        Series::new_with(length, || template)
    }

    /// Count one occurrence of `event` in the currently open window.
    pub fn update(&mut self, event: usize) {
        self.current_mut().update(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_above_cap_is_rejected() {
        assert_eq!(
            Count::new(MAX_COUNTERS + 1),
            Err(Error::InvalidSize {
                requested: 18,
                max: 17
            })
        );
        assert!(Count::new(MAX_COUNTERS).is_ok());
    }

    #[test]
    fn series_size_above_cap_is_rejected() {
        assert!(matches!(
            CountSeries::new(2, 18),
            Err(Error::InvalidSize {
                requested: 18,
                max: 17
            })
        ));
        assert!(CountSeries::new(2, 17).is_ok());
    }

    #[test]
    fn update_and_snapshot() {
        let mut count = Count::new(3).expect("within cap");
        count.update(0);
        count.update(2);
        count.update(2);

        let r = count.result();
        assert_eq!(r.size(), 3);
        assert_eq!(r.counters(), &[1, 0, 2]);
    }

    #[test]
    fn all_zero_is_a_valid_result() {
        let count = Count::new(4).expect("within cap");
        assert_eq!(count.result().counters(), &[0, 0, 0, 0]);
    }

    #[test]
    fn reset_zeroes_but_keeps_cardinality() {
        let mut count = Count::new(2).expect("within cap");
        count.update(1);
        count.reset();

        let r = count.result();
        assert_eq!(r.size(), 2);
        assert_eq!(r.counters(), &[0, 0]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_event_fails_fast() {
        let mut count = Count::new(2).expect("within cap");
        count.update(2);
    }

    #[test]
    fn advance_freezes_counts_and_opens_a_zero_window() {
        let mut series = CountSeries::new(3, 5).expect("within cap");
        series.update(1);
        series.update(1);
        series.update(4);
        series.advance();

        // The vacated window holds the frozen counts; the new current
        // window is all zero.
        let results = series.results().expect("counters never fail");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].counters(), &[0, 2, 0, 0, 1]);

        series.advance();
        let results = series.results().expect("counters never fail");
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].counters(), &[0, 0, 0, 0, 0]);
    }

    #[test]
    fn counter_windows_snapshot_even_when_untouched() {
        // Unlike statistics windows, counter windows closed without
        // any event are still valid results.
        let mut series = CountSeries::new(2, 1).expect("within cap");
        series.advance();
        series.advance();
        let results = series.results().expect("counters never fail");
        assert_eq!(results.len(), 2);
    }
}
