//! Fixed-capacity statistics and counter accumulation.
//!
//! This crate is the measurement core of the ptpmon project. It knows
//! nothing about PTP message formats, timers or management reads; it
//! only accumulates. Two accumulator kinds exist -- single-pass scalar
//! statistics ([`stats::Stats`]) and per-type event counters
//! ([`count::Count`]) -- and both slot into the same rotating window
//! ring ([`series::Series`]). All storage is allocated at construction
//! and never resized, so the record path is safe to run inside a
//! latency-sensitive control loop.

#![deny(clippy::all)]
#![deny(clippy::cargo)]
#![deny(clippy::pedantic)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::unwrap_used)]
#![deny(unused_extern_crates)]
#![deny(unused_allocation)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![deny(unreachable_pub)]
#![deny(missing_docs)]
#![deny(missing_copy_implementations)]
#![deny(missing_debug_implementations)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod count;
pub mod series;
pub mod stats;

pub use count::{Count, CountResult, CountSeries, MAX_COUNTERS};
pub use series::{Series, Slot};
pub use stats::{Stats, StatsResult, StatsSeries};

/// Errors produced by the accumulator and series types.
///
/// `Empty` is the one soft condition in this crate: callers routinely
/// see it for windows that have not yet received a sample and treat it
/// as "no data yet", not as a fault. The other variants are
/// construction-time failures.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No values have been recorded since creation or the last reset.
    #[error("no values recorded")]
    Empty,
    /// Requested counter cardinality exceeds [`MAX_COUNTERS`].
    #[error("counter set size {requested} exceeds maximum {max}")]
    InvalidSize {
        /// The cardinality the caller asked for.
        requested: usize,
        /// The fixed upper bound.
        max: usize,
    },
    /// Backing storage for a series could not be reserved.
    #[error("failed to allocate storage for {length} windows")]
    OutOfMemory {
        /// Number of windows that was requested.
        length: usize,
    },
}
