//! Performance monitoring for a PTP daemon.
//!
//! This crate composes the accumulators from `ptpmon-stats` into the
//! records a management interface reads: per-metric statistics series
//! and message counters, replicated over a quarter-hour and a daily
//! cadence. The daemon's protocol layer pushes raw delay/offset
//! samples and message events in, its timer drives window rotation,
//! and management reads pull serializable snapshots out. Nothing here
//! performs I/O on its own apart from rendering snapshots to a writer
//! handed in by the caller.

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

pub mod config;
pub mod metric;
pub mod pm;
pub mod report;

pub use config::Config;
pub use metric::{ClockStat, MsgCounter};
pub use pm::{Cadence, ClockStats, PortCounters, PortStats};
