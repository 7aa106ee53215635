//! Serializable snapshot records for management reads.
//!
//! These types are the rendering of the engine's state, kept separate
//! from the accumulator types themselves so that struct layout never
//! becomes part of the external contract. A management frontend asks a
//! PM record for a snapshot and writes the result out as JSON lines;
//! mapping onto SNMP table columns or any other representation is the
//! frontend's business.

use std::io;

use serde::Serialize;

use ptpmon_stats::StatsResult;

use crate::metric::{ClockStat, MsgCounter};
use crate::pm::{Cadence, WindowHead};

/// Errors produced while rendering reports.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Serialization failure.
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
    /// The caller's writer failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// One closed (or wrapped-to-open) window of a scalar metric.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct StatsWindow {
    /// Slot index of this window within its ring.
    pub window: usize,
    /// When the window opened, in milliseconds since the Unix epoch.
    pub time_ms: u128,
    /// False when the driver marked the window disturbed.
    pub valid: bool,
    /// Smallest sample in the window.
    pub min: f64,
    /// Largest sample in the window.
    pub max: f64,
    /// Largest magnitude in the window.
    pub max_abs: f64,
    /// Mean of the window's samples.
    pub mean: f64,
    /// Root mean square of the window's samples.
    pub rms: f64,
    /// Population standard deviation of the window's samples.
    pub stddev: f64,
}

impl StatsWindow {
    pub(crate) fn new(window: usize, head: &WindowHead, result: &StatsResult) -> Self {
        Self {
            window,
            time_ms: head.time_ms(),
            valid: head.valid,
            min: result.min,
            max: result.max,
            max_abs: result.max_abs,
            mean: result.mean,
            rms: result.rms,
            stddev: result.stddev,
        }
    }
}

/// All valid windows of one clock metric.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MetricReport {
    /// Which clock metric this covers.
    pub metric: ClockStat,
    /// Its windows in slot order.
    pub windows: Vec<StatsWindow>,
}

/// Snapshot of a clock-stats record for one cadence.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ClockStatsReport {
    /// The cadence the snapshot covers.
    pub cadence: Cadence,
    /// Slot index of the still-open window.
    pub current_window: usize,
    /// Quarter-hour position within the current day.
    pub cycle_index: usize,
    /// Per-metric window results.
    pub metrics: Vec<MetricReport>,
}

/// One message counter within a window.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct CounterLine {
    /// The message event counted.
    pub message: MsgCounter,
    /// Occurrences within the window.
    pub count: u32,
}

/// One window of message counters.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CounterWindow {
    /// Slot index of this window within its ring.
    pub window: usize,
    /// Counts in message order.
    pub counters: Vec<CounterLine>,
}

/// Snapshot of a port-counters record for one cadence.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CounterReport {
    /// The cadence the snapshot covers.
    pub cadence: Cadence,
    /// Slot index of the still-open window.
    pub current_window: usize,
    /// Window results in slot order.
    pub windows: Vec<CounterWindow>,
}

/// Write `records` to `writer`, one JSON object per line.
///
/// # Errors
///
/// Returns [`Error::Json`] for a serialization failure, [`Error::Io`]
/// when the writer fails.
pub fn write_jsonl<W, T>(mut writer: W, records: &[T]) -> Result<(), Error>
where
    W: io::Write,
    T: Serialize,
{
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_window_field_names_are_stable() {
        let window = StatsWindow {
            window: 3,
            time_ms: 1000,
            valid: true,
            min: -1.0,
            max: 2.0,
            max_abs: 2.0,
            mean: 0.5,
            rms: 1.5,
            stddev: 1.0,
        };
        let value = serde_json::to_value(window).expect("serializable");
        for key in [
            "window", "time_ms", "valid", "min", "max", "max_abs", "mean", "rms", "stddev",
        ] {
            assert!(value.get(key).is_some(), "missing field {key}");
        }
    }

    #[test]
    fn jsonl_is_one_object_per_line() {
        let lines = [
            CounterLine {
                message: MsgCounter::SyncTx,
                count: 4,
            },
            CounterLine {
                message: MsgCounter::SyncRx,
                count: 7,
            },
        ];
        let mut buf = Vec::new();
        write_jsonl(&mut buf, &lines).expect("writes to memory");
        let text = String::from_utf8(buf).expect("utf8");
        let rendered: Vec<&str> = text.trim_end().split('\n').collect();
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0], r#"{"message":"sync_tx","count":4}"#);
        assert_eq!(rendered[1], r#"{"message":"sync_rx","count":7}"#);
    }
}
