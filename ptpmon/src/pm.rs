//! The performance-monitoring records.
//!
//! Three record shapes exist, matching what a daemon hangs off its
//! clock and ports:
//!
//! - [`ClockStats`]: four named statistics series per cadence plus
//!   window-head metadata and the day-cycle position. One per clock.
//! - [`PortStats`]: a single statistics series per cadence for the
//!   peer mean path delay. One per port running the peer-to-peer
//!   delay mechanism.
//! - [`PortCounters`]: a message-counter series per cadence. One per
//!   port.
//!
//! Recording fans out to every cadence's series; rotation is driven
//! externally. [`ClockStats::tick_quarter_hour`] implements the
//! daemon's single 15-minute timer: it rotates the quarter-hour
//! windows every call and the daily windows once per
//! [`QUARTER_HOURS_PER_DAY`] calls, reporting the daily rollover so
//! the driver can rotate its port records in step.
//!
//! All access is assumed exclusive and serialized; a multi-threaded
//! host wraps each record in its own guard.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::debug;

use ptpmon_stats::{CountSeries, StatsResult, StatsSeries};

use crate::config::{Config, QUARTER_HOURS_PER_DAY};
use crate::metric::{ClockStat, MsgCounter};
use crate::report::{
    ClockStatsReport, CounterLine, CounterReport, CounterWindow, MetricReport, StatsWindow,
};

/// Errors produced by the PM records.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration failed validation.
    #[error(transparent)]
    Config(#[from] crate::config::Error),
    /// An accumulator or series error. `Empty` here means "no data yet
    /// for this window" and callers are expected to ask again next
    /// tick.
    #[error(transparent)]
    Series(#[from] ptpmon_stats::Error),
}

/// The external timing periods at which windows rotate.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    /// Fifteen-minute windows.
    QuarterHour,
    /// Twenty-four-hour windows.
    Daily,
}

/// Identity metadata of one window: when it opened and whether its
/// contents are trustworthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHead {
    /// When the window opened.
    pub time: SystemTime,
    /// Cleared by the driver when the window was disturbed, e.g. the
    /// daemon started mid-window or the clock was stepped.
    pub valid: bool,
}

impl WindowHead {
    fn open(now: SystemTime) -> Self {
        Self {
            time: now,
            valid: true,
        }
    }

    /// Milliseconds since the Unix epoch; pre-epoch times clamp to 0.
    pub(crate) fn time_ms(&self) -> u128 {
        self.time
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis())
    }
}

fn stats_bank(length: usize) -> Result<[StatsSeries; ClockStat::COUNT], ptpmon_stats::Error> {
    Ok([
        StatsSeries::new(length)?,
        StatsSeries::new(length)?,
        StatsSeries::new(length)?,
        StatsSeries::new(length)?,
    ])
}

/// Per-clock statistics over both cadences.
#[derive(Debug)]
pub struct ClockStats {
    /// Quarter-hour position within the current day, wraps at
    /// [`QUARTER_HOURS_PER_DAY`].
    cycle_index: usize,
    quarter_hour_heads: Vec<WindowHead>,
    daily_heads: Vec<WindowHead>,
    quarter_hour: [StatsSeries; ClockStat::COUNT],
    daily: [StatsSeries; ClockStat::COUNT],
}

impl ClockStats {
    /// Build the record with every window empty and the first window
    /// of each cadence opened at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid configuration and
    /// [`Error::Series`] if slot storage cannot be allocated.
    pub fn new(config: &Config, now: SystemTime) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            cycle_index: 0,
            quarter_hour_heads: vec![WindowHead::open(now); config.quarter_hour_length],
            daily_heads: vec![WindowHead::open(now); config.daily_length],
            quarter_hour: stats_bank(config.quarter_hour_length)?,
            daily: stats_bank(config.daily_length)?,
        })
    }

    /// Fold one observed sample into the open window of every cadence.
    pub fn record(&mut self, metric: ClockStat, value: f64) {
        self.quarter_hour[metric.index()].add_value(value);
        self.daily[metric.index()].add_value(value);
    }

    /// Slot index of the still-open window for `cadence`.
    ///
    /// The four series of a cadence rotate in lockstep, so one cursor
    /// serves them all.
    #[must_use]
    pub fn current_index(&self, cadence: Cadence) -> usize {
        self.bank(cadence)[0].current_index()
    }

    /// Quarter-hour position within the current day.
    #[must_use]
    pub fn cycle_index(&self) -> usize {
        self.cycle_index
    }

    /// Head metadata of the still-open window for `cadence`.
    #[must_use]
    pub fn current_head(&self, cadence: Cadence) -> WindowHead {
        self.heads(cadence)[self.current_index(cadence)]
    }

    /// Rotate every series of `cadence` and open the new window at
    /// `now`.
    pub fn advance(&mut self, cadence: Cadence, now: SystemTime) {
        let (bank, heads) = match cadence {
            Cadence::QuarterHour => (&mut self.quarter_hour, &mut self.quarter_hour_heads),
            Cadence::Daily => (&mut self.daily, &mut self.daily_heads),
        };
        for series in bank.iter_mut() {
            series.advance();
        }
        let index = bank[0].current_index();
        heads[index] = WindowHead::open(now);
        debug!(?cadence, index, "opened monitoring window");
    }

    /// Drive the 15-minute timer: rotate the quarter-hour windows and,
    /// once per [`QUARTER_HOURS_PER_DAY`] calls, the daily windows
    /// too.
    ///
    /// Returns `true` when the daily windows also rotated, so the
    /// driver can rotate its port records in step.
    pub fn tick_quarter_hour(&mut self, now: SystemTime) -> bool {
        self.advance(Cadence::QuarterHour, now);
        self.cycle_index = (self.cycle_index + 1) % QUARTER_HOURS_PER_DAY;
        if self.cycle_index == 0 {
            self.advance(Cadence::Daily, now);
            true
        } else {
            false
        }
    }

    /// Mark the still-open window of `cadence` as disturbed.
    pub fn invalidate_current(&mut self, cadence: Cadence) {
        let index = self.current_index(cadence);
        match cadence {
            Cadence::QuarterHour => self.quarter_hour_heads[index].valid = false,
            Cadence::Daily => self.daily_heads[index].valid = false,
        }
    }

    /// Assemble the management view of every valid window of
    /// `cadence`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Series`] carrying `Empty` when a closed window
    /// of any metric never received a sample; no partial report is
    /// produced.
    pub fn snapshot(&self, cadence: Cadence) -> Result<ClockStatsReport, Error> {
        let (bank, heads) = match cadence {
            Cadence::QuarterHour => (&self.quarter_hour, &self.quarter_hour_heads),
            Cadence::Daily => (&self.daily, &self.daily_heads),
        };
        let mut metrics = Vec::with_capacity(ClockStat::COUNT);
        for metric in ClockStat::ALL {
            let results = match bank[metric.index()].results() {
                Ok(results) => results,
                Err(e) => {
                    debug!(?cadence, ?metric, "window without data, snapshot abandoned");
                    return Err(e.into());
                }
            };
            let windows = results
                .iter()
                .zip(heads.iter())
                .enumerate()
                .map(|(window, (result, head))| StatsWindow::new(window, head, result))
                .collect();
            metrics.push(MetricReport { metric, windows });
        }
        Ok(ClockStatsReport {
            cadence,
            current_window: self.current_index(cadence),
            cycle_index: self.cycle_index,
            metrics,
        })
    }

    fn bank(&self, cadence: Cadence) -> &[StatsSeries; ClockStat::COUNT] {
        match cadence {
            Cadence::QuarterHour => &self.quarter_hour,
            Cadence::Daily => &self.daily,
        }
    }

    fn heads(&self, cadence: Cadence) -> &[WindowHead] {
        match cadence {
            Cadence::QuarterHour => &self.quarter_hour_heads,
            Cadence::Daily => &self.daily_heads,
        }
    }
}

/// Per-port peer-delay statistics over both cadences.
#[derive(Debug)]
pub struct PortStats {
    quarter_hour: StatsSeries,
    daily: StatsSeries,
}

impl PortStats {
    /// Build the record with every window empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid configuration and
    /// [`Error::Series`] if slot storage cannot be allocated.
    pub fn new(config: &Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            quarter_hour: StatsSeries::new(config.quarter_hour_length)?,
            daily: StatsSeries::new(config.daily_length)?,
        })
    }

    /// Fold one peer-delay sample into the open window of every
    /// cadence.
    pub fn record(&mut self, value: f64) {
        self.quarter_hour.add_value(value);
        self.daily.add_value(value);
    }

    /// Slot index of the still-open window for `cadence`.
    #[must_use]
    pub fn current_index(&self, cadence: Cadence) -> usize {
        self.series(cadence).current_index()
    }

    /// Rotate the series of `cadence`.
    pub fn advance(&mut self, cadence: Cadence) {
        match cadence {
            Cadence::QuarterHour => self.quarter_hour.advance(),
            Cadence::Daily => self.daily.advance(),
        }
    }

    /// Results of every valid window of `cadence`, in slot order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Series`] carrying `Empty` when a closed window
    /// never received a sample.
    pub fn snapshot(&self, cadence: Cadence) -> Result<Vec<StatsResult>, Error> {
        Ok(self.series(cadence).results()?)
    }

    fn series(&self, cadence: Cadence) -> &StatsSeries {
        match cadence {
            Cadence::QuarterHour => &self.quarter_hour,
            Cadence::Daily => &self.daily,
        }
    }
}

/// Per-port message counters over both cadences.
#[derive(Debug)]
pub struct PortCounters {
    quarter_hour: CountSeries,
    daily: CountSeries,
}

impl PortCounters {
    /// Build the record with every window zero, sized to the message
    /// enumeration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid configuration and
    /// [`Error::Series`] if slot storage cannot be allocated.
    pub fn new(config: &Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            quarter_hour: CountSeries::new(config.quarter_hour_length, MsgCounter::COUNT)?,
            daily: CountSeries::new(config.daily_length, MsgCounter::COUNT)?,
        })
    }

    /// Count one message event in the open window of every cadence.
    pub fn record(&mut self, message: MsgCounter) {
        self.quarter_hour.update(message.index());
        self.daily.update(message.index());
    }

    /// Slot index of the still-open window for `cadence`.
    #[must_use]
    pub fn current_index(&self, cadence: Cadence) -> usize {
        self.series(cadence).current_index()
    }

    /// Rotate the series of `cadence`.
    pub fn advance(&mut self, cadence: Cadence) {
        match cadence {
            Cadence::QuarterHour => self.quarter_hour.advance(),
            Cadence::Daily => self.daily.advance(),
        }
    }

    /// Assemble the management view of every valid window of
    /// `cadence`. Counter windows are always valid, including all-zero
    /// ones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Series`] only on the structurally impossible
    /// case of a counter slot failing to read; kept fallible so the
    /// call shape matches [`ClockStats::snapshot`].
    pub fn snapshot(&self, cadence: Cadence) -> Result<CounterReport, Error> {
        let results = self.series(cadence).results()?;
        let windows = results
            .iter()
            .enumerate()
            .map(|(window, result)| CounterWindow {
                window,
                counters: MsgCounter::ALL
                    .iter()
                    .zip(result.counters().iter())
                    .map(|(&message, &count)| CounterLine { message, count })
                    .collect(),
            })
            .collect();
        Ok(CounterReport {
            cadence,
            current_window: self.current_index(cadence),
            windows,
        })
    }

    fn series(&self, cadence: Cadence) -> &CountSeries {
        match cadence {
            Cadence::QuarterHour => &self.quarter_hour,
            Cadence::Daily => &self.daily,
        }
    }
}
