//! Window configuration.
//!
//! Defaults match the reference deployment: 97 quarter-hour windows
//! ("today plus one" slot) and 2 daily windows. The 17-counter cap is
//! the only constant the core hard-codes; everything here is supplied
//! by the daemon's configuration.

use serde::{Deserialize, Serialize};

use crate::pm::Cadence;

/// Seconds in one quarter-hour window.
pub const QUARTER_HOUR_SECS: u64 = 900;

/// Quarter-hour windows per day; a daily window closes after this many
/// quarter-hour ticks.
pub const QUARTER_HOURS_PER_DAY: usize = 96;

fn default_quarter_hour_length() -> usize {
    QUARTER_HOURS_PER_DAY + 1
}

fn default_daily_length() -> usize {
    2
}

/// Errors produced by [`Config`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A window ring cannot have zero slots.
    #[error("{cadence:?} window length must be non-zero")]
    InvalidLength {
        /// The cadence whose configured length was zero.
        cadence: Cadence,
    },
}

/// Configuration of the monitoring windows.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Number of quarter-hour windows kept, current window included.
    #[serde(default = "default_quarter_hour_length")]
    pub quarter_hour_length: usize,
    /// Number of daily windows kept, current window included.
    #[serde(default = "default_daily_length")]
    pub daily_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quarter_hour_length: default_quarter_hour_length(),
            daily_length: default_daily_length(),
        }
    }
}

impl Config {
    /// Check the configured lengths before any series is built.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] for a zero window length.
    pub fn validate(&self) -> Result<(), Error> {
        if self.quarter_hour_length == 0 {
            return Err(Error::InvalidLength {
                cadence: Cadence::QuarterHour,
            });
        }
        if self.daily_length == 0 {
            return Err(Error::InvalidLength {
                cadence: Cadence::Daily,
            });
        }
        Ok(())
    }

    /// The configured ring length for `cadence`.
    #[must_use]
    pub fn length(&self, cadence: Cadence) -> usize {
        match cadence {
            Cadence::QuarterHour => self.quarter_hour_length,
            Cadence::Daily => self.daily_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_deployment() {
        let config = Config::default();
        assert_eq!(config.quarter_hour_length, 97);
        assert_eq!(config.daily_length, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_deserializes_to_defaults() {
        let config: Config = serde_json::from_str("{}").expect("defaults fill in");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<Config, _> = serde_json::from_str(r#"{"qhour_len": 97}"#);
        assert!(result.is_err());
    }

    #[test]
    fn zero_length_fails_validation() {
        let config = Config {
            quarter_hour_length: 0,
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(Error::InvalidLength {
                cadence: Cadence::QuarterHour,
            })
        );
    }
}
