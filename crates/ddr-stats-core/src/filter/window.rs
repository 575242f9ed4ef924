//! Date window applied to play timestamps

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Range of days a play must fall in to be counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeWindow {
    /// No date filtering
    #[default]
    AllTime,
    /// Plays recorded on any day from `start` through `end`, both inclusive
    Between { start: NaiveDate, end: NaiveDate },
}

impl TimeWindow {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        TimeWindow::Between { start, end }
    }

    /// Build a window from optional bounds.
    ///
    /// Filtering only applies when both bounds are present.
    pub fn from_bounds(all_time: bool, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        match (all_time, start, end) {
            (false, Some(start), Some(end)) => TimeWindow::Between { start, end },
            _ => TimeWindow::AllTime,
        }
    }

    pub fn is_all_time(&self) -> bool {
        matches!(self, TimeWindow::AllTime)
    }

    /// Check whether a play timestamp falls inside the window
    pub fn contains(&self, timestamp: &NaiveDateTime) -> bool {
        match self {
            TimeWindow::AllTime => true,
            TimeWindow::Between { start, end } => {
                let day = timestamp.date();
                *start <= day && day <= *end
            }
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeWindow::AllTime => write!(f, "all time"),
            TimeWindow::Between { start, end } => write!(f, "{} to {}", start, end),
        }
    }
}
