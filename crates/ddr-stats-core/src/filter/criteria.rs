//! Filter shared by every player in a comparison

use serde::{Deserialize, Serialize};

use super::window::TimeWindow;
use crate::store::{Grade, PlayRecord};

/// Criteria a play must meet to count towards statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayFilter {
    /// Plays with this grade are dropped
    pub exclude_grade: Grade,
    /// Date window plays must fall in
    pub window: TimeWindow,
}

impl Default for PlayFilter {
    fn default() -> Self {
        Self {
            exclude_grade: Grade::FAILED,
            window: TimeWindow::AllTime,
        }
    }
}

impl PlayFilter {
    /// Create a filter excluding failed plays over all time
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a date window
    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    /// Exclude a different grade
    pub fn excluding(mut self, grade: Grade) -> Self {
        self.exclude_grade = grade;
        self
    }

    /// Check if a play qualifies
    pub fn accepts(&self, record: &PlayRecord) -> bool {
        if record.grade == self.exclude_grade {
            return false;
        }
        match record.timestamp {
            Some(ref timestamp) => self.window.contains(timestamp),
            None => self.window.is_all_time(),
        }
    }
}
