//! Data models for per-level score statistics

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::store::Player;

/// Lower bound of the score axis in comparison charts
pub const SCORE_AXIS_MIN: f64 = 600_000.0;
/// Upper bound of the score axis in comparison charts
pub const SCORE_AXIS_MAX: f64 = 1_000_000.0;

/// Score summary for one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelStats {
    pub level: i32,
    /// Best qualifying score
    pub max: f64,
    /// Worst qualifying score
    pub min: f64,
    /// Unweighted mean of qualifying scores
    pub avg: f64,
}

/// Inclusive span of levels shared by every series in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRange {
    pub min: i32,
    pub max: i32,
}

impl LevelRange {
    /// Smallest range covering every level yielded, or `None` for no levels
    pub fn covering(levels: impl IntoIterator<Item = i32>) -> Option<Self> {
        levels.into_iter().fold(None, |range, level| {
            Some(match range {
                None => LevelRange {
                    min: level,
                    max: level,
                },
                Some(r) => LevelRange {
                    min: r.min.min(level),
                    max: r.max.max(level),
                },
            })
        })
    }

    /// Every integer level from `min` to `max`
    pub fn levels(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }
}

impl fmt::Display for LevelRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// One player's statistics, ascending by level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub player: Player,
    pub levels: Vec<LevelStats>,
}

impl Series {
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Statistics for one level, if the player has qualifying plays there
    pub fn get(&self, level: i32) -> Option<&LevelStats> {
        self.levels
            .binary_search_by_key(&level, |s| s.level)
            .ok()
            .map(|idx| &self.levels[idx])
    }
}

/// Everything a chart needs to compare players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonDataset {
    /// One series per requested player, in request order
    pub series: Vec<Series>,
    /// Levels spanned by the series; `None` when every series is empty
    pub level_range: Option<LevelRange>,
}

impl ComparisonDataset {
    /// Whether no series has any data
    pub fn is_empty(&self) -> bool {
        self.level_range.is_none()
    }
}

/// Which statistics a chart plots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartMode {
    /// Average score only
    AverageOnly,
    /// Max, average and min
    #[default]
    Full,
}

impl ChartMode {
    pub fn from_avg_only(avg_only: bool) -> Self {
        if avg_only {
            ChartMode::AverageOnly
        } else {
            ChartMode::Full
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ChartMode::AverageOnly => ChartMode::Full,
            ChartMode::Full => ChartMode::AverageOnly,
        }
    }
}

impl fmt::Display for ChartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartMode::AverageOnly => write!(f, "Average only"),
            ChartMode::Full => write!(f, "Max / Avg / Min"),
        }
    }
}
