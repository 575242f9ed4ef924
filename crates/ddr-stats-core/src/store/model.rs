//! Player and play record models

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A player account ("flower") in the play database
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Numeric account identifier
    pub id: i64,
    /// In-game display name
    pub name: String,
}

impl Player {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// One recorded attempt at a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    /// Owner of the play
    pub player_id: i64,
    /// Chart difficulty level
    pub level: i32,
    /// Final score (0 - 1,000,000)
    pub score: f64,
    /// Letter grade awarded
    pub grade: Grade,
    /// When the play was recorded; `None` if the stored value was unreadable
    /// and no date window needed it
    pub timestamp: Option<NaiveDateTime>,
}

/// Letter grade awarded for a play, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA+")]
    AaPlus,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AA-")]
    AaMinus,
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    D,
    /// Failed
    E,
}

impl Grade {
    /// The failing grade; plays with it never count towards statistics
    pub const FAILED: Grade = Grade::E;

    /// All grades, best first
    pub const ALL: [Grade; 16] = [
        Grade::Aaa,
        Grade::AaPlus,
        Grade::Aa,
        Grade::AaMinus,
        Grade::APlus,
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::CMinus,
        Grade::DPlus,
        Grade::D,
        Grade::E,
    ];

    /// Label as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Aaa => "AAA",
            Grade::AaPlus => "AA+",
            Grade::Aa => "AA",
            Grade::AaMinus => "AA-",
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::E => "E",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Grade {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grade::ALL
            .iter()
            .copied()
            .find(|grade| grade.as_str() == s)
            .ok_or_else(|| Error::InvalidRecord {
                column: "Grade",
                value: s.to_string(),
            })
    }
}
