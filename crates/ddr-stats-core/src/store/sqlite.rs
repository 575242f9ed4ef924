//! SQLite play database reader

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rusqlite::types::Value;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, ToSql};

use super::model::{Grade, PlayRecord, Player};
use super::RecordStore;
use crate::error::{Error, Result};
use crate::filter::PlayFilter;

const PLAYER_BY_ID: &str = "SELECT FlowerId, DdrName FROM users WHERE FlowerId = ?1 LIMIT 1";
const PLAYER_BY_NAME: &str = "SELECT FlowerId, DdrName FROM users WHERE DdrName = ?1 LIMIT 1";
const PLAYS_FOR_PLAYER: &str = "SELECT FlowerId, Level, Score, Grade, Timestamp FROM DdrPlays \
     WHERE FlowerId = ?1 AND Grade != ?2 \
     ORDER BY Level, Timestamp";

/// Timestamp layouts found in play databases, tried in order
const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// Reader for a DDR play database
///
/// Each lookup opens its own read-only connection and closes it before
/// returning, so no connection outlives a single call.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

/// Row as read from `DdrPlays`, before grade and timestamp are decoded
struct RawPlay {
    player_id: i64,
    level: i32,
    score: f64,
    grade: String,
    timestamp: Value,
}

impl SqliteStore {
    /// Point the store at a database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::StoreNotFound(path.to_path_buf()));
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(conn)
    }

    fn find_player<K: ToSql>(&self, sql: &str, key: K) -> Result<Option<Player>> {
        let conn = self.connect()?;
        let player = conn
            .query_row(sql, params![key], |row| {
                Ok(Player {
                    id: row.get(0)?,
                    name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                })
            })
            .optional()?;
        Ok(player)
    }
}

impl RecordStore for SqliteStore {
    fn find_player_by_id(&self, id: i64) -> Result<Option<Player>> {
        let player = self.find_player(PLAYER_BY_ID, id)?;
        tracing::debug!(id, found = player.is_some(), "Player lookup by id");
        Ok(player)
    }

    fn find_player_by_name(&self, name: &str) -> Result<Option<Player>> {
        let player = self.find_player(PLAYER_BY_NAME, name)?;
        tracing::debug!(name, found = player.is_some(), "Player lookup by name");
        Ok(player)
    }

    fn query_plays(&self, player_id: i64, filter: &PlayFilter) -> Result<Vec<PlayRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(PLAYS_FOR_PLAYER)?;

        let rows = stmt.query_map(params![player_id, filter.exclude_grade.as_str()], |row| {
            Ok(RawPlay {
                player_id: row.get(0)?,
                level: row.get(1)?,
                score: row.get(2)?,
                grade: row.get(3)?,
                timestamp: row.get(4)?,
            })
        })?;

        let mut plays = Vec::new();
        for raw in rows {
            let raw = raw?;
            let timestamp = match decode_timestamp(raw.timestamp) {
                Ok(timestamp) => Some(timestamp),
                // Dates are only needed to apply a window
                Err(e) if filter.window.is_all_time() => {
                    tracing::debug!(player_id, error = %e, "Ignoring unreadable timestamp");
                    None
                }
                Err(e) => return Err(e),
            };
            let record = PlayRecord {
                player_id: raw.player_id,
                level: raw.level,
                score: raw.score,
                grade: raw.grade.parse::<Grade>()?,
                timestamp,
            };
            if filter.accepts(&record) {
                plays.push(record);
            }
        }

        tracing::debug!(
            player_id,
            plays = plays.len(),
            window = %filter.window,
            "Loaded plays"
        );

        Ok(plays)
    }
}

/// Decode a `Timestamp` column value.
///
/// Text is parsed as an ISO-8601 style date or date-time; integers are
/// taken as Unix seconds. Text carrying a UTC offset keeps its wall-clock
/// time, so the recorded day is the one the player saw.
fn decode_timestamp(value: Value) -> Result<NaiveDateTime> {
    match value {
        Value::Text(text) => parse_timestamp(&text).ok_or(Error::InvalidRecord {
            column: "Timestamp",
            value: text,
        }),
        Value::Integer(secs) => DateTime::from_timestamp(secs, 0)
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| Error::InvalidRecord {
                column: "Timestamp",
                value: secs.to_string(),
            }),
        other => Err(Error::InvalidRecord {
            column: "Timestamp",
            value: format!("{:?}", other),
        }),
    }
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
