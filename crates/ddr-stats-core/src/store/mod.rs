//! Read-only access to recorded plays
//!
//! The play database holds two tables: `users` (one row per player account)
//! and `DdrPlays` (one row per recorded attempt). Nothing in this crate
//! writes to either.

mod memory;
mod model;
mod sqlite;

pub use memory::MemoryStore;
pub use model::{Grade, PlayRecord, Player};
pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::filter::PlayFilter;

/// Source of players and their plays
pub trait RecordStore {
    /// Look up a player by numeric account id
    fn find_player_by_id(&self, id: i64) -> Result<Option<Player>>;

    /// Look up a player by exact (case-sensitive) display name
    fn find_player_by_name(&self, name: &str) -> Result<Option<Player>>;

    /// Plays of one player that pass `filter`, ordered by level then time
    fn query_plays(&self, player_id: i64, filter: &PlayFilter) -> Result<Vec<PlayRecord>>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn find_player_by_id(&self, id: i64) -> Result<Option<Player>> {
        (**self).find_player_by_id(id)
    }

    fn find_player_by_name(&self, name: &str) -> Result<Option<Player>> {
        (**self).find_player_by_name(name)
    }

    fn query_plays(&self, player_id: i64, filter: &PlayFilter) -> Result<Vec<PlayRecord>> {
        (**self).query_plays(player_id, filter)
    }
}
