//! In-memory record store

use super::model::{PlayRecord, Player};
use super::RecordStore;
use crate::error::Result;
use crate::filter::PlayFilter;

/// Record store backed by plain vectors
///
/// Lookups behave like the SQLite store: the first matching player wins and
/// plays come back ordered by level, then timestamp.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    players: Vec<Player>,
    plays: Vec<PlayRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player
    pub fn with_player(mut self, player: Player) -> Self {
        self.players.push(player);
        self
    }

    /// Add a play record
    pub fn with_play(mut self, play: PlayRecord) -> Self {
        self.plays.push(play);
        self
    }

    /// Add several play records
    pub fn with_plays(mut self, plays: impl IntoIterator<Item = PlayRecord>) -> Self {
        self.plays.extend(plays);
        self
    }

}

impl RecordStore for MemoryStore {
    fn find_player_by_id(&self, id: i64) -> Result<Option<Player>> {
        Ok(self.players.iter().find(|p| p.id == id).cloned())
    }

    fn find_player_by_name(&self, name: &str) -> Result<Option<Player>> {
        Ok(self.players.iter().find(|p| p.name == name).cloned())
    }

    fn query_plays(&self, player_id: i64, filter: &PlayFilter) -> Result<Vec<PlayRecord>> {
        let mut plays: Vec<PlayRecord> = self
            .plays
            .iter()
            .filter(|p| p.player_id == player_id && filter.accepts(p))
            .cloned()
            .collect();
        plays.sort_by(|a, b| a.level.cmp(&b.level).then(a.timestamp.cmp(&b.timestamp)));
        Ok(plays)
    }
}
