//! Per-level score aggregation

use std::collections::BTreeMap;

use crate::error::Result;
use crate::filter::PlayFilter;
use crate::store::{PlayRecord, Player, RecordStore};

use super::model::LevelStats;

/// Computes per-level statistics for players in a record store
pub struct StatsAggregator<S> {
    store: S,
}

impl<S: RecordStore> StatsAggregator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Statistics for one player, ascending by level.
    ///
    /// An empty result means the player has no qualifying plays.
    pub fn fetch(&self, player: &Player, filter: &PlayFilter) -> Result<Vec<LevelStats>> {
        let plays = self.store.query_plays(player.id, filter)?;
        let stats = summarize(&plays, filter);

        tracing::debug!(
            player = %player,
            plays = plays.len(),
            levels = stats.len(),
            "Aggregated plays"
        );

        Ok(stats)
    }
}

/// Running totals for one level
struct Accumulator {
    max: f64,
    min: f64,
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn new(score: f64) -> Self {
        Self {
            max: score,
            min: score,
            sum: score,
            count: 1,
        }
    }

    fn add(&mut self, score: f64) {
        self.max = self.max.max(score);
        self.min = self.min.min(score);
        self.sum += score;
        self.count += 1;
    }
}

/// Group plays by level and summarize each group.
///
/// Plays rejected by `filter` are skipped. Levels without a single
/// qualifying play are left out.
pub fn summarize(plays: &[PlayRecord], filter: &PlayFilter) -> Vec<LevelStats> {
    let mut by_level: BTreeMap<i32, Accumulator> = BTreeMap::new();

    for play in plays.iter().filter(|p| filter.accepts(p)) {
        by_level
            .entry(play.level)
            .and_modify(|acc| acc.add(play.score))
            .or_insert_with(|| Accumulator::new(play.score));
    }

    by_level
        .into_iter()
        .map(|(level, acc)| LevelStats {
            level,
            max: acc.max,
            min: acc.min,
            avg: acc.sum / acc.count as f64,
        })
        .collect()
}
