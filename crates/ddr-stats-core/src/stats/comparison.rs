//! Comparison of one or two players on a shared level axis

use crate::error::{Error, Result};
use crate::filter::PlayFilter;
use crate::resolve::EntityResolver;
use crate::store::{Player, RecordStore};

use super::aggregator::StatsAggregator;
use super::model::{ComparisonDataset, LevelRange, Series};

/// Most players a single comparison can hold
pub const MAX_PLAYERS: usize = 2;

/// Builds comparison datasets from a record store
pub struct ComparisonBuilder<S> {
    store: S,
}

impl<S: RecordStore> ComparisonBuilder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Resolve every token and aggregate each player's plays.
    ///
    /// All tokens must resolve before any statistics are computed; a single
    /// unknown identifier fails the whole comparison. Series come back in
    /// token order, and repeated tokens yield repeated series.
    pub fn build<T: AsRef<str>>(&self, tokens: &[T], filter: &PlayFilter) -> Result<ComparisonDataset> {
        if tokens.is_empty() || tokens.len() > MAX_PLAYERS {
            return Err(Error::Config(format!(
                "expected 1 to {} players, got {}",
                MAX_PLAYERS,
                tokens.len()
            )));
        }

        let resolver = EntityResolver::new(&self.store);
        let players = tokens
            .iter()
            .map(|token| resolver.resolve(token.as_ref()))
            .collect::<Result<Vec<Player>>>()?;

        let aggregator = StatsAggregator::new(&self.store);
        let series = players
            .into_iter()
            .map(|player| {
                let levels = aggregator.fetch(&player, filter)?;
                Ok(Series { player, levels })
            })
            .collect::<Result<Vec<Series>>>()?;

        let level_range = LevelRange::covering(
            series
                .iter()
                .flat_map(|s| s.levels.iter().map(|stats| stats.level)),
        );

        tracing::info!(
            players = series.len(),
            window = %filter.window,
            level_range = ?level_range,
            "Built comparison"
        );

        Ok(ComparisonDataset {
            series,
            level_range,
        })
    }
}
