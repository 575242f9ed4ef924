//! Per-level score statistics and player comparison
//!
//! Plays are grouped by chart level and summarized as max/min/average
//! scores. A comparison puts one or two players side by side on a level
//! axis covering every level either of them has data for.

mod aggregator;
mod comparison;
mod export;
mod model;

pub use aggregator::{summarize, StatsAggregator};
pub use comparison::{ComparisonBuilder, MAX_PLAYERS};
pub use export::{export_csv, export_json, ExportFormat};
pub use model::*;
