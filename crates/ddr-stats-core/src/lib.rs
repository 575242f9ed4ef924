//! # ddr-stats-core
//!
//! Core library for comparing DDR score progression between players.
//!
//! This crate provides the foundational functionality for:
//! - Reading players and plays from a DDR play database (read-only)
//! - Resolving player identifiers given as account ids or display names
//! - Summarizing scores per chart level (max / min / average)
//! - Comparing one or two players on a shared level axis
//! - Persisting run settings between invocations
//!
//! ## Modules
//!
//! - [`config`] - Persisted settings and comparison queries
//! - [`error`] - Error types and Result alias
//! - [`filter`] - Grade exclusion and date windows
//! - [`resolve`] - Identifier resolution
//! - [`stats`] - Aggregation, comparison and export
//! - [`store`] - Play database access
//!
//! ## Example
//!
//! ```no_run
//! use ddr_stats_core::{ComparisonBuilder, Settings, SqliteStore};
//!
//! let query = Settings::load().query().expect("No database selected");
//! let store = SqliteStore::open(&query.db_path).expect("Failed to open database");
//!
//! let dataset = ComparisonBuilder::new(store)
//!     .build(&query.tokens, &query.filter)
//!     .expect("Comparison failed");
//!
//! for series in &dataset.series {
//!     println!("{}: {} levels", series.player, series.levels.len());
//! }
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod resolve;
pub mod stats;
pub mod store;

// Error types
pub use error::{Error, Result};

// Configuration
pub use config::{ComparisonQuery, Settings};

// Filtering
pub use filter::{PlayFilter, TimeWindow};

// Resolution
pub use resolve::{EntityResolver, Token};

// Store
pub use store::{Grade, MemoryStore, PlayRecord, Player, RecordStore, SqliteStore};

// Statistics
pub use stats::{
    export_csv, export_json, summarize, ChartMode, ComparisonBuilder, ComparisonDataset,
    ExportFormat, LevelRange, LevelStats, Series, StatsAggregator, MAX_PLAYERS, SCORE_AXIS_MAX,
    SCORE_AXIS_MIN,
};
