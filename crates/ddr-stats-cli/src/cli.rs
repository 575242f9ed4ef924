//! Command line handling
//!
//! Usage:
//!   ddr-stats [OPTIONS] [PLAYER1] [PLAYER2]
//!
//! Players are account ids or display names. Anything not given on the
//! command line is taken from the settings saved by the previous run.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use ddr_stats_core::{
    ChartMode, ComparisonBuilder, ComparisonDataset, ComparisonQuery, ExportFormat, Settings,
    SqliteStore, MAX_PLAYERS,
};

use crate::chart;

/// Where the comparison ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Output {
    /// Interactive terminal chart
    #[default]
    Chart,
    /// Plain per-level table on stdout
    Table,
    /// Dataset as JSON on stdout
    Json,
}

/// CLI options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub db: Option<PathBuf>,
    pub players: Vec<String>,
    pub chart_mode: Option<ChartMode>,
    pub all_time: bool,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub output: Output,
    pub export: Option<PathBuf>,
    pub save: bool,
    pub help: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            db: None,
            players: Vec::new(),
            chart_mode: None,
            all_time: false,
            from: None,
            to: None,
            output: Output::Chart,
            export: None,
            save: true,
            help: false,
        }
    }
}

impl CliOptions {
    /// Overlay these options on the settings from the previous run
    pub fn apply_to(&self, settings: &mut Settings) {
        self.apply_on(settings, Local::now().date_naive());
    }

    /// Overlay options; a window bound that is neither given nor saved
    /// defaults to `today`
    fn apply_on(&self, settings: &mut Settings, today: NaiveDate) {
        if let Some(ref db) = self.db {
            settings.db_path = db.to_string_lossy().into_owned();
        }

        if let Some(first) = self.players.first() {
            settings.last_f1 = first.clone();
            settings.last_f2 = self.players.get(1).cloned().unwrap_or_default();
        }

        if let Some(mode) = self.chart_mode {
            settings.avg_only = mode == ChartMode::AverageOnly;
        }

        if self.all_time {
            settings.all_time = true;
        } else if self.from.is_some() || self.to.is_some() {
            settings.all_time = false;
            settings.start = self.from.or(settings.start).or(Some(today));
            settings.end = self.to.or(settings.end).or(Some(today));
        }
    }
}

/// Parse CLI arguments (without the program name)
pub fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "--help" | "-h" => options.help = true,
            "--db" => options.db = Some(PathBuf::from(value_of(args, &mut i, "--db")?)),
            "--avg-only" => options.chart_mode = Some(ChartMode::AverageOnly),
            "--full" => options.chart_mode = Some(ChartMode::Full),
            "--all-time" => options.all_time = true,
            "--from" => options.from = Some(parse_date(value_of(args, &mut i, "--from")?)?),
            "--to" => options.to = Some(parse_date(value_of(args, &mut i, "--to")?)?),
            "--table" => options.output = Output::Table,
            "--json" => options.output = Output::Json,
            "--export" => {
                options.export = Some(PathBuf::from(value_of(args, &mut i, "--export")?))
            }
            "--no-save" => options.save = false,
            _ if arg.starts_with("--") => return Err(format!("Unknown option: {}", arg)),
            _ => options.players.push(arg.clone()),
        }
        i += 1;
    }

    if options.players.len() > MAX_PLAYERS {
        return Err(format!(
            "At most {} players can be compared, got {}",
            MAX_PLAYERS,
            options.players.len()
        ));
    }
    if options.all_time && (options.from.is_some() || options.to.is_some()) {
        return Err("--all-time cannot be combined with --from/--to".to_string());
    }

    Ok(options)
}

fn value_of<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} requires a value", flag))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD", s))
}

/// Run a comparison with the saved settings overlaid by `options`
pub fn run(options: &CliOptions) -> anyhow::Result<()> {
    let mut settings = Settings::load();
    options.apply_to(&mut settings);

    let query = settings.query()?;

    if options.save {
        if let Err(e) = settings.save() {
            tracing::warn!(error = %e, "Failed to save settings");
        }
    }

    let dataset = compare(&query)?;

    if let Some(ref path) = options.export {
        let format = ExportFormat::from_path(path);
        let path = export_path(path, format);
        format.export(&dataset, &path)?;
        eprintln!("Exported {} to {}", format, path.display());
    }

    match options.output {
        Output::Chart => chart::show(&dataset, query.chart_mode, &query.filter.window.to_string()),
        Output::Table => {
            print!("{}", format_table(&dataset, query.chart_mode));
            Ok(())
        }
        Output::Json => {
            println!("{}", serde_json::to_string_pretty(&dataset)?);
            Ok(())
        }
    }
}

/// Give an export path without an extension the format's extension
fn export_path(path: &Path, format: ExportFormat) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(format.extension())
    }
}

/// Resolve, fetch and merge the players of a query
pub fn compare(query: &ComparisonQuery) -> anyhow::Result<ComparisonDataset> {
    let store = SqliteStore::open(&query.db_path)?;
    let dataset = ComparisonBuilder::new(store).build(&query.tokens, &query.filter)?;
    Ok(dataset)
}

/// Render a dataset as a plain table, one row per level in the range
pub fn format_table(dataset: &ComparisonDataset, mode: ChartMode) -> String {
    const LEVEL_WIDTH: usize = 5;
    let cell_width = match mode {
        ChartMode::AverageOnly => 12,
        ChartMode::Full => 30,
    };

    let mut out = String::new();
    let Some(range) = dataset.level_range else {
        let names: Vec<&str> = dataset.series.iter().map(|s| s.player.name.as_str()).collect();
        let _ = writeln!(out, "No qualifying plays for {}", names.join(" / "));
        return out;
    };

    let _ = write!(out, "{:>LEVEL_WIDTH$}", "Level");
    for series in &dataset.series {
        let _ = write!(out, "  {:>cell_width$}", series.player.name);
    }
    out.push('\n');

    for level in range.levels() {
        let _ = write!(out, "{:>LEVEL_WIDTH$}", level);
        for series in &dataset.series {
            let cell = match (series.get(level), mode) {
                (None, _) => "-".to_string(),
                (Some(stats), ChartMode::AverageOnly) => format!("{:.0}", stats.avg),
                (Some(stats), ChartMode::Full) => {
                    format!("{:.0} / {:.0} / {:.0}", stats.max, stats.avg, stats.min)
                }
            };
            let _ = write!(out, "  {:>cell_width$}", cell);
        }
        out.push('\n');
    }

    out
}

/// Print CLI help
pub fn print_help() {
    println!("ddr-stats v{}", env!("CARGO_PKG_VERSION"));
    println!("Compare DDR flower score progression between players");
    println!();
    println!("USAGE:");
    println!("    ddr-stats [OPTIONS] [PLAYER1] [PLAYER2]");
    println!();
    println!("Players are account ids or display names. Missing values are");
    println!("taken from the previous run.");
    println!();
    println!("OPTIONS:");
    println!("    --db <path>             Play database file");
    println!("    --avg-only              Plot only the average score");
    println!("    --full                  Plot max, average and min scores");
    println!("    --all-time              Use every play regardless of date");
    println!("    --from <YYYY-MM-DD>     First day of the date window");
    println!("    --to <YYYY-MM-DD>       Last day of the date window");
    println!("    --table                 Print a table instead of the chart");
    println!("    --json                  Print the comparison as JSON");
    println!("    --export <path>         Write the comparison to a .json or .csv file");
    println!("    --no-save               Do not remember these settings");
    println!("    --help                  Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("    ddr-stats --db ddr.db alice bob");
    println!("    ddr-stats 1234 --from 2024-03-01 --to 2024-03-31 --table");
    println!("    ddr-stats --export progress.csv");
    println!();
    println!("Set RUST_LOG=debug for diagnostic output.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddr_stats_core::{Error, LevelRange, LevelStats, Player, Series, TimeWindow};
    use rusqlite::Connection;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_args_players_and_flags() {
        let options = parse_args(&args(&["--db", "ddr.db", "alice", "42", "--avg-only", "--table"]))
            .unwrap();

        assert_eq!(options.db, Some(PathBuf::from("ddr.db")));
        assert_eq!(options.players, vec!["alice", "42"]);
        assert_eq!(options.chart_mode, Some(ChartMode::AverageOnly));
        assert_eq!(options.output, Output::Table);
        assert!(options.save);
    }

    #[test]
    fn test_parse_args_window() {
        let options = parse_args(&args(&["--from", "2024-03-01", "--to", "2024-03-31"])).unwrap();
        assert_eq!(options.from, Some(date(2024, 3, 1)));
        assert_eq!(options.to, Some(date(2024, 3, 31)));

        assert!(parse_args(&args(&["--from", "03/01/2024"])).is_err());
        assert!(parse_args(&args(&["--to"])).is_err());
        assert!(parse_args(&args(&["--all-time", "--from", "2024-03-01"])).is_err());
    }

    #[test]
    fn test_parse_args_rejects_extra_players() {
        let err = parse_args(&args(&["a", "b", "c"])).unwrap_err();
        assert!(err.contains("At most 2"));
        assert!(parse_args(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn test_apply_replaces_players() {
        let mut settings = Settings {
            last_f1: "alice".to_string(),
            last_f2: "bob".to_string(),
            ..Settings::default()
        };

        CliOptions::default().apply_to(&mut settings);
        assert_eq!(settings.tokens(), vec!["alice", "bob"]);

        let options = parse_args(&args(&["carol"])).unwrap();
        options.apply_to(&mut settings);
        assert_eq!(settings.tokens(), vec!["carol"]);
    }

    #[test]
    fn test_apply_window_flags() {
        let mut settings = Settings::default();
        assert!(settings.all_time);

        parse_args(&args(&["--from", "2024-01-01", "--to", "2024-01-31"]))
            .unwrap()
            .apply_to(&mut settings);
        assert!(!settings.all_time);
        assert_eq!(settings.start, Some(date(2024, 1, 1)));
        assert_eq!(settings.end, Some(date(2024, 1, 31)));

        parse_args(&args(&["--all-time"])).unwrap().apply_to(&mut settings);
        assert!(settings.all_time);
        // Dates are kept for the next windowed run
        assert_eq!(settings.start, Some(date(2024, 1, 1)));

        parse_args(&args(&["--to", "2024-02-15"])).unwrap().apply_to(&mut settings);
        assert_eq!(
            settings.window(),
            TimeWindow::between(date(2024, 1, 1), date(2024, 2, 15))
        );
    }

    #[test]
    fn test_single_bound_defaults_other_to_today() {
        let today = date(2024, 6, 30);

        let mut settings = Settings::default();
        parse_args(&args(&["--from", "2024-03-01"]))
            .unwrap()
            .apply_on(&mut settings, today);
        assert!(!settings.all_time);
        assert_eq!(settings.window(), TimeWindow::between(date(2024, 3, 1), today));
        assert_eq!(settings.window().to_string(), "2024-03-01 to 2024-06-30");

        let mut settings = Settings::default();
        parse_args(&args(&["--to", "2024-06-01"]))
            .unwrap()
            .apply_on(&mut settings, today);
        assert_eq!(settings.window(), TimeWindow::between(today, date(2024, 6, 1)));
    }

    #[test]
    fn test_export_path_gets_extension() {
        assert_eq!(
            export_path(Path::new("out/progress"), ExportFormat::Json),
            PathBuf::from("out/progress.json")
        );
        assert_eq!(
            export_path(Path::new("progress.csv"), ExportFormat::Csv),
            PathBuf::from("progress.csv")
        );
    }

    #[test]
    fn test_compare_from_query() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("ddr.db");
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(
            "CREATE TABLE users (FlowerId INTEGER PRIMARY KEY, DdrName TEXT);
             CREATE TABLE DdrPlays (FlowerId INTEGER, Level INTEGER, Score INTEGER,
                                    Grade TEXT, Timestamp TEXT);
             INSERT INTO users VALUES (7, 'alice');
             INSERT INTO DdrPlays VALUES (7, 10, 900000, 'A', '2024-04-01 18:00:00');
             INSERT INTO DdrPlays VALUES (7, 10, 500000, 'E', '2024-04-01 18:05:00');",
        )
        .unwrap();
        drop(conn);

        let mut settings = Settings::default();
        parse_args(&args(&["--db", db_path.to_str().unwrap(), "alice"]))
            .unwrap()
            .apply_to(&mut settings);

        let dataset = compare(&settings.query().unwrap()).unwrap();
        assert_eq!(dataset.series[0].levels[0].avg, 900_000.0);
        assert_eq!(dataset.level_range, Some(LevelRange { min: 10, max: 10 }));
    }

    #[test]
    fn test_missing_database_is_reported() {
        let settings = Settings::default();
        let err = settings.query().unwrap_err();
        assert!(matches!(err, Error::NoStoreSelected));
        assert_eq!(err.to_string(), "No database selected");
    }

    #[test]
    fn test_format_table() {
        let dataset = ComparisonDataset {
            series: vec![
                Series {
                    player: Player::new(1, "a"),
                    levels: vec![LevelStats {
                        level: 3,
                        max: 910_000.0,
                        min: 890_000.0,
                        avg: 900_000.0,
                    }],
                },
                Series {
                    player: Player::new(2, "b"),
                    levels: vec![LevelStats {
                        level: 4,
                        max: 800_000.0,
                        min: 800_000.0,
                        avg: 800_000.0,
                    }],
                },
            ],
            level_range: Some(LevelRange { min: 3, max: 4 }),
        };

        let table = format_table(&dataset, ChartMode::AverageOnly);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Level"));
        assert!(lines[1].trim_start().starts_with('3'));
        assert!(lines[1].contains("900000"));
        assert!(lines[1].trim_end().ends_with('-'));
        assert!(lines[2].contains("800000"));

        let table = format_table(&dataset, ChartMode::Full);
        assert!(table.contains("910000 / 900000 / 890000"));
    }

    #[test]
    fn test_format_table_empty() {
        let dataset = ComparisonDataset {
            series: vec![Series {
                player: Player::new(4, "newbie"),
                levels: Vec::new(),
            }],
            level_range: None,
        };
        assert_eq!(
            format_table(&dataset, ChartMode::Full),
            "No qualifying plays for newbie\n"
        );
    }
}
