//! Export functionality for comparison datasets

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::model::ComparisonDataset;
use crate::error::{Error, Result};

/// Export a dataset to JSON format
pub fn export_json(dataset: &ComparisonDataset, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(dataset)
        .map_err(|e| Error::Other(format!("Failed to serialize comparison: {}", e)))?;

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(())
}

/// Export a dataset to CSV format, one row per player and level
pub fn export_csv(dataset: &ComparisonDataset, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| Error::Other(format!("Failed to create CSV file: {}", e)))?;

    writer
        .write_record(["player_id", "player_name", "level", "max", "min", "avg"])
        .map_err(|e| Error::Other(format!("CSV write error: {}", e)))?;

    for series in &dataset.series {
        for stats in &series.levels {
            writer
                .write_record([
                    series.player.id.to_string(),
                    series.player.name.clone(),
                    stats.level.to_string(),
                    stats.max.to_string(),
                    stats.min.to_string(),
                    stats.avg.to_string(),
                ])
                .map_err(|e| Error::Other(format!("CSV write error: {}", e)))?;
        }
    }

    writer
        .flush()
        .map_err(|e| Error::Other(format!("CSV flush error: {}", e)))?;

    Ok(())
}

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "JSON"),
            ExportFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl ExportFormat {
    /// Pick a format from a file extension; anything but `.csv` is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
            _ => ExportFormat::Json,
        }
    }

    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    /// Export a dataset using this format
    pub fn export(&self, dataset: &ComparisonDataset, path: &Path) -> Result<()> {
        match self {
            ExportFormat::Json => export_json(dataset, path),
            ExportFormat::Csv => export_csv(dataset, path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{LevelRange, LevelStats, Series};
    use crate::store::Player;
    use tempfile::TempDir;

    fn create_test_dataset() -> ComparisonDataset {
        ComparisonDataset {
            series: vec![
                Series {
                    player: Player::new(7, "alice"),
                    levels: vec![LevelStats {
                        level: 10,
                        max: 950_000.0,
                        min: 850_000.0,
                        avg: 900_000.0,
                    }],
                },
                Series {
                    player: Player::new(8, "bob"),
                    levels: vec![
                        LevelStats {
                            level: 9,
                            max: 990_000.0,
                            min: 990_000.0,
                            avg: 990_000.0,
                        },
                        LevelStats {
                            level: 11,
                            max: 700_000.0,
                            min: 650_000.0,
                            avg: 675_000.0,
                        },
                    ],
                },
            ],
            level_range: Some(LevelRange { min: 9, max: 11 }),
        }
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::Csv.extension(), "csv");
    }

    #[test]
    fn test_export_format_display() {
        assert_eq!(format!("{}", ExportFormat::Json), "JSON");
        assert_eq!(format!("{}", ExportFormat::Csv), "CSV");
    }

    #[test]
    fn test_export_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("out.csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("OUT.CSV")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("out.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("out")), ExportFormat::Json);
    }

    #[test]
    fn test_export_csv_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("comparison.csv");

        export_csv(&create_test_dataset(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "player_id,player_name,level,max,min,avg");
        assert_eq!(lines[1], "7,alice,10,950000,850000,900000");
        assert_eq!(lines[2], "8,bob,9,990000,990000,990000");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_export_json_structure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("comparison.json");

        ExportFormat::Json.export(&create_test_dataset(), &path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(value["level_range"]["min"], 9);
        assert_eq!(value["level_range"]["max"], 11);
        assert_eq!(value["series"][0]["player"]["name"], "alice");
        assert_eq!(value["series"][1]["levels"][1]["avg"], 675000.0);
    }
}
