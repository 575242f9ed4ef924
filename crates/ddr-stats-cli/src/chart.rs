//! Terminal chart of a player comparison

use std::time::Duration;

use ratatui::prelude::*;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use ddr_stats_core::{ChartMode, ComparisonDataset, LevelRange, SCORE_AXIS_MAX, SCORE_AXIS_MIN};

use crate::event;
use crate::theme::{self, ACCENT, SUBTLE, TEXT};
use crate::tui::TerminalSession;

const TITLE: &str = "DDR Flower Score Comparison";
const SCORE_TICK: f64 = 100_000.0;

/// Which statistic a plotted line shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stat {
    Max,
    Avg,
    Min,
}

impl Stat {
    fn label(&self) -> &'static str {
        match self {
            Stat::Max => "Max",
            Stat::Avg => "Avg",
            Stat::Min => "Min",
        }
    }

    fn for_mode(mode: ChartMode) -> &'static [Stat] {
        match mode {
            ChartMode::AverageOnly => &[Stat::Avg],
            ChartMode::Full => &[Stat::Max, Stat::Avg, Stat::Min],
        }
    }
}

/// One plotted line with its points
struct PlotLine {
    name: String,
    color: Color,
    points: Vec<(f64, f64)>,
}

/// Chart state: the dataset plus the active display mode
pub struct ChartView<'a> {
    dataset: &'a ComparisonDataset,
    mode: ChartMode,
    caption: String,
}

impl<'a> ChartView<'a> {
    pub fn new(dataset: &'a ComparisonDataset, mode: ChartMode) -> Self {
        Self {
            dataset,
            mode,
            caption: String::new(),
        }
    }

    /// Extra text shown in the status line
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn mode(&self) -> ChartMode {
        self.mode
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    fn lines(&self) -> Vec<PlotLine> {
        let mut lines = Vec::new();
        for (idx, series) in self.dataset.series.iter().enumerate() {
            let palette = theme::palette(idx);
            for stat in Stat::for_mode(self.mode) {
                let color = match stat {
                    Stat::Max => palette.max,
                    Stat::Avg => palette.avg,
                    Stat::Min => palette.min,
                };
                let points = series
                    .levels
                    .iter()
                    .map(|s| {
                        let score = match stat {
                            Stat::Max => s.max,
                            Stat::Avg => s.avg,
                            Stat::Min => s.min,
                        };
                        (f64::from(s.level), score)
                    })
                    .collect();
                lines.push(PlotLine {
                    name: format!("{} {}", series.player.name, stat.label()),
                    color,
                    points,
                });
            }
        }
        lines
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Chart
                Constraint::Length(1), // Status
            ])
            .split(frame.area());

        match self.dataset.level_range {
            Some(range) => self.render_chart(frame, chunks[0], range),
            None => self.render_empty(frame, chunks[0]),
        }

        let mut status = format!("q quit | m mode: {}", self.mode);
        if !self.caption.is_empty() {
            status.push_str(" | ");
            status.push_str(&self.caption);
        }
        let status = Paragraph::new(Span::styled(status, Style::default().fg(SUBTLE)))
            .alignment(Alignment::Center);
        frame.render_widget(status, chunks[1]);
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect, range: LevelRange) {
        let lines = self.lines();
        let datasets: Vec<Dataset> = lines
            .iter()
            .map(|line| {
                Dataset::default()
                    .name(line.name.clone())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(line.color))
                    .data(&line.points)
            })
            .collect();

        let (x_bounds, x_labels) = level_axis(range);
        let y_labels = score_labels();

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title(Span::styled(TITLE, Style::default().fg(ACCENT).bold()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(SUBTLE)),
            )
            .x_axis(
                Axis::default()
                    .title("Level")
                    .style(Style::default().fg(SUBTLE))
                    .bounds(x_bounds)
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title("Score")
                    .style(Style::default().fg(SUBTLE))
                    .bounds([SCORE_AXIS_MIN, SCORE_AXIS_MAX])
                    .labels(y_labels),
            );

        frame.render_widget(chart, area);
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let names: Vec<&str> = self
            .dataset
            .series
            .iter()
            .map(|s| s.player.name.as_str())
            .collect();
        let message = Paragraph::new(vec![
            Line::from(Span::styled(TITLE, Style::default().fg(ACCENT).bold())),
            Line::from(""),
            Line::from(Span::styled(
                format!("No qualifying plays for {}", names.join(" / ")),
                Style::default().fg(TEXT),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(SUBTLE)));
        frame.render_widget(message, area);
    }
}

/// Bounds and one label per integer level.
///
/// A single-level range is widened by one level on each side so the axis
/// has a non-zero span.
fn level_axis(range: LevelRange) -> ([f64; 2], Vec<String>) {
    let (lo, hi) = if range.min == range.max {
        (range.min - 1, range.max + 1)
    } else {
        (range.min, range.max)
    };
    let labels = (lo..=hi).map(|level| level.to_string()).collect();
    ([f64::from(lo), f64::from(hi)], labels)
}

fn score_labels() -> Vec<String> {
    let steps = ((SCORE_AXIS_MAX - SCORE_AXIS_MIN) / SCORE_TICK).round() as usize;
    (0..=steps)
        .map(|i| format!("{:.0}", SCORE_AXIS_MIN + i as f64 * SCORE_TICK))
        .collect()
}

/// Show the chart until the user quits
pub fn show(dataset: &ComparisonDataset, mode: ChartMode, caption: &str) -> anyhow::Result<()> {
    let mut session = TerminalSession::start()?;
    let mut view = ChartView::new(dataset, mode).with_caption(caption);

    loop {
        session.terminal().draw(|frame| view.render(frame))?;

        if let Some(key) = event::poll(Duration::from_millis(250))? {
            if event::is_quit(&key) {
                break;
            }
            if event::is_key(&key, 'm') {
                view.toggle_mode();
                tracing::debug!(mode = %view.mode(), "Chart mode changed");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddr_stats_core::{LevelStats, Player, Series};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn stats(level: i32, avg: f64) -> LevelStats {
        LevelStats {
            level,
            max: avg + 20_000.0,
            min: avg - 20_000.0,
            avg,
        }
    }

    fn dataset() -> ComparisonDataset {
        ComparisonDataset {
            series: vec![
                Series {
                    player: Player::new(7, "alice"),
                    levels: vec![stats(8, 900_000.0), stats(10, 850_000.0)],
                },
                Series {
                    player: Player::new(8, "bob"),
                    levels: vec![stats(9, 880_000.0)],
                },
            ],
            level_range: Some(LevelRange { min: 8, max: 10 }),
        }
    }

    fn render_to_string(view: &ChartView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| view.render(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut output = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                output.push_str(buffer[(x, y)].symbol());
            }
            output.push('\n');
        }
        output
    }

    #[test]
    fn test_full_mode_has_three_lines_per_player() {
        let data = dataset();
        let view = ChartView::new(&data, ChartMode::Full);
        let names: Vec<String> = view.lines().into_iter().map(|l| l.name).collect();

        assert_eq!(
            names,
            vec![
                "alice Max", "alice Avg", "alice Min", "bob Max", "bob Avg", "bob Min"
            ]
        );
    }

    #[test]
    fn test_average_only_mode() {
        let data = dataset();
        let mut view = ChartView::new(&data, ChartMode::AverageOnly);
        let lines = view.lines();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].points, vec![(8.0, 900_000.0), (10.0, 850_000.0)]);
        assert_eq!(lines[0].color, theme::palette(0).avg);
        assert_eq!(lines[1].color, theme::palette(1).avg);

        view.toggle_mode();
        assert_eq!(view.mode(), ChartMode::Full);
    }

    #[test]
    fn test_level_axis_ticks() {
        let (bounds, labels) = level_axis(LevelRange { min: 3, max: 7 });
        assert_eq!(bounds, [3.0, 7.0]);
        assert_eq!(labels, vec!["3", "4", "5", "6", "7"]);

        let (bounds, labels) = level_axis(LevelRange { min: 12, max: 12 });
        assert_eq!(bounds, [11.0, 13.0]);
        assert_eq!(labels, vec!["11", "12", "13"]);
    }

    #[test]
    fn test_score_labels() {
        assert_eq!(
            score_labels(),
            vec!["600000", "700000", "800000", "900000", "1000000"]
        );
    }

    #[test]
    fn test_render_chart() {
        let data = dataset();
        let view = ChartView::new(&data, ChartMode::Full).with_caption("all time");
        let output = render_to_string(&view);

        assert!(output.contains(TITLE));
        assert!(output.contains("Level"));
        assert!(output.contains("all time"));
    }

    #[test]
    fn test_render_empty_dataset() {
        let data = ComparisonDataset {
            series: vec![Series {
                player: Player::new(4, "newbie"),
                levels: Vec::new(),
            }],
            level_range: None,
        };
        let view = ChartView::new(&data, ChartMode::Full);
        let output = render_to_string(&view);

        assert!(output.contains("No qualifying plays for newbie"));
    }
}
