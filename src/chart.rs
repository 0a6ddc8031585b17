//! Equity chart artifacts.
//!
//! The bundled renderer draws the history with ratatui's `Chart` widget into
//! an off-screen [`Buffer`] and writes the cells out as UTF-8 text, headed by
//! the min / max / latest / change figures.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget};
use rust_decimal::prelude::ToPrimitive;
use tracing::info;

use crate::error::RenderError;
use crate::format::{format_percent, format_usd};
use crate::history::{EquitySample, EquityStats};

/// Fewest samples that make a line.
pub const MIN_CHART_SAMPLES: usize = 2;

/// Off-screen canvas size in cells.
const CHART_WIDTH: u16 = 120;
const CHART_HEIGHT: u16 = 32;

/// Give up looking for a free file name after this many suffixes.
const MAX_NAME_ATTEMPTS: usize = 1000;

/// Result of a render request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutcome {
    /// Artifact written at this path.
    Written(PathBuf),
    /// Not enough samples; nothing written.
    Skipped { samples: usize },
}

/// Turns an equity history snapshot into a persisted artifact.
pub trait ChartRenderer {
    fn render(&self, samples: &[EquitySample]) -> Result<ChartOutcome, RenderError>;
}

/// Writes `equity_chart_YYYYMMDD_HHMMSS.txt` files into a directory.
#[derive(Debug, Clone)]
pub struct TextChartRenderer {
    dir: PathBuf,
}

impl TextChartRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ChartRenderer for TextChartRenderer {
    fn render(&self, samples: &[EquitySample]) -> Result<ChartOutcome, RenderError> {
        let Some(stats) = EquityStats::from_samples(samples).filter(|s| s.samples >= MIN_CHART_SAMPLES)
        else {
            return Ok(ChartOutcome::Skipped {
                samples: samples.len(),
            });
        };

        let lines = draw_chart(samples, &stats);

        fs::create_dir_all(&self.dir)?;
        let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let (path, mut file) = create_unique(&self.dir, &stamp)?;

        let first = samples[0].timestamp;
        let last = samples[samples.len() - 1].timestamp;
        writeln!(
            file,
            "Account equity  {} -> {}  ({} samples)",
            fmt_time(first),
            fmt_time(last),
            stats.samples
        )?;
        writeln!(file, "{}", stats_line(&stats))?;
        for line in &lines {
            writeln!(file, "{line}")?;
        }
        file.flush()?;

        info!(path = %path.display(), samples = stats.samples, "chart written");
        Ok(ChartOutcome::Written(path))
    }
}

/// `Latest: $900.00  Min: $900.00  Max: $1,050.00  Change: -10.00%`
pub fn stats_line(stats: &EquityStats) -> String {
    let change = stats
        .percent_change
        .map(format_percent)
        .unwrap_or_else(|| "--".into());
    format!(
        "Latest: {}  Min: {}  Max: {}  Change: {}",
        format_usd(stats.latest),
        format_usd(stats.min),
        format_usd(stats.max),
        change
    )
}

/// Text rows of a ratatui buffer, trailing blanks trimmed.
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let width = buf.area.width.max(1) as usize;
    buf.content()
        .chunks(width)
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect()
}

/// Draw the equity line off-screen. X is hours since the first sample.
fn draw_chart(samples: &[EquitySample], stats: &EquityStats) -> Vec<String> {
    let origin = samples[0].timestamp;
    let points: Vec<(f64, f64)> = samples
        .iter()
        .map(|s| {
            let hours = (s.timestamp - origin).num_milliseconds() as f64 / 3_600_000.0;
            (hours, s.value.to_f64().unwrap_or(0.0))
        })
        .collect();

    let x_max = points.last().map(|p| p.0).unwrap_or(0.0).max(1.0 / 3600.0);
    let y_min = stats.min.to_f64().unwrap_or(0.0);
    let y_max = stats.max.to_f64().unwrap_or(0.0);
    let pad = if y_max > y_min {
        (y_max - y_min) * 0.05
    } else {
        y_max.abs().max(1.0) * 0.01
    };
    let (lo, hi) = (y_min - pad, y_max + pad);

    let last = samples[samples.len() - 1].timestamp;
    let dataset = Dataset::default()
        .name("equity")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", stats_line(stats))),
        )
        .x_axis(
            Axis::default()
                .title("hours")
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::raw(fmt_time(origin)),
                    Span::raw(fmt_time(last)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("USD")
                .bounds([lo, hi])
                .labels(vec![
                    Span::raw(format!("{lo:.2}")),
                    Span::raw(format!("{:.2}", (lo + hi) / 2.0)),
                    Span::raw(format!("{hi:.2}")),
                ]),
        );

    let area = Rect::new(0, 0, CHART_WIDTH, CHART_HEIGHT);
    let mut buf = Buffer::empty(area);
    chart.render(area, &mut buf);
    buffer_lines(&buf)
}

/// Open `equity_chart_<stamp>.txt`, or `_<n>` variants if taken.
fn create_unique(dir: &Path, stamp: &str) -> io::Result<(PathBuf, File)> {
    for n in 0..MAX_NAME_ATTEMPTS {
        let name = if n == 0 {
            format!("equity_chart_{stamp}.txt")
        } else {
            format!("equity_chart_{stamp}_{n}.txt")
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free chart file name for {stamp}"),
    ))
}

fn fmt_time(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}
