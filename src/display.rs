//! Full-screen account dashboard using ratatui + crossterm.
//!
//! One frame per tick: header (address, last update), account value, open
//! positions table and a status panel with recent loop events.

use std::collections::VecDeque;
use std::io::{self, Stdout};

use chrono::{DateTime, Local, Utc};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use rust_decimal::Decimal;

use crate::error::DisplayError;
use crate::format::{
    direction_label, format_signed_usd, format_size, format_usd, shorten_address, signed_color,
};
use crate::positions::PositionRecord;

/// Everything a frame shows.
#[derive(Debug, Clone)]
pub struct DashboardView<'a> {
    pub address: &'a str,
    /// Completion time of the last successful poll.
    pub updated_at: Option<DateTime<Utc>>,
    pub account_value: Option<Decimal>,
    pub positions: &'a [PositionRecord],
    /// The last poll failed; the figures above are from an earlier one.
    pub stale: bool,
    pub next_update: DateTime<Utc>,
    pub log_lines: &'a VecDeque<String>,
}

/// Console surface redrawn once per tick.
pub trait Dashboard {
    fn render(&mut self, view: &DashboardView<'_>) -> Result<(), DisplayError>;
}

/// Alternate-screen terminal dashboard. The terminal is restored on drop.
pub struct TerminalDashboard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalDashboard {
    /// Enter the alternate screen.
    ///
    /// Raw mode stays off so Ctrl+C still raises SIGINT.
    pub fn new() -> Result<Self, DisplayError> {
        io::stdout().execute(EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// Leave the alternate screen and show the cursor again.
    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        let _ = self.terminal.show_cursor();
        let _ = io::stdout().execute(LeaveAlternateScreen);
    }
}

impl Drop for TerminalDashboard {
    fn drop(&mut self) {
        self.restore();
    }
}

impl Dashboard for TerminalDashboard {
    fn render(&mut self, view: &DashboardView<'_>) -> Result<(), DisplayError> {
        self.terminal.draw(|frame| draw_dashboard(frame, view))?;
        Ok(())
    }
}

/// Render the full frame.
pub fn draw_dashboard(frame: &mut Frame, view: &DashboardView<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(3), // account value
            Constraint::Min(5),    // positions
            Constraint::Length(8), // status
        ])
        .split(frame.area());

    render_header(frame, layout[0], view);
    render_value(frame, layout[1], view);
    render_positions(frame, layout[2], view.positions);
    render_status(frame, layout[3], view);
}

fn render_header(frame: &mut Frame, area: Rect, view: &DashboardView<'_>) {
    let updated = view
        .updated_at
        .map(fmt_local)
        .unwrap_or_else(|| "--".into());
    let lines = vec![
        Line::from(format!(" Account: {}", shorten_address(view.address))),
        Line::from(format!(" Last Update: {updated}")),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" HYPERLIQUID ACCOUNT MONITOR ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_value(frame: &mut Frame, area: Rect, view: &DashboardView<'_>) {
    let mut spans = vec![Span::raw(" Account Value: ")];
    match view.account_value {
        Some(v) => spans.push(Span::styled(format_usd(v), Style::default().bold())),
        None => spans.push(Span::styled("--", Style::default().fg(Color::Yellow))),
    }
    if view.stale {
        spans.push(Span::styled(
            "  (stale: last update failed)",
            Style::default().fg(Color::Yellow),
        ));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_positions(frame: &mut Frame, area: Rect, positions: &[PositionRecord]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Positions ");

    if positions.is_empty() {
        frame.render_widget(Paragraph::new(" No active positions").block(block), area);
        return;
    }

    let header = Row::new(["Symbol", "Direction", "Size", "Entry Price", "Unrealized P&L"])
        .style(Style::default().bold());

    let rows = positions.iter().map(|p| {
        let (label, color) = direction_label(p.direction);
        Row::new(vec![
            Cell::from(p.symbol.clone()),
            Cell::from(label).style(Style::default().fg(color)),
            Cell::from(format_size(p.size)),
            Cell::from(format_usd(p.entry_price)),
            Cell::from(format_signed_usd(p.unrealized_pnl))
                .style(Style::default().fg(signed_color(p.unrealized_pnl))),
        ])
    });

    let widths = [
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(15),
        Constraint::Length(15),
        Constraint::Length(18),
    ];
    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn render_status(frame: &mut Frame, area: Rect, view: &DashboardView<'_>) {
    let visible = area.height.saturating_sub(3) as usize;
    let mut lines = vec![Line::from(vec![
        Span::raw(format!(" Next update: {}", view.next_update.with_timezone(&Local).format("%H:%M:%S"))),
        Span::styled("  Press Ctrl+C to stop", Style::default().fg(Color::DarkGray)),
    ])];
    let skip = view.log_lines.len().saturating_sub(visible);
    lines.extend(
        view.log_lines
            .iter()
            .skip(skip)
            .map(|l| Line::from(format!(" {l}"))),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Status ");
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn fmt_local(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::buffer_lines;
    use crate::positions::Direction as Side;
    use chrono::TimeZone;
    use ratatui::backend::TestBackend;
    use rust_decimal_macros::dec;

    fn draw(view: &DashboardView<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw_dashboard(f, view)).unwrap();
        buffer_lines(terminal.backend().buffer()).join("\n")
    }

    fn view<'a>(positions: &'a [PositionRecord], log: &'a VecDeque<String>) -> DashboardView<'a> {
        let t = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        DashboardView {
            address: "0x1234567890abcdef1234567890abcdef12345678",
            updated_at: Some(t),
            account_value: Some(dec!(12345.67)),
            positions,
            stale: false,
            next_update: t,
            log_lines: log,
        }
    }

    #[test]
    fn test_frame_shows_positions_table() {
        let positions = vec![
            PositionRecord {
                symbol: "BTC".into(),
                size: dec!(2.5),
                direction: Side::Long,
                entry_price: dec!(60000),
                unrealized_pnl: dec!(150),
            },
            PositionRecord {
                symbol: "ETH".into(),
                size: dec!(10),
                direction: Side::Short,
                entry_price: dec!(3000.5),
                unrealized_pnl: dec!(-42.1),
            },
        ];
        let log = VecDeque::new();
        let text = draw(&view(&positions, &log));

        assert!(text.contains("HYPERLIQUID ACCOUNT MONITOR"));
        assert!(text.contains("0x12345678...345678"));
        assert!(text.contains("$12,345.67"));
        assert!(text.contains("▲ LONG"));
        assert!(text.contains("▼ SHORT"));
        assert!(text.contains("2.5000"));
        assert!(text.contains("$60,000.00"));
        assert!(text.contains("+$150.00"));
        assert!(text.contains("-$42.10"));
        assert!(!text.contains("stale"));
    }

    #[test]
    fn test_frame_without_positions_and_stale() {
        let log: VecDeque<String> = ["fetch failed (timeout): request timed out".to_string()]
            .into_iter()
            .collect();
        let mut v = view(&[], &log);
        v.stale = true;
        v.account_value = None;
        let text = draw(&v);

        assert!(text.contains("No active positions"));
        assert!(text.contains("Account Value: --"));
        assert!(text.contains("stale"));
        assert!(text.contains("fetch failed (timeout)"));
    }
}
