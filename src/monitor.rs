//! Account monitor loop.
//!
//! A single task drives every step: poll the account state, extract
//! positions, record equity, hand a copy of the history to the chart
//! renderer when the chart timer has elapsed, and redraw the dashboard.
//! Ticks never overlap; the only suspension point besides the fetch itself
//! is the sleep between ticks, which races the cancellation token.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Utc};
use rust_decimal::Decimal;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::chart::{ChartOutcome, ChartRenderer, MIN_CHART_SAMPLES};
use crate::clock::SessionClock;
use crate::config::MonitorConfig;
use crate::display::{Dashboard, DashboardView};
use crate::error::MonitorError;
use crate::fetcher::AccountStateFetcher;
use crate::history::{EquityHistory, EquitySample};
use crate::positions::{account_value, extract_positions, PositionRecord};

/// Where the loop is within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Polling,
    Rendering,
    Stopped,
}

/// Counters for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorReport {
    pub ticks: u64,
    pub failed_ticks: u64,
    pub charts_written: u64,
}

/// Data derived from one successful poll.
struct AccountUpdate {
    positions: Vec<PositionRecord>,
    account_value: Option<Decimal>,
}

/// What the dashboard currently shows.
#[derive(Default)]
struct Screen {
    positions: Vec<PositionRecord>,
    account_value: Option<Decimal>,
    updated_at: Option<DateTime<Utc>>,
    stale: bool,
    log_lines: VecDeque<String>,
}

/// Polls one account on a fixed cadence until cancelled.
pub struct MonitorLoop<F, D, R> {
    config: MonitorConfig,
    address: String,
    fetcher: F,
    dashboard: D,
    renderer: R,
    history: EquityHistory,
    clock: SessionClock,
    state: LoopState,
    last_chart: Instant,
    screen: Screen,
    report: MonitorReport,
}

impl<F, D, R> MonitorLoop<F, D, R>
where
    F: AccountStateFetcher,
    D: Dashboard,
    R: ChartRenderer,
{
    pub fn new(
        config: MonitorConfig,
        address: impl Into<String>,
        fetcher: F,
        dashboard: D,
        renderer: R,
    ) -> Self {
        Self {
            config,
            address: address.into(),
            fetcher,
            dashboard,
            renderer,
            history: EquityHistory::new(),
            clock: SessionClock::start(),
            state: LoopState::Idle,
            last_chart: Instant::now(),
            screen: Screen::default(),
            report: MonitorReport::default(),
        }
    }

    /// Replace the session clock (sample timestamps are read from it).
    pub fn with_clock(mut self, clock: SessionClock) -> Self {
        self.clock = clock;
        self
    }

    /// Start from a custom (usually empty) history, e.g. a shorter retention.
    pub fn with_history(mut self, history: EquityHistory) -> Self {
        self.history = history;
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn history(&self) -> &EquityHistory {
        &self.history
    }

    /// Run ticks until `cancel` fires, then flush a final chart.
    ///
    /// The first tick starts immediately. Cancellation is observed between
    /// ticks and during the sleep; an in-flight fetch is left to finish or
    /// time out.
    pub async fn run(&mut self, cancel: CancellationToken) -> MonitorReport {
        let poll_interval = Duration::from_millis(self.config.poll_interval_ms);

        info!(
            address = %self.address,
            poll_interval_ms = self.config.poll_interval_ms,
            chart_interval_ms = self.config.chart_interval_ms,
            "monitor starting"
        );

        self.last_chart = Instant::now();

        while !cancel.is_cancelled() {
            self.tick().await;

            tokio::select! {
                _ = time::sleep(poll_interval) => {}
                _ = cancel.cancelled() => break,
            }
        }

        self.stop();
        self.report.clone()
    }

    /// One poll / record cycle, then the chart if it is due, then a redraw.
    ///
    /// A failed poll is logged and shown on the dashboard; it never ends the
    /// loop.
    pub async fn tick(&mut self) {
        self.report.ticks += 1;
        self.transition(LoopState::Polling);

        match self.poll().await {
            Ok(update) => self.apply(update),
            Err(e) => self.record_failure(&e),
        }

        self.transition(LoopState::Rendering);
        // Chart first so this frame's status panel shows its outcome.
        if self.last_chart.elapsed() >= Duration::from_millis(self.config.chart_interval_ms) {
            self.generate_chart();
            self.last_chart = Instant::now();
        }
        self.render_dashboard();
        self.transition(LoopState::Idle);
    }

    async fn poll(&self) -> Result<AccountUpdate, MonitorError> {
        let state = self.fetcher.fetch(&self.address).await?;
        let positions = extract_positions(&state)?;
        let account_value = account_value(&state)?;
        Ok(AccountUpdate {
            positions,
            account_value,
        })
    }

    fn apply(&mut self, update: AccountUpdate) {
        let now = self.clock.now();

        match update.account_value {
            Some(value) => self.history.append(EquitySample {
                timestamp: now,
                value,
            }),
            None => debug!("snapshot has no account value, equity sample skipped"),
        }

        debug!(
            positions = update.positions.len(),
            account_value = ?update.account_value,
            samples = self.history.len(),
            "poll ok"
        );

        self.screen.positions = update.positions;
        self.screen.account_value = update.account_value;
        self.screen.updated_at = Some(now);
        self.screen.stale = false;
    }

    fn record_failure(&mut self, err: &MonitorError) {
        self.report.failed_ticks += 1;
        if err.is_malformed() {
            error!(kind = err.kind(), error = %err, "unexpected account state shape, tick skipped");
        } else {
            warn!(kind = err.kind(), error = %err, "account state fetch failed");
        }
        self.screen.stale = true;
        self.push_log(format!("fetch failed ({}): {err}", err.kind()));
    }

    fn render_dashboard(&mut self) {
        let now = self.clock.now();
        let next_update = i64::try_from(self.config.poll_interval_ms)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .and_then(|delay| now.checked_add_signed(delay))
            .unwrap_or(now);
        let view = DashboardView {
            address: &self.address,
            updated_at: self.screen.updated_at,
            account_value: self.screen.account_value,
            positions: &self.screen.positions,
            stale: self.screen.stale,
            next_update,
            log_lines: &self.screen.log_lines,
        };
        if let Err(e) = self.dashboard.render(&view) {
            warn!(error = %e, "dashboard render failed");
        }
    }

    fn generate_chart(&mut self) {
        let samples = self.history.snapshot();
        match self.renderer.render(&samples) {
            Ok(ChartOutcome::Written(path)) => {
                self.report.charts_written += 1;
                self.push_log(format!("chart saved: {}", path.display()));
            }
            Ok(ChartOutcome::Skipped { samples }) => {
                info!(samples, min = MIN_CHART_SAMPLES, "chart skipped, not enough samples");
                self.push_log(format!("chart skipped: {samples} sample(s)"));
            }
            Err(e) => {
                error!(error = %e, "chart render failed");
                self.push_log(format!("chart failed: {e}"));
            }
        }
    }

    fn stop(&mut self) {
        self.transition(LoopState::Stopped);
        if !self.history.is_empty() {
            self.generate_chart();
        }
        info!(
            ticks = self.report.ticks,
            failed_ticks = self.report.failed_ticks,
            charts_written = self.report.charts_written,
            "monitor stopped"
        );
    }

    fn transition(&mut self, next: LoopState) {
        debug!(from = ?self.state, to = ?next, "state");
        self.state = next;
    }

    fn push_log(&mut self, line: String) {
        let stamp = self.clock.now().with_timezone(&Local).format("%H:%M:%S");
        self.screen.log_lines.push_back(format!("{stamp} {line}"));
        while self.screen.log_lines.len() > self.config.max_log_lines {
            self.screen.log_lines.pop_front();
        }
    }
}
