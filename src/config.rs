//! Monitor loop configuration.

/// Tunables for the monitor loop.
///
/// Use [`Default::default()`] for the stock cadence (10 s polls, a chart
/// every 5 minutes).
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Sleep between the end of one tick and the start of the next, in milliseconds.
    pub poll_interval_ms: u64,
    /// Minimum time between two chart generations, in milliseconds.
    pub chart_interval_ms: u64,
    /// Status lines kept for the dashboard log panel.
    pub max_log_lines: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 10_000,
            chart_interval_ms: 5 * 60 * 1000, // 5 minutes
            max_log_lines: 50,
        }
    }
}
