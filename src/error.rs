use hyperliquid::FetchError;
use thiserror::Error;

/// A snapshot decoded fine but one of its numbers did not.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid {field} for {coin}: {value:?}")]
    InvalidNumber {
        field: &'static str,
        coin: String,
        value: String,
    },

    #[error("missing {field} for {coin}")]
    MissingField { field: &'static str, coin: String },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("chart io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("malformed account state: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Display(#[from] DisplayError),

    #[error("config error: {0}")]
    Config(String),
}

impl MonitorError {
    /// Short label for log fields and the status panel.
    pub fn kind(&self) -> &'static str {
        match self {
            MonitorError::Fetch(e) => e.kind(),
            MonitorError::Snapshot(_) => "malformed",
            MonitorError::Display(_) => "display",
            MonitorError::Config(_) => "config",
        }
    }

    /// The answer did not have the expected shape; the API contract may have moved.
    pub fn is_malformed(&self) -> bool {
        self.kind() == "malformed"
    }
}
