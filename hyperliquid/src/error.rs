use thiserror::Error;

/// Failure of a single info query.
///
/// None of these are retried by the client; the caller decides whether the
/// next poll is the retry.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network unreachable, connection reset, or request timeout.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with an error payload or a non-success status.
    #[error("API error: {0}")]
    Api(String),

    /// The body could not be decoded as the expected shape.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl FetchError {
    /// Short, stable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(e) if e.is_timeout() => "timeout",
            FetchError::Transport(_) => "transport",
            FetchError::Api(_) => "api",
            FetchError::Malformed(_) => "malformed",
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
