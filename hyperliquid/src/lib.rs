pub mod client;
pub mod config;
pub mod error;
pub mod rest;
pub mod types;

// ---- Top-level re-exports for ergonomic usage ----

pub use client::Hyperliquid;
pub use config::HyperliquidConfig;
pub use error::{FetchError, Result};
pub use rest::InfoHttpClient;

// Requests
pub use types::InfoRequest;

// Account state
pub use types::{AssetPosition, ClearinghouseState, Leverage, MarginSummary, RawPosition};
