use std::time::Duration;

/// Mainnet info endpoint.
pub const MAINNET_INFO_URL: &str = "https://api.hyperliquid.xyz/info";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the Hyperliquid info client.
#[derive(Debug, Clone)]
pub struct HyperliquidConfig {
    /// Full URL of the info endpoint (e.g. `https://api.hyperliquid.xyz/info`).
    pub info_url: String,
    /// Upper bound on a single request, connect through body.
    pub timeout: Duration,
}

impl HyperliquidConfig {
    /// Mainnet endpoint with the default timeout.
    pub fn mainnet() -> Self {
        Self {
            info_url: MAINNET_INFO_URL.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Default for HyperliquidConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}
