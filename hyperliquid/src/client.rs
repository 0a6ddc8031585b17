use crate::config::HyperliquidConfig;
use crate::error::Result;
use crate::rest::InfoHttpClient;
use crate::types::ClearinghouseState;

/// Read-only Hyperliquid client.
#[derive(Debug, Clone)]
pub struct Hyperliquid {
    /// HTTP client bound to the info endpoint.
    pub http_client: InfoHttpClient,
}

impl Hyperliquid {
    /// Create a client. No request is made until the first query.
    pub fn new(config: HyperliquidConfig) -> Result<Self> {
        let http_client = InfoHttpClient::new(&config.info_url, config.timeout)?;
        Ok(Self { http_client })
    }

    /// Get the perp account state (positions + margin summary) of `user`.
    pub async fn get_clearinghouse_state(&self, user: &str) -> Result<ClearinghouseState> {
        self.http_client.get_clearinghouse_state(user).await
    }
}
