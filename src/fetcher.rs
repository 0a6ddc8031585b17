//! Seam between the monitor loop and the account-state source.

use std::future::Future;

use hyperliquid::{ClearinghouseState, FetchError, Hyperliquid};

/// One account-state query per call; no retries.
pub trait AccountStateFetcher {
    fn fetch(&self, address: &str)
        -> impl Future<Output = Result<ClearinghouseState, FetchError>>;
}

impl AccountStateFetcher for Hyperliquid {
    async fn fetch(&self, address: &str) -> Result<ClearinghouseState, FetchError> {
        self.get_clearinghouse_state(address).await
    }
}
