use crate::error::Result;
use crate::rest::InfoHttpClient;
use crate::types::*;

impl InfoHttpClient {
    /// POST /info `clearinghouseState` - Perp positions and margin summary for a user.
    pub async fn get_clearinghouse_state(&self, user: &str) -> Result<ClearinghouseState> {
        self.post_info(&InfoRequest::ClearinghouseState {
            user: user.to_string(),
        })
        .await
    }
}
