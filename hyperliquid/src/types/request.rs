use serde::Serialize;

/// Body of a POST to the info endpoint, tagged by `type`.
///
/// `ClearinghouseState { user }` serializes as
/// `{"type":"clearinghouseState","user":"0x..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InfoRequest {
    ClearinghouseState { user: String },
}
