use serde::{Deserialize, Serialize};

/// Perp account state returned by the `clearinghouseState` query.
///
/// Numeric fields arrive as decimal strings and are kept that way; parsing
/// belongs to the consumer. Every top-level key is optional: an absent key
/// means the service had nothing to report, not that the answer is broken.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearinghouseState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_positions: Option<Vec<AssetPosition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_summary: Option<MarginSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_margin_summary: Option<MarginSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_maintenance_margin_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withdrawable: Option<String>,
    /// Server time in epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_ntl_pos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_raw_usd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_margin_used: Option<String>,
}

/// One entry of `assetPositions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPosition {
    /// Margin mode of the entry (`"oneWay"`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub position: RawPosition,
}

/// A position as reported by the service.
///
/// `szi` is the signed size: positive for long, negative for short.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPosition {
    pub coin: String,
    pub szi: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_px: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unrealized_pnl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidation_px: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_on_equity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leverage: Option<Leverage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leverage {
    /// `"cross"` or `"isolated"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub value: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_usd: Option<String>,
}
