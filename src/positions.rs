//! Normalisation of a clearinghouse snapshot into open positions and equity.
//!
//! Sizes and prices arrive as decimal strings. They are parsed into
//! [`Decimal`] here; a value that does not parse is reported as a
//! [`SnapshotError`] rather than truncated or zeroed.

use std::str::FromStr;

use hyperliquid::{ClearinghouseState, RawPosition};
use rust_decimal::Decimal;

use crate::error::SnapshotError;

/// Side of an open position, taken from the sign of the raw size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Long,
    Short,
}

/// An open position. `size` is always strictly positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRecord {
    pub symbol: String,
    pub size: Decimal,
    pub direction: Direction,
    pub entry_price: Decimal,
    pub unrealized_pnl: Decimal,
}

/// Extract open positions in the order the service reported them.
///
/// Zero-size entries are dropped. A missing `unrealizedPnl` counts as zero.
///
/// # Errors
///
/// Returns [`SnapshotError::InvalidNumber`] for an unparseable numeric field
/// and [`SnapshotError::MissingField`] for an open position without `entryPx`.
pub fn extract_positions(state: &ClearinghouseState) -> Result<Vec<PositionRecord>, SnapshotError> {
    let Some(entries) = state.asset_positions.as_ref() else {
        return Ok(Vec::new());
    };

    let mut positions = Vec::with_capacity(entries.len());
    for entry in entries {
        if let Some(record) = to_record(&entry.position)? {
            positions.push(record);
        }
    }
    Ok(positions)
}

/// Total account value from `marginSummary.accountValue`, if reported.
pub fn account_value(state: &ClearinghouseState) -> Result<Option<Decimal>, SnapshotError> {
    let Some(raw) = state
        .margin_summary
        .as_ref()
        .and_then(|m| m.account_value.as_deref())
    else {
        return Ok(None);
    };
    parse_decimal("accountValue", "account", raw).map(Some)
}

fn to_record(raw: &RawPosition) -> Result<Option<PositionRecord>, SnapshotError> {
    let signed_size = parse_decimal("szi", &raw.coin, &raw.szi)?;
    if signed_size.is_zero() {
        return Ok(None);
    }

    let direction = if signed_size.is_sign_positive() {
        Direction::Long
    } else {
        Direction::Short
    };

    let entry_px = raw
        .entry_px
        .as_deref()
        .ok_or_else(|| SnapshotError::MissingField {
            field: "entryPx",
            coin: raw.coin.clone(),
        })?;
    let entry_price = parse_decimal("entryPx", &raw.coin, entry_px)?;

    let unrealized_pnl = match raw.unrealized_pnl.as_deref() {
        Some(pnl) => parse_decimal("unrealizedPnl", &raw.coin, pnl)?,
        None => Decimal::ZERO,
    };

    Ok(Some(PositionRecord {
        symbol: raw.coin.clone(),
        size: signed_size.abs(),
        direction,
        entry_price,
        unrealized_pnl,
    }))
}

/// Parse a decimal string, accepting scientific notation (`1.5e-3`).
fn parse_decimal(field: &'static str, coin: &str, value: &str) -> Result<Decimal, SnapshotError> {
    let trimmed = value.trim();
    let parsed = if trimmed.contains(['e', 'E']) {
        Decimal::from_scientific(trimmed)
    } else {
        Decimal::from_str(trimmed)
    };
    parsed.map_err(|_| SnapshotError::InvalidNumber {
        field,
        coin: coin.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn state(json: &str) -> ClearinghouseState {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_single_long_position() {
        let s = state(
            r#"{"assetPositions":[{"position":{"coin":"BTC","szi":"2.5","entryPx":"60000","unrealizedPnl":"150"}}]}"#,
        );
        let positions = extract_positions(&s).unwrap();
        assert_eq!(
            positions,
            vec![PositionRecord {
                symbol: "BTC".into(),
                size: dec!(2.5),
                direction: Direction::Long,
                entry_price: dec!(60000),
                unrealized_pnl: dec!(150),
            }]
        );
    }

    #[test]
    fn test_short_position_size_is_absolute() {
        let s = state(
            r#"{"assetPositions":[{"position":{"coin":"ETH","szi":"-10.25","entryPx":"3000.5","unrealizedPnl":"-42.1"}}]}"#,
        );
        let positions = extract_positions(&s).unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].direction, Direction::Short);
        assert_eq!(positions[0].size, dec!(10.25));
        assert_eq!(positions[0].unrealized_pnl, dec!(-42.1));
    }

    #[test]
    fn test_zero_size_filtered_and_order_kept() {
        let s = state(
            r#"{"assetPositions":[
                {"position":{"coin":"SOL","szi":"3","entryPx":"150"}},
                {"position":{"coin":"DOGE","szi":"0.0","entryPx":"0.1"}},
                {"position":{"coin":"ARB","szi":"-0.0"}},
                {"position":{"coin":"BTC","szi":"-0.01","entryPx":"61000"}}
            ]}"#,
        );
        let positions = extract_positions(&s).unwrap();
        let symbols: Vec<_> = positions.iter().map(|p| p.symbol.as_str()).collect();
        assert_eq!(symbols, ["SOL", "BTC"]);
        assert!(positions.iter().all(|p| p.size > Decimal::ZERO));
        assert_eq!(positions[0].direction, Direction::Long);
        assert_eq!(positions[1].direction, Direction::Short);
    }

    #[test]
    fn test_missing_unrealized_pnl_defaults_to_zero() {
        let s = state(r#"{"assetPositions":[{"position":{"coin":"SOL","szi":"1","entryPx":"150"}}]}"#);
        let positions = extract_positions(&s).unwrap();
        assert_eq!(positions[0].unrealized_pnl, Decimal::ZERO);
    }

    #[test]
    fn test_scientific_notation_size() {
        let s = state(r#"{"assetPositions":[{"position":{"coin":"PEPE","szi":"1.5e3","entryPx":"1e-5"}}]}"#);
        let positions = extract_positions(&s).unwrap();
        assert_eq!(positions[0].size, dec!(1500));
        assert_eq!(positions[0].entry_price, dec!(0.00001));
    }

    #[test]
    fn test_unparseable_size_is_an_error_not_zero() {
        let s = state(r#"{"assetPositions":[{"position":{"coin":"BTC","szi":"2.5x","entryPx":"60000"}}]}"#);
        match extract_positions(&s).unwrap_err() {
            SnapshotError::InvalidNumber { field, coin, value } => {
                assert_eq!(field, "szi");
                assert_eq!(coin, "BTC");
                assert_eq!(value, "2.5x");
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_pnl_is_an_error() {
        let s = state(
            r#"{"assetPositions":[{"position":{"coin":"BTC","szi":"1","entryPx":"60000","unrealizedPnl":"NaN"}}]}"#,
        );
        assert!(matches!(
            extract_positions(&s),
            Err(SnapshotError::InvalidNumber { field: "unrealizedPnl", .. })
        ));
    }

    #[test]
    fn test_open_position_without_entry_price() {
        let s = state(r#"{"assetPositions":[{"position":{"coin":"BTC","szi":"1"}}]}"#);
        assert!(matches!(
            extract_positions(&s),
            Err(SnapshotError::MissingField { field: "entryPx", .. })
        ));
    }

    #[test]
    fn test_absent_keys_mean_no_data() {
        let s = state("{}");
        assert!(extract_positions(&s).unwrap().is_empty());
        assert_eq!(account_value(&s).unwrap(), None);

        let s = state(r#"{"marginSummary":{"totalNtlPos":"0"}}"#);
        assert_eq!(account_value(&s).unwrap(), None);
    }

    #[test]
    fn test_account_value() {
        let s = state(r#"{"marginSummary":{"accountValue":"12345.67"}}"#);
        assert_eq!(account_value(&s).unwrap(), Some(dec!(12345.67)));

        let s = state(r#"{"marginSummary":{"accountValue":""}}"#);
        assert!(account_value(&s).is_err());
    }
}
