//! Positions: per-instrument aggregates of open Trades.

use super::primitives::{AccountUnits, DecimalNumber, InstrumentName, PriceValue, TradeID};
use serde::{Deserialize, Serialize};

/// One side (long or short) of a Position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSide {
    pub units: DecimalNumber,
    /// Absent when the side holds no units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_price: Option<PriceValue>,
    #[serde(rename = "tradeIDs", default, skip_serializing_if = "Vec::is_empty")]
    pub trade_ids: Vec<TradeID>,
    pub pl: AccountUnits,
    #[serde(rename = "unrealizedPL", skip_serializing_if = "Option::is_none")]
    pub unrealized_pl: Option<AccountUnits>,
    #[serde(rename = "resettablePL", skip_serializing_if = "Option::is_none")]
    pub resettable_pl: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financing: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_adjustment: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_execution_fees: Option<AccountUnits>,
}

impl PositionSide {
    pub fn is_flat(&self) -> bool {
        self.units.is_zero()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub instrument: InstrumentName,
    pub pl: AccountUnits,
    #[serde(rename = "unrealizedPL", skip_serializing_if = "Option::is_none")]
    pub unrealized_pl: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_used: Option<AccountUnits>,
    #[serde(rename = "resettablePL", skip_serializing_if = "Option::is_none")]
    pub resettable_pl: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financing: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_adjustment: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_execution_fees: Option<AccountUnits>,
    pub long: PositionSide,
    pub short: PositionSide,
}

impl Position {
    /// Long units plus (negative) short units.
    pub fn net_units(&self) -> DecimalNumber {
        self.long.units + self.short.units
    }

    /// Every Trade contributing to either side.
    pub fn trade_ids(&self) -> impl Iterator<Item = &TradeID> {
        self.long.trade_ids.iter().chain(self.short.trade_ids.iter())
    }
}

/// Price-dependent state of a Position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedPositionState {
    pub instrument: InstrumentName,
    #[serde(rename = "netUnrealizedPL")]
    pub net_unrealized_pl: AccountUnits,
    #[serde(rename = "longUnrealizedPL")]
    pub long_unrealized_pl: AccountUnits,
    #[serde(rename = "shortUnrealizedPL")]
    pub short_unrealized_pl: AccountUnits,
    pub margin_used: AccountUnits,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_position_sides() {
        let json = r#"{
            "instrument": "EUR_USD",
            "pl": "-12.5",
            "unrealizedPL": "3.2",
            "marginUsed": "72.34",
            "long": {"units": "2000", "averagePrice": "1.08511", "tradeIDs": ["6397", "6401"], "pl": "-12.5", "unrealizedPL": "3.2"},
            "short": {"units": "0", "pl": "0.0", "unrealizedPL": "0.0"}
        }"#;
        let position: Position = serde_json::from_str(json).unwrap();
        assert_eq!(position.net_units(), dec!(2000));
        assert!(position.short.is_flat());
        assert!(position.short.average_price.is_none());
        assert_eq!(position.trade_ids().count(), 2);
    }
}
