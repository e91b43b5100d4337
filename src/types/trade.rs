//! Trades and their summary/calculated projections.

use super::order::{GuaranteedStopLossOrder, StopLossOrder, TakeProfitOrder, TrailingStopLossOrder};
use super::primitives::{
    AccountUnits, ClientExtensions, DateTime, DecimalNumber, InstrumentName, OrderID, PriceValue, TradeID,
    TransactionID,
};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeState {
    Open,
    Closed,
    CloseWhenTradeable,
}

/// Trade state filter for trade list queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStateFilter {
    Open,
    Closed,
    CloseWhenTradeable,
    All,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradePL {
    Positive,
    Negative,
    Zero,
}

/// Fields shared by [`Trade`] and [`TradeSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeCore {
    pub id: TradeID,
    pub instrument: InstrumentName,
    pub price: PriceValue,
    pub open_time: DateTime,
    pub state: TradeState,
    pub initial_units: DecimalNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_margin_required: Option<AccountUnits>,
    /// Zero once the Trade is closed.
    pub current_units: DecimalNumber,
    #[serde(rename = "realizedPL")]
    pub realized_pl: AccountUnits,
    #[serde(rename = "unrealizedPL", skip_serializing_if = "Option::is_none")]
    pub unrealized_pl: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_used: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_close_price: Option<PriceValue>,
    #[serde(rename = "closingTransactionIDs", default, skip_serializing_if = "Vec::is_empty")]
    pub closing_transaction_ids: Vec<TransactionID>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financing: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_adjustment: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_time: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
}

/// A Trade with its dependent orders inlined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    #[serde(flatten)]
    pub core: TradeCore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit_order: Option<TakeProfitOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_order: Option<StopLossOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_stop_loss_order: Option<GuaranteedStopLossOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_stop_loss_order: Option<TrailingStopLossOrder>,
}

/// A Trade with its dependent orders referenced by ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSummary {
    #[serde(flatten)]
    pub core: TradeCore,
    #[serde(rename = "takeProfitOrderID", skip_serializing_if = "Option::is_none")]
    pub take_profit_order_id: Option<OrderID>,
    #[serde(rename = "stopLossOrderID", skip_serializing_if = "Option::is_none")]
    pub stop_loss_order_id: Option<OrderID>,
    #[serde(rename = "guaranteedStopLossOrderID", skip_serializing_if = "Option::is_none")]
    pub guaranteed_stop_loss_order_id: Option<OrderID>,
    #[serde(rename = "trailingStopLossOrderID", skip_serializing_if = "Option::is_none")]
    pub trailing_stop_loss_order_id: Option<OrderID>,
}

impl Trade {
    pub fn is_open(&self) -> bool {
        self.core.state == TradeState::Open
    }

    /// Reduce to the summary shape, keeping only dependent order IDs.
    pub fn summary(&self) -> TradeSummary {
        TradeSummary {
            core: self.core.clone(),
            take_profit_order_id: self.take_profit_order.as_ref().map(|o| o.base.id.clone()),
            stop_loss_order_id: self.stop_loss_order.as_ref().map(|o| o.base.id.clone()),
            guaranteed_stop_loss_order_id: self.guaranteed_stop_loss_order.as_ref().map(|o| o.base.id.clone()),
            trailing_stop_loss_order_id: self.trailing_stop_loss_order.as_ref().map(|o| o.base.id.clone()),
        }
    }
}

impl TradeSummary {
    /// Sign of the unrealized P/L, if known.
    pub fn unrealized_pl_sign(&self) -> Option<TradePL> {
        let pl = self.core.unrealized_pl?;
        Some(if pl.is_zero() {
            TradePL::Zero
        } else if pl.is_sign_negative() {
            TradePL::Negative
        } else {
            TradePL::Positive
        })
    }
}

/// Price-dependent state of an open Trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedTradeState {
    pub id: TradeID,
    #[serde(rename = "unrealizedPL")]
    pub unrealized_pl: AccountUnits,
    pub margin_used: AccountUnits,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TRADE_JSON: &str = r#"{
        "id": "6397",
        "instrument": "EUR_USD",
        "price": "1.08523",
        "openTime": "2024-03-01T10:00:01.000000000Z",
        "state": "OPEN",
        "initialUnits": "1000",
        "initialMarginRequired": "36.18",
        "currentUnits": "1000",
        "realizedPL": "0.0000",
        "unrealizedPL": "-0.1300",
        "marginUsed": "36.1700",
        "financing": "0.0000",
        "dividendAdjustment": "0.0000",
        "takeProfitOrder": {
            "id": "6398",
            "createTime": "2024-03-01T10:00:01.000000000Z",
            "state": "PENDING",
            "type": "TAKE_PROFIT",
            "tradeID": "6397",
            "price": "1.09000",
            "timeInForce": "GTC",
            "triggerCondition": "DEFAULT"
        }
    }"#;

    #[test]
    fn test_trade_with_dependent_order() {
        let trade: Trade = serde_json::from_str(TRADE_JSON).unwrap();
        assert!(trade.is_open());
        let tp = trade.take_profit_order.as_ref().unwrap();
        assert_eq!(tp.trade_id, trade.core.id);
        assert!(trade.stop_loss_order.is_none());
        assert_eq!(trade.core.unrealized_pl, Some(dec!(-0.1300)));
    }

    #[test]
    fn test_trade_summary_projection() {
        let trade: Trade = serde_json::from_str(TRADE_JSON).unwrap();
        let summary = trade.summary();
        assert_eq!(summary.take_profit_order_id, Some(OrderID::new("6398")));
        assert!(summary.stop_loss_order_id.is_none());
        assert_eq!(summary.unrealized_pl_sign(), Some(TradePL::Negative));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["takeProfitOrderID"], "6398");
        assert!(json.get("stopLossOrderID").is_none());
    }
}
