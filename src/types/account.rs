//! Account aggregate and the read-model projections returned by the account
//! endpoints.
//!
//! `Account` is the full view; `AccountSummary` drops the collections;
//! `AccountChangesState` carries only price-dependent fields; `AccountChanges`
//! lists what happened since a Transaction ID. All calculated values are
//! valid as of `last_transaction_id`.

use super::order::{DynamicOrderState, Order};
use super::position::{CalculatedPositionState, Position};
use super::primitives::{
    optional_time, AccountID, AccountUnits, Currency, DateTime, DecimalNumber, GuaranteedStopLossOrderMode,
    GuaranteedStopLossOrderMutability, TransactionID,
};
use super::trade::{CalculatedTradeState, TradeSummary};
use super::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// Entry returned by the account list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProperties {
    pub id: AccountID,
    #[serde(rename = "mt4AccountID", skip_serializing_if = "Option::is_none")]
    pub mt4_account_id: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuaranteedStopLossOrderParameters {
    pub mutability_market_open: GuaranteedStopLossOrderMutability,
    pub mutability_market_halted: GuaranteedStopLossOrderMutability,
}

/// Account state without its trade, position and order collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: AccountID,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub currency: Currency,
    #[serde(rename = "createdByUserID")]
    pub created_by_user_id: i64,
    pub created_time: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_stop_loss_order_parameters: Option<GuaranteedStopLossOrderParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_stop_loss_order_mode: Option<GuaranteedStopLossOrderMode>,
    /// `None` when the resettable P/L has never been reset.
    #[serde(
        rename = "resettablePLTime",
        default,
        deserialize_with = "optional_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub resettable_pl_time: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_rate: Option<DecimalNumber>,
    #[serde(default)]
    pub open_trade_count: i64,
    #[serde(default)]
    pub open_position_count: i64,
    #[serde(default)]
    pub pending_order_count: i64,
    #[serde(default)]
    pub hedging_enabled: bool,
    #[serde(rename = "unrealizedPL")]
    pub unrealized_pl: AccountUnits,
    #[serde(rename = "NAV")]
    pub nav: AccountUnits,
    pub margin_used: AccountUnits,
    pub margin_available: AccountUnits,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_value: Option<AccountUnits>,
    #[serde(rename = "marginCloseoutUnrealizedPL", skip_serializing_if = "Option::is_none")]
    pub margin_closeout_unrealized_pl: Option<AccountUnits>,
    #[serde(rename = "marginCloseoutNAV", skip_serializing_if = "Option::is_none")]
    pub margin_closeout_nav: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_closeout_margin_used: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_closeout_percent: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_closeout_position_value: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withdrawal_limit: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_call_margin_used: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_call_percent: Option<DecimalNumber>,
    pub balance: AccountUnits,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pl: Option<AccountUnits>,
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
    /// Present only while the account is in margin call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_call_enter_time: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_call_extension_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_margin_call_extension_time: Option<DateTime>,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

impl AccountSummary {
    pub fn in_margin_call(&self) -> bool {
        self.margin_call_enter_time.is_some()
    }
}

/// Full account state including trades, positions and pending orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(flatten)]
    pub summary: AccountSummary,
    #[serde(default)]
    pub trades: Vec<TradeSummary>,
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl Account {
    pub fn id(&self) -> &AccountID {
        &self.summary.id
    }

    pub fn last_transaction_id(&self) -> &TransactionID {
        &self.summary.last_transaction_id
    }
}

/// Price-dependent account state as of the changes response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountChangesState {
    #[serde(rename = "unrealizedPL", skip_serializing_if = "Option::is_none")]
    pub unrealized_pl: Option<AccountUnits>,
    #[serde(rename = "NAV", skip_serializing_if = "Option::is_none")]
    pub nav: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_used: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_available: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_value: Option<AccountUnits>,
    #[serde(rename = "marginCloseoutUnrealizedPL", skip_serializing_if = "Option::is_none")]
    pub margin_closeout_unrealized_pl: Option<AccountUnits>,
    #[serde(rename = "marginCloseoutNAV", skip_serializing_if = "Option::is_none")]
    pub margin_closeout_nav: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_closeout_margin_used: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_closeout_percent: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_closeout_position_value: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withdrawal_limit: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_call_margin_used: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_call_percent: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pl: Option<AccountUnits>,
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_call_enter_time: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_call_extension_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_margin_call_extension_time: Option<DateTime>,
    #[serde(default)]
    pub orders: Vec<DynamicOrderState>,
    #[serde(default)]
    pub trades: Vec<CalculatedTradeState>,
    #[serde(default)]
    pub positions: Vec<CalculatedPositionState>,
}

/// What changed in an account since a given Transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountChanges {
    #[serde(default)]
    pub orders_created: Vec<Order>,
    #[serde(default)]
    pub orders_cancelled: Vec<Order>,
    #[serde(default)]
    pub orders_filled: Vec<Order>,
    #[serde(default)]
    pub orders_triggered: Vec<Order>,
    #[serde(default)]
    pub trades_opened: Vec<TradeSummary>,
    #[serde(default)]
    pub trades_reduced: Vec<TradeSummary>,
    #[serde(default)]
    pub trades_closed: Vec<TradeSummary>,
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.orders_created.is_empty()
            && self.orders_cancelled.is_empty()
            && self.orders_filled.is_empty()
            && self.orders_triggered.is_empty()
            && self.trades_opened.is_empty()
            && self.trades_reduced.is_empty()
            && self.trades_closed.is_empty()
            && self.positions.is_empty()
            && self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account_json(resettable_pl_time: &str) -> String {
        format!(
            r#"{{
                "id": "101-004-1234567-001",
                "alias": "Primary",
                "currency": "USD",
                "createdByUserID": 1234567,
                "createdTime": "2023-01-10T08:00:00.000000000Z",
                "guaranteedStopLossOrderMode": "ALLOWED",
                "resettablePLTime": {},
                "marginRate": "0.02",
                "openTradeCount": 1,
                "openPositionCount": 1,
                "pendingOrderCount": 1,
                "hedgingEnabled": false,
                "unrealizedPL": "-0.1300",
                "NAV": "99999.8700",
                "marginUsed": "36.1700",
                "marginAvailable": "99963.7000",
                "balance": "100000.0000",
                "pl": "0.0000",
                "financing": "0.0000",
                "commission": "0.0000",
                "lastTransactionID": "6399",
                "trades": [],
                "positions": [],
                "orders": [{{
                    "id": "6398",
                    "createTime": "2024-03-01T10:00:01.000000000Z",
                    "state": "PENDING",
                    "type": "STOP_LOSS",
                    "tradeID": "6397",
                    "distance": "0.00200",
                    "timeInForce": "GTC"
                }}]
            }}"#,
            resettable_pl_time
        )
    }

    #[test]
    fn test_account_decode_with_orders() {
        let account: Account = serde_json::from_str(&account_json("\"0\"")).unwrap();
        assert_eq!(account.id().as_str(), "101-004-1234567-001");
        assert_eq!(account.summary.nav, dec!(99999.8700));
        assert_eq!(account.orders.len(), 1);
        assert_eq!(account.orders[0].trade_id().map(|t| t.as_str()), Some("6397"));
        assert_eq!(account.last_transaction_id().as_u64(), Some(6399));
        assert!(!account.summary.in_margin_call());
    }

    #[test]
    fn test_resettable_pl_time_zero_is_none() {
        let account: Account = serde_json::from_str(&account_json("\"0\"")).unwrap();
        assert!(account.summary.resettable_pl_time.is_none());

        let account: Account = serde_json::from_str(&account_json("\"2024-02-01T00:00:00Z\"")).unwrap();
        assert!(account.summary.resettable_pl_time.is_some());
    }

    #[test]
    fn test_account_changes_empty() {
        let changes: AccountChanges = serde_json::from_str("{}").unwrap();
        assert!(changes.is_empty());
    }
}
