//! Response envelopes for each endpoint, including the bodies the server
//! returns alongside documented 4xx rejections.

use super::account::{Account, AccountChanges, AccountChangesState, AccountProperties, AccountSummary};
use super::instrument::Instrument;
use super::order::Order;
use super::position::Position;
use super::pricing::{Candlestick, CandlestickGranularity, ClientPrice, HomeConversions, OrderBook, PositionBook};
use super::primitives::{DateTime, InstrumentName, TransactionID};
use super::trade::Trade;
use super::transaction::{
    ClientConfigureRejectTransaction, ClientConfigureTransaction, GuaranteedStopLossOrderRejectTransaction,
    GuaranteedStopLossOrderTransaction, MarketOrderRejectTransaction, MarketOrderTransaction,
    OrderCancelRejectTransaction, OrderCancelTransaction, OrderClientExtensionsModifyRejectTransaction,
    OrderClientExtensionsModifyTransaction, OrderFillTransaction, StopLossOrderRejectTransaction,
    StopLossOrderTransaction, TakeProfitOrderRejectTransaction, TakeProfitOrderTransaction,
    TradeClientExtensionsModifyRejectTransaction, TradeClientExtensionsModifyTransaction,
    TrailingStopLossOrderRejectTransaction, TrailingStopLossOrderTransaction, Transaction, TransactionFilter,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// Accounts
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountsResponse {
    pub accounts: Vec<AccountProperties>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub account: Account,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummaryResponse {
    pub account: AccountSummary,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInstrumentsResponse {
    pub instruments: Vec<Instrument>,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureAccountResponse {
    pub client_configure_transaction: ClientConfigureTransaction,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

/// Changes since a cursor. Feed `last_transaction_id` back as the next
/// cursor to poll without gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountChangesResponse {
    pub changes: AccountChanges,
    pub state: AccountChangesState,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

// =============================================================================
// Instruments
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlesResponse {
    pub instrument: InstrumentName,
    pub granularity: CandlestickGranularity,
    pub candles: Vec<Candlestick>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestCandlesResponse {
    pub latest_candles: Vec<CandlesResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBookResponse {
    pub order_book: OrderBook,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionBookResponse {
    pub position_book: PositionBook,
}

// =============================================================================
// Orders
// =============================================================================

/// Result of creating an Order. The server may fill or cancel it within the
/// same request, so the transaction set is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_create_transaction: Transaction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_fill_transaction: Option<OrderFillTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_cancel_transaction: Option<OrderCancelTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_reissue_transaction: Option<Transaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_reissue_reject_transaction: Option<Transaction>,
    #[serde(rename = "relatedTransactionIDs", default)]
    pub related_transaction_ids: Vec<TransactionID>,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

impl CreateOrderResponse {
    pub fn is_filled(&self) -> bool {
        self.order_fill_transaction.is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        self.order_cancel_transaction.is_some()
    }
}

/// Result of replacing an Order: the old one is cancelled and a new one
/// created in the same batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceOrderResponse {
    pub order_cancel_transaction: OrderCancelTransaction,
    pub order_create_transaction: Transaction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_fill_transaction: Option<OrderFillTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_reissue_transaction: Option<Transaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_reissue_reject_transaction: Option<Transaction>,
    /// Set when the replacing Order itself was cancelled immediately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacing_order_cancel_transaction: Option<OrderCancelTransaction>,
    #[serde(rename = "relatedTransactionIDs", default)]
    pub related_transaction_ids: Vec<TransactionID>,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order: Order,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderResponse {
    pub order_cancel_transaction: OrderCancelTransaction,
    #[serde(rename = "relatedTransactionIDs", default)]
    pub related_transaction_ids: Vec<TransactionID>,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderClientExtensionsResponse {
    pub order_client_extensions_modify_transaction: OrderClientExtensionsModifyTransaction,
    #[serde(rename = "relatedTransactionIDs", default)]
    pub related_transaction_ids: Vec<TransactionID>,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

// =============================================================================
// Trades
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradesResponse {
    pub trades: Vec<Trade>,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeResponse {
    pub trade: Trade,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

/// Closing a Trade creates a Market Order that is filled or cancelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseTradeResponse {
    pub order_create_transaction: MarketOrderTransaction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_fill_transaction: Option<OrderFillTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_cancel_transaction: Option<OrderCancelTransaction>,
    #[serde(rename = "relatedTransactionIDs", default)]
    pub related_transaction_ids: Vec<TransactionID>,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeClientExtensionsResponse {
    pub trade_client_extensions_modify_transaction: TradeClientExtensionsModifyTransaction,
    #[serde(rename = "relatedTransactionIDs", default)]
    pub related_transaction_ids: Vec<TransactionID>,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

/// Result of setting or cancelling a Trade's dependent orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeOrdersResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit_order_cancel_transaction: Option<OrderCancelTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit_order_transaction: Option<TakeProfitOrderTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit_order_fill_transaction: Option<OrderFillTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit_order_created_cancel_transaction: Option<OrderCancelTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_order_cancel_transaction: Option<OrderCancelTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_order_transaction: Option<StopLossOrderTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_order_fill_transaction: Option<OrderFillTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_order_created_cancel_transaction: Option<OrderCancelTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_stop_loss_order_cancel_transaction: Option<OrderCancelTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_stop_loss_order_transaction: Option<TrailingStopLossOrderTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_stop_loss_order_cancel_transaction: Option<OrderCancelTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_stop_loss_order_transaction: Option<GuaranteedStopLossOrderTransaction>,
    #[serde(rename = "relatedTransactionIDs", default)]
    pub related_transaction_ids: Vec<TransactionID>,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

// =============================================================================
// Positions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionsResponse {
    pub positions: Vec<Position>,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionResponse {
    pub position: Position,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

/// Closing a Position creates one Market Order per side being closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosePositionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_order_create_transaction: Option<MarketOrderTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_order_fill_transaction: Option<OrderFillTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_order_cancel_transaction: Option<OrderCancelTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_order_create_transaction: Option<MarketOrderTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_order_fill_transaction: Option<OrderFillTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_order_cancel_transaction: Option<OrderCancelTransaction>,
    #[serde(rename = "relatedTransactionIDs", default)]
    pub related_transaction_ids: Vec<TransactionID>,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

// =============================================================================
// Transactions
// =============================================================================

/// Page URLs covering a time range of Transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPagesResponse {
    pub from: DateTime,
    pub to: DateTime,
    pub page_size: u32,
    #[serde(rename = "type", default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TransactionFilter>,
    pub count: u64,
    pub pages: Vec<String>,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub transaction: Transaction,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
}

// =============================================================================
// Pricing
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    pub prices: Vec<ClientPrice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub home_conversions: Vec<HomeConversions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime>,
}

// =============================================================================
// Rejection bodies
// =============================================================================

/// `errorCode`/`errorMessage` pair present on every error body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_message: String,
}

/// Fields shared by the rejection bodies of state-changing endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectDetails {
    #[serde(rename = "relatedTransactionIDs", default, skip_serializing_if = "Vec::is_empty")]
    pub related_transaction_ids: Vec<TransactionID>,
    #[serde(rename = "lastTransactionID", skip_serializing_if = "Option::is_none")]
    pub last_transaction_id: Option<TransactionID>,
    #[serde(flatten)]
    pub error: ApiErrorBody,
}

/// 400/404 body from creating an Order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderReject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_reject_transaction: Option<Transaction>,
    #[serde(flatten)]
    pub details: RejectDetails,
}

/// 400/404 body from replacing an Order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceOrderReject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_reject_transaction: Option<Transaction>,
    #[serde(flatten)]
    pub details: RejectDetails,
}

/// 404 body from cancelling an Order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderReject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_cancel_reject_transaction: Option<OrderCancelRejectTransaction>,
    #[serde(flatten)]
    pub details: RejectDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderClientExtensionsReject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_client_extensions_modify_reject_transaction: Option<OrderClientExtensionsModifyRejectTransaction>,
    #[serde(flatten)]
    pub details: RejectDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseTradeReject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_reject_transaction: Option<MarketOrderRejectTransaction>,
    #[serde(flatten)]
    pub details: RejectDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeClientExtensionsReject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_client_extensions_modify_reject_transaction: Option<TradeClientExtensionsModifyRejectTransaction>,
    #[serde(flatten)]
    pub details: RejectDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeOrdersReject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit_order_cancel_reject_transaction: Option<OrderCancelRejectTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit_order_reject_transaction: Option<TakeProfitOrderRejectTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_order_cancel_reject_transaction: Option<OrderCancelRejectTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_order_reject_transaction: Option<StopLossOrderRejectTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_stop_loss_order_cancel_reject_transaction: Option<OrderCancelRejectTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_stop_loss_order_reject_transaction: Option<TrailingStopLossOrderRejectTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_stop_loss_order_cancel_reject_transaction: Option<OrderCancelRejectTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_stop_loss_order_reject_transaction: Option<GuaranteedStopLossOrderRejectTransaction>,
    #[serde(flatten)]
    pub details: RejectDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosePositionReject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_order_reject_transaction: Option<MarketOrderRejectTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_order_reject_transaction: Option<MarketOrderRejectTransaction>,
    #[serde(flatten)]
    pub details: RejectDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountConfigurationReject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_configure_reject_transaction: Option<ClientConfigureRejectTransaction>,
    #[serde(flatten)]
    pub details: RejectDetails,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::transaction::TransactionRejectReason;

    #[test]
    fn test_create_order_reject_body() {
        let json = r#"{
            "orderRejectTransaction": {
                "id": "6372", "time": "2024-03-01T10:00:00Z", "userID": 1, "accountID": "101-004-1-001",
                "batchID": "6372", "type": "MARKET_ORDER_REJECT", "instrument": "EUR_USD", "units": "100",
                "timeInForce": "FOK", "positionFill": "DEFAULT", "reason": "CLIENT_ORDER",
                "rejectReason": "INSUFFICIENT_MARGIN"
            },
            "relatedTransactionIDs": ["6372"],
            "lastTransactionID": "6372",
            "errorCode": "INSUFFICIENT_MARGIN",
            "errorMessage": "Insufficient margin to open position"
        }"#;
        let body: CreateOrderReject = serde_json::from_str(json).unwrap();
        let transaction = body.order_reject_transaction.unwrap();
        assert_eq!(transaction.reject_reason(), Some(TransactionRejectReason::InsufficientMargin));
        assert_eq!(body.details.error.error_code.as_deref(), Some("INSUFFICIENT_MARGIN"));
        assert_eq!(body.details.last_transaction_id, Some(TransactionID::new("6372")));
    }

    #[test]
    fn test_error_body_without_code() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"errorMessage": "Invalid value specified for 'accountID'"}"#).unwrap();
        assert!(body.error_code.is_none());
        assert!(body.error_message.contains("accountID"));
    }
}
