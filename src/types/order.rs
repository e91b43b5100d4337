//! Orders: the nine order variants and the records they share.

use super::primitives::{
    ClientExtensions, ClientID, CloseUnits, DateTime, DecimalNumber, InstrumentName, OnFillOrders, OrderID,
    OrderPositionFill, OrderTriggerCondition, PriceValue, TimeInForce, TradeID, TransactionID,
};
use crate::decode;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The `type` discriminant of an Order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Market,
    Limit,
    Stop,
    MarketIfTouched,
    TakeProfit,
    StopLoss,
    GuaranteedStopLoss,
    TrailingStopLoss,
    FixedPrice,
}

/// Order types that can sit pending and be cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CancellableOrderType {
    Limit,
    Stop,
    MarketIfTouched,
    TakeProfit,
    StopLoss,
    GuaranteedStopLoss,
    TrailingStopLoss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    Pending,
    Filled,
    Triggered,
    Cancelled,
}

impl OrderState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderState::Filled | OrderState::Cancelled)
    }
}

/// Order state filter for order list queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStateFilter {
    Pending,
    Filled,
    Triggered,
    Cancelled,
    All,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketOrderMarginCloseoutReason {
    MarginCheckViolation,
    RegulatoryMarginCallViolation,
    RegulatoryMarginCheckViolation,
}

/// Fields every Order carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBase {
    /// Server-assigned Order ID, unique within the account.
    pub id: OrderID,
    /// When the Order was created.
    pub create_time: DateTime,
    /// Current state of the Order.
    pub state: OrderState,
    /// Client-attached metadata. Only present if the client set any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
    /// Which Order variant this is.
    #[serde(rename = "type")]
    pub kind: OrderType,
}

/// Fill and cancel bookkeeping. The fill fields are only present once the
/// Order is FILLED and the cancel fields only once it is CANCELLED.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderLifecycle {
    /// The ORDER_FILL that filled this Order. Only present when FILLED.
    #[serde(rename = "fillingTransactionID", skip_serializing_if = "Option::is_none")]
    pub filling_transaction_id: Option<TransactionID>,
    /// Only present when FILLED.
    #[serde(rename = "filledTime", skip_serializing_if = "Option::is_none")]
    pub filled_time: Option<DateTime>,
    /// Trade opened by the fill, if it opened one.
    #[serde(rename = "tradeOpenedID", skip_serializing_if = "Option::is_none")]
    pub trade_opened_id: Option<TradeID>,
    /// Trade reduced by the fill, if it reduced one.
    #[serde(rename = "tradeReducedID", skip_serializing_if = "Option::is_none")]
    pub trade_reduced_id: Option<TradeID>,
    /// Trades closed by the fill. Empty unless the fill closed Trades.
    #[serde(rename = "tradeClosedIDs", default, skip_serializing_if = "Vec::is_empty")]
    pub trade_closed_ids: Vec<TradeID>,
    /// The ORDER_CANCEL that cancelled this Order. Only present when CANCELLED.
    #[serde(rename = "cancellingTransactionID", skip_serializing_if = "Option::is_none")]
    pub cancelling_transaction_id: Option<TransactionID>,
    /// Only present when CANCELLED.
    #[serde(rename = "cancelledTime", skip_serializing_if = "Option::is_none")]
    pub cancelled_time: Option<DateTime>,
}

/// Replacement links for Orders that can be replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderReplacement {
    /// The Order this one replaced. Only present if it was created by a replace.
    #[serde(rename = "replacesOrderID", skip_serializing_if = "Option::is_none")]
    pub replaces_order_id: Option<OrderID>,
    /// The Order that replaced this one. Only present once it has been replaced.
    #[serde(rename = "replacedByOrderID", skip_serializing_if = "Option::is_none")]
    pub replaced_by_order_id: Option<OrderID>,
}

/// Instructs a Market Order to close (part of) a specific Trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOrderTradeClose {
    /// Trade to close.
    #[serde(rename = "tradeID")]
    pub trade_id: TradeID,
    /// Client ID of the Trade, if it has one.
    #[serde(rename = "clientTradeID", skip_serializing_if = "Option::is_none")]
    pub client_trade_id: Option<ClientID>,
    /// How much of the Trade to close.
    pub units: CloseUnits,
}

/// Instructs a Market Order to close (part of) one side of a Position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOrderPositionCloseout {
    pub instrument: InstrumentName,
    pub units: CloseUnits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOrderMarginCloseout {
    pub reason: MarketOrderMarginCloseoutReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOrderDelayedTradeClose {
    #[serde(rename = "tradeID")]
    pub trade_id: TradeID,
    #[serde(rename = "clientTradeID", skip_serializing_if = "Option::is_none")]
    pub client_trade_id: Option<ClientID>,
    /// The DELAYED_TRADE_CLOSURE that caused this close.
    #[serde(rename = "sourceTransactionID")]
    pub source_transaction_id: TransactionID,
}

/// Fills immediately at the current market price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOrder {
    #[serde(flatten)]
    pub base: OrderBase,
    /// Instrument to trade.
    pub instrument: InstrumentName,
    /// Positive for a long Order, negative for a short one.
    pub units: DecimalNumber,
    /// FOK or IOC.
    pub time_in_force: TimeInForce,
    /// Worst price the Order may fill at. Only present if the client set one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_bound: Option<PriceValue>,
    #[serde(default)]
    pub position_fill: OrderPositionFill,
    /// Only present if the Order was created to close a Trade.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_close: Option<MarketOrderTradeClose>,
    /// Only present if the Order was created to close out the long side of a Position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_position_closeout: Option<MarketOrderPositionCloseout>,
    /// Only present if the Order was created to close out the short side of a Position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_position_closeout: Option<MarketOrderPositionCloseout>,
    /// Only present if the Order was created by a margin closeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_closeout: Option<MarketOrderMarginCloseout>,
    /// Only present if the Order was created for a delayed Trade close.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delayed_trade_close: Option<MarketOrderDelayedTradeClose>,
    #[serde(flatten)]
    pub on_fill: OnFillOrders,
    #[serde(flatten)]
    pub lifecycle: OrderLifecycle,
}

/// Created administratively and filled at a fixed price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedPriceOrder {
    #[serde(flatten)]
    pub base: OrderBase,
    pub instrument: InstrumentName,
    pub units: DecimalNumber,
    /// Price the Order is filled at.
    pub price: PriceValue,
    #[serde(default)]
    pub position_fill: OrderPositionFill,
    /// State of the Trade the fill creates, as described by the server.
    pub trade_state: String,
    #[serde(flatten)]
    pub on_fill: OnFillOrders,
    #[serde(flatten)]
    pub lifecycle: OrderLifecycle,
}

/// Fills at `price` or better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitOrder {
    #[serde(flatten)]
    pub base: OrderBase,
    pub instrument: InstrumentName,
    pub units: DecimalNumber,
    /// Fill at this price or better.
    pub price: PriceValue,
    pub time_in_force: TimeInForce,
    /// Expiry. Only present when `time_in_force` is GTD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(default)]
    pub position_fill: OrderPositionFill,
    #[serde(default)]
    pub trigger_condition: OrderTriggerCondition,
    #[serde(flatten)]
    pub on_fill: OnFillOrders,
    #[serde(flatten)]
    pub lifecycle: OrderLifecycle,
    #[serde(flatten)]
    pub replacement: OrderReplacement,
}

/// Fills at `price` or worse, bounded by `priceBound`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopOrder {
    #[serde(flatten)]
    pub base: OrderBase,
    pub instrument: InstrumentName,
    pub units: DecimalNumber,
    /// Trigger price.
    pub price: PriceValue,
    /// Worst price the Order may fill at once triggered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_bound: Option<PriceValue>,
    pub time_in_force: TimeInForce,
    /// Expiry. Only present when `time_in_force` is GTD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(default)]
    pub position_fill: OrderPositionFill,
    #[serde(default)]
    pub trigger_condition: OrderTriggerCondition,
    #[serde(flatten)]
    pub on_fill: OnFillOrders,
    #[serde(flatten)]
    pub lifecycle: OrderLifecycle,
    #[serde(flatten)]
    pub replacement: OrderReplacement,
}

/// Triggers when the market crosses `price` from the side of
/// `initialMarketPrice`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketIfTouchedOrder {
    #[serde(flatten)]
    pub base: OrderBase,
    pub instrument: InstrumentName,
    pub units: DecimalNumber,
    /// Trigger price.
    pub price: PriceValue,
    /// Worst price the Order may fill at once triggered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_bound: Option<PriceValue>,
    pub time_in_force: TimeInForce,
    /// Expiry. Only present when `time_in_force` is GTD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(default)]
    pub position_fill: OrderPositionFill,
    #[serde(default)]
    pub trigger_condition: OrderTriggerCondition,
    /// Market price when the Order was created. Set by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_market_price: Option<PriceValue>,
    #[serde(flatten)]
    pub on_fill: OnFillOrders,
    #[serde(flatten)]
    pub lifecycle: OrderLifecycle,
    #[serde(flatten)]
    pub replacement: OrderReplacement,
}

/// Closes a Trade when the price reaches `price` in its favour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeProfitOrder {
    #[serde(flatten)]
    pub base: OrderBase,
    /// Trade this Order closes.
    #[serde(rename = "tradeID")]
    pub trade_id: TradeID,
    /// Client ID of the Trade, if it has one.
    #[serde(rename = "clientTradeID", skip_serializing_if = "Option::is_none")]
    pub client_trade_id: Option<ClientID>,
    pub price: PriceValue,
    pub time_in_force: TimeInForce,
    /// Expiry. Only present when `time_in_force` is GTD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(default)]
    pub trigger_condition: OrderTriggerCondition,
    #[serde(flatten)]
    pub lifecycle: OrderLifecycle,
    #[serde(flatten)]
    pub replacement: OrderReplacement,
}

/// Closes a Trade when the price moves against it to `price`, or by
/// `distance` from the fill price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopLossOrder {
    #[serde(flatten)]
    pub base: OrderBase,
    /// Trade this Order closes.
    #[serde(rename = "tradeID")]
    pub trade_id: TradeID,
    #[serde(rename = "clientTradeID", skip_serializing_if = "Option::is_none")]
    pub client_trade_id: Option<ClientID>,
    /// Trigger price. Absent when the Order was created with `distance`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceValue>,
    /// Distance from the Trade's fill price. Absent when created with `price`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<DecimalNumber>,
    pub time_in_force: TimeInForce,
    /// Expiry. Only present when `time_in_force` is GTD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(default)]
    pub trigger_condition: OrderTriggerCondition,
    #[serde(flatten)]
    pub lifecycle: OrderLifecycle,
    #[serde(flatten)]
    pub replacement: OrderReplacement,
}

/// Stop loss whose execution price is guaranteed by the broker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuaranteedStopLossOrder {
    #[serde(flatten)]
    pub base: OrderBase,
    /// Trade this Order closes.
    #[serde(rename = "tradeID")]
    pub trade_id: TradeID,
    #[serde(rename = "clientTradeID", skip_serializing_if = "Option::is_none")]
    pub client_trade_id: Option<ClientID>,
    /// Fee charged if the Order is filled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_execution_premium: Option<DecimalNumber>,
    /// Trigger price. Absent when the Order was created with `distance`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceValue>,
    /// Distance from the Trade's fill price. Absent when created with `price`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<DecimalNumber>,
    pub time_in_force: TimeInForce,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(default)]
    pub trigger_condition: OrderTriggerCondition,
    #[serde(flatten)]
    pub lifecycle: OrderLifecycle,
    #[serde(flatten)]
    pub replacement: OrderReplacement,
}

/// Stop loss that follows the market at `distance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailingStopLossOrder {
    #[serde(flatten)]
    pub base: OrderBase,
    /// Trade this Order closes.
    #[serde(rename = "tradeID")]
    pub trade_id: TradeID,
    #[serde(rename = "clientTradeID", skip_serializing_if = "Option::is_none")]
    pub client_trade_id: Option<ClientID>,
    /// How far behind the best price the stop trails.
    pub distance: DecimalNumber,
    pub time_in_force: TimeInForce,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(default)]
    pub trigger_condition: OrderTriggerCondition,
    /// Current trigger price, recalculated by the server as the market moves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_stop_value: Option<PriceValue>,
    #[serde(flatten)]
    pub lifecycle: OrderLifecycle,
    #[serde(flatten)]
    pub replacement: OrderReplacement,
}

/// An Order of any type.
///
/// Serializes as the inner record, which carries its own `type`.
/// Deserialization reads `type` first and then decodes the matching variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Order {
    Market(MarketOrder),
    FixedPrice(FixedPriceOrder),
    Limit(LimitOrder),
    Stop(StopOrder),
    MarketIfTouched(MarketIfTouchedOrder),
    TakeProfit(TakeProfitOrder),
    StopLoss(StopLossOrder),
    GuaranteedStopLoss(GuaranteedStopLossOrder),
    TrailingStopLoss(TrailingStopLossOrder),
}

macro_rules! each_order {
    ($order:expr, $o:ident => $body:expr) => {
        match $order {
            Order::Market($o) => $body,
            Order::FixedPrice($o) => $body,
            Order::Limit($o) => $body,
            Order::Stop($o) => $body,
            Order::MarketIfTouched($o) => $body,
            Order::TakeProfit($o) => $body,
            Order::StopLoss($o) => $body,
            Order::GuaranteedStopLoss($o) => $body,
            Order::TrailingStopLoss($o) => $body,
        }
    };
}

impl Order {
    pub fn base(&self) -> &OrderBase {
        each_order!(self, o => &o.base)
    }

    pub fn base_mut(&mut self) -> &mut OrderBase {
        each_order!(self, o => &mut o.base)
    }

    pub fn id(&self) -> &OrderID {
        &self.base().id
    }

    pub fn create_time(&self) -> &DateTime {
        &self.base().create_time
    }

    pub fn state(&self) -> OrderState {
        self.base().state
    }

    pub fn order_type(&self) -> OrderType {
        match self {
            Order::Market(_) => OrderType::Market,
            Order::FixedPrice(_) => OrderType::FixedPrice,
            Order::Limit(_) => OrderType::Limit,
            Order::Stop(_) => OrderType::Stop,
            Order::MarketIfTouched(_) => OrderType::MarketIfTouched,
            Order::TakeProfit(_) => OrderType::TakeProfit,
            Order::StopLoss(_) => OrderType::StopLoss,
            Order::GuaranteedStopLoss(_) => OrderType::GuaranteedStopLoss,
            Order::TrailingStopLoss(_) => OrderType::TrailingStopLoss,
        }
    }

    pub fn client_extensions(&self) -> Option<&ClientExtensions> {
        self.base().client_extensions.as_ref()
    }

    pub fn lifecycle(&self) -> &OrderLifecycle {
        each_order!(self, o => &o.lifecycle)
    }

    pub fn lifecycle_mut(&mut self) -> &mut OrderLifecycle {
        each_order!(self, o => &mut o.lifecycle)
    }

    /// Replacement links, for the variants that can be replaced.
    pub fn replacement_mut(&mut self) -> Option<&mut OrderReplacement> {
        match self {
            Order::Market(_) | Order::FixedPrice(_) => None,
            Order::Limit(o) => Some(&mut o.replacement),
            Order::Stop(o) => Some(&mut o.replacement),
            Order::MarketIfTouched(o) => Some(&mut o.replacement),
            Order::TakeProfit(o) => Some(&mut o.replacement),
            Order::StopLoss(o) => Some(&mut o.replacement),
            Order::GuaranteedStopLoss(o) => Some(&mut o.replacement),
            Order::TrailingStopLoss(o) => Some(&mut o.replacement),
        }
    }

    /// Trade a dependent (take profit / stop loss) order is attached to.
    pub fn trade_id(&self) -> Option<&TradeID> {
        match self {
            Order::TakeProfit(o) => Some(&o.trade_id),
            Order::StopLoss(o) => Some(&o.trade_id),
            Order::GuaranteedStopLoss(o) => Some(&o.trade_id),
            Order::TrailingStopLoss(o) => Some(&o.trade_id),
            Order::Market(_) | Order::FixedPrice(_) | Order::Limit(_) | Order::Stop(_) | Order::MarketIfTouched(_) => {
                None
            }
        }
    }

    /// Instrument of an entry order. Dependent orders take theirs from the Trade.
    pub fn instrument(&self) -> Option<&InstrumentName> {
        match self {
            Order::Market(o) => Some(&o.instrument),
            Order::FixedPrice(o) => Some(&o.instrument),
            Order::Limit(o) => Some(&o.instrument),
            Order::Stop(o) => Some(&o.instrument),
            Order::MarketIfTouched(o) => Some(&o.instrument),
            Order::TakeProfit(_) | Order::StopLoss(_) | Order::GuaranteedStopLoss(_) | Order::TrailingStopLoss(_) => {
                None
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state() == OrderState::Pending
    }
}

impl<'de> Deserialize<'de> for Order {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        decode::order(raw.get()).map_err(serde::de::Error::custom)
    }
}

/// Server-maintained state of a pending Order that changes with price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicOrderState {
    pub id: OrderID,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_stop_value: Option<PriceValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_distance: Option<PriceValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_trigger_distance_exact: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitsAvailableDetails {
    pub long: DecimalNumber,
    pub short: DecimalNumber,
}

/// Units available to trade on an instrument under each position fill mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitsAvailable {
    pub default: UnitsAvailableDetails,
    pub reduce_first: UnitsAvailableDetails,
    pub reduce_only: UnitsAvailableDetails,
    pub open_only: UnitsAvailableDetails,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use strum::IntoEnumIterator;

    fn limit_json() -> &'static str {
        r#"{
            "id": "6372",
            "createTime": "2024-03-01T10:00:00.000000000Z",
            "state": "PENDING",
            "type": "LIMIT",
            "instrument": "EUR_USD",
            "units": "1000",
            "price": "1.08500",
            "timeInForce": "GTD",
            "gtdTime": "2024-03-08T10:00:00.000000000Z",
            "positionFill": "DEFAULT",
            "triggerCondition": "DEFAULT",
            "replacesOrderID": "6368"
        }"#
    }

    #[test]
    fn test_limit_order_fields() {
        let order: Order = serde_json::from_str(limit_json()).unwrap();
        let Order::Limit(limit) = &order else {
            panic!("Expected Limit order");
        };
        assert_eq!(limit.price, dec!(1.08500));
        assert_eq!(limit.time_in_force, TimeInForce::Gtd);
        assert!(limit.gtd_time.is_some());
        assert_eq!(limit.replacement.replaces_order_id, Some(OrderID::new("6368")));
        assert!(limit.lifecycle.filling_transaction_id.is_none());
        assert!(order.is_pending());
        assert_eq!(order.order_type(), OrderType::Limit);
    }

    #[test]
    fn test_order_type_matches_base_kind() {
        let order: Order = serde_json::from_str(limit_json()).unwrap();
        assert_eq!(order.order_type(), order.base().kind);
    }

    #[test]
    fn test_dependent_order_trade_link() {
        let json = r#"{
            "id": "7",
            "createTime": "2024-03-01T10:00:00Z",
            "state": "PENDING",
            "type": "TRAILING_STOP_LOSS",
            "tradeID": "5",
            "distance": "0.00500",
            "timeInForce": "GTC",
            "trailingStopValue": "1.07950"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.trade_id(), Some(&TradeID::new("5")));
        assert!(order.instrument().is_none());
    }

    #[test]
    fn test_order_type_tokens() {
        let tokens: Vec<String> = OrderType::iter().map(|t| t.to_string()).collect();
        assert!(tokens.contains(&"MARKET_IF_TOUCHED".to_string()));
        assert!(tokens.contains(&"GUARANTEED_STOP_LOSS".to_string()));
        assert_eq!(tokens.len(), 9);
    }

    #[test]
    fn test_order_state_terminal() {
        assert!(OrderState::Filled.is_terminal());
        assert!(OrderState::Cancelled.is_terminal());
        assert!(!OrderState::Triggered.is_terminal());
        assert!(!OrderState::Pending.is_terminal());
    }
}
