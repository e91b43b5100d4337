//! Order state tracking from the Transaction history.
//!
//! An Order starts PENDING when its create Transaction is seen and moves to
//! FILLED or CANCELLED on the matching ORDER_FILL or ORDER_CANCEL. A
//! terminal Order ignores later Transactions.

use crate::types::{
    ClientExtensions, DateTime, FixedPriceOrder, GuaranteedStopLossOrder, LimitOrder, MarketIfTouchedOrder,
    MarketOrder, OnFillOrders, Order, OrderBase, OrderID, OrderLifecycle, OrderReplacement, OrderState, OrderType,
    ReplacementLinks, StopLossOrder, StopOrder, TakeProfitOrder, TrailingStopLossOrder, Transaction,
    TransactionBase,
};
use tracing::debug;

fn pending(tx: &TransactionBase, kind: OrderType, client_extensions: Option<&ClientExtensions>) -> OrderBase {
    OrderBase {
        id: OrderID::new(tx.id.as_str()),
        create_time: tx.time,
        state: OrderState::Pending,
        client_extensions: client_extensions.cloned(),
        kind,
    }
}

fn replacement(links: &ReplacementLinks) -> OrderReplacement {
    OrderReplacement {
        replaces_order_id: links.replaces_order_id.clone(),
        replaced_by_order_id: None,
    }
}

impl Order {
    /// Build the PENDING Order a create Transaction describes. The Order
    /// takes the Transaction's ID. Returns `None` for any other Transaction.
    pub fn from_transaction(transaction: &Transaction) -> Option<Order> {
        let order = match transaction {
            Transaction::MarketOrder(t) => Order::Market(MarketOrder {
                base: pending(&t.base, OrderType::Market, t.client_extensions.as_ref()),
                instrument: t.instrument.clone(),
                units: t.units,
                time_in_force: t.time_in_force,
                price_bound: t.price_bound,
                position_fill: t.position_fill,
                trade_close: t.trade_close.clone(),
                long_position_closeout: t.long_position_closeout.clone(),
                short_position_closeout: t.short_position_closeout.clone(),
                margin_closeout: t.margin_closeout,
                delayed_trade_close: t.delayed_trade_close.clone(),
                on_fill: t.on_fill.clone(),
                lifecycle: OrderLifecycle::default(),
            }),
            Transaction::FixedPriceOrder(t) => Order::FixedPrice(FixedPriceOrder {
                base: pending(&t.base, OrderType::FixedPrice, t.client_extensions.as_ref()),
                instrument: t.instrument.clone(),
                units: t.units,
                price: t.price,
                position_fill: t.position_fill,
                trade_state: t.trade_state.clone(),
                on_fill: t.on_fill.clone(),
                lifecycle: OrderLifecycle::default(),
            }),
            Transaction::LimitOrder(t) => Order::Limit(LimitOrder {
                base: pending(&t.base, OrderType::Limit, t.client_extensions.as_ref()),
                instrument: t.instrument.clone(),
                units: t.units,
                price: t.price,
                time_in_force: t.time_in_force,
                gtd_time: t.gtd_time,
                position_fill: t.position_fill,
                trigger_condition: t.trigger_condition,
                on_fill: t.on_fill.clone(),
                lifecycle: OrderLifecycle::default(),
                replacement: replacement(&t.links),
            }),
            Transaction::StopOrder(t) => Order::Stop(StopOrder {
                base: pending(&t.base, OrderType::Stop, t.client_extensions.as_ref()),
                instrument: t.instrument.clone(),
                units: t.units,
                price: t.price,
                price_bound: t.price_bound,
                time_in_force: t.time_in_force,
                gtd_time: t.gtd_time,
                position_fill: t.position_fill,
                trigger_condition: t.trigger_condition,
                on_fill: t.on_fill.clone(),
                lifecycle: OrderLifecycle::default(),
                replacement: replacement(&t.links),
            }),
            Transaction::MarketIfTouchedOrder(t) => Order::MarketIfTouched(MarketIfTouchedOrder {
                base: pending(&t.base, OrderType::MarketIfTouched, t.client_extensions.as_ref()),
                instrument: t.instrument.clone(),
                units: t.units,
                price: t.price,
                price_bound: t.price_bound,
                time_in_force: t.time_in_force,
                gtd_time: t.gtd_time,
                position_fill: t.position_fill,
                trigger_condition: t.trigger_condition,
                initial_market_price: None,
                on_fill: t.on_fill.clone(),
                lifecycle: OrderLifecycle::default(),
                replacement: replacement(&t.links),
            }),
            Transaction::TakeProfitOrder(t) => Order::TakeProfit(TakeProfitOrder {
                base: pending(&t.base, OrderType::TakeProfit, t.client_extensions.as_ref()),
                trade_id: t.trade_id.clone(),
                client_trade_id: t.client_trade_id.clone(),
                price: t.price,
                time_in_force: t.time_in_force,
                gtd_time: t.gtd_time,
                trigger_condition: t.trigger_condition,
                lifecycle: OrderLifecycle::default(),
                replacement: replacement(&t.links),
            }),
            Transaction::StopLossOrder(t) => Order::StopLoss(StopLossOrder {
                base: pending(&t.base, OrderType::StopLoss, t.client_extensions.as_ref()),
                trade_id: t.trade_id.clone(),
                client_trade_id: t.client_trade_id.clone(),
                price: t.price,
                distance: t.distance,
                time_in_force: t.time_in_force,
                gtd_time: t.gtd_time,
                trigger_condition: t.trigger_condition,
                lifecycle: OrderLifecycle::default(),
                replacement: replacement(&t.links),
            }),
            Transaction::GuaranteedStopLossOrder(t) => Order::GuaranteedStopLoss(GuaranteedStopLossOrder {
                base: pending(&t.base, OrderType::GuaranteedStopLoss, t.client_extensions.as_ref()),
                trade_id: t.trade_id.clone(),
                client_trade_id: t.client_trade_id.clone(),
                guaranteed_execution_premium: t.guaranteed_execution_premium,
                price: t.price,
                distance: t.distance,
                time_in_force: t.time_in_force,
                gtd_time: t.gtd_time,
                trigger_condition: t.trigger_condition,
                lifecycle: OrderLifecycle::default(),
                replacement: replacement(&t.links),
            }),
            Transaction::TrailingStopLossOrder(t) => Order::TrailingStopLoss(TrailingStopLossOrder {
                base: pending(&t.base, OrderType::TrailingStopLoss, t.client_extensions.as_ref()),
                trade_id: t.trade_id.clone(),
                client_trade_id: t.client_trade_id.clone(),
                distance: t.distance,
                time_in_force: t.time_in_force,
                gtd_time: t.gtd_time,
                trigger_condition: t.trigger_condition,
                trailing_stop_value: None,
                lifecycle: OrderLifecycle::default(),
                replacement: replacement(&t.links),
            }),
            _ => return None,
        };
        Some(order)
    }

    /// Apply a Transaction that refers to this Order. Returns true if the
    /// Order changed.
    pub fn apply(&mut self, transaction: &Transaction) -> bool {
        if self.state().is_terminal() {
            return false;
        }

        match transaction {
            Transaction::OrderFill(fill) if &fill.order_id == self.id() => {
                let lifecycle = self.lifecycle_mut();
                lifecycle.filling_transaction_id = Some(fill.base.id.clone());
                lifecycle.filled_time = Some(fill.base.time);
                lifecycle.trade_opened_id = fill.trade_opened.as_ref().map(|t| t.trade_id.clone());
                lifecycle.trade_reduced_id = fill.trade_reduced.as_ref().map(|t| t.trade_id.clone());
                lifecycle.trade_closed_ids = fill.trades_closed.iter().map(|t| t.trade_id.clone()).collect();
                self.transition(OrderState::Filled, &fill.base.time);
                true
            }
            Transaction::OrderCancel(cancel) if &cancel.order_id == self.id() => {
                let lifecycle = self.lifecycle_mut();
                lifecycle.cancelling_transaction_id = Some(cancel.base.id.clone());
                lifecycle.cancelled_time = Some(cancel.base.time);
                if let (Some(replaced_by), Some(links)) = (&cancel.replaced_by_order_id, self.replacement_mut()) {
                    links.replaced_by_order_id = Some(replaced_by.clone());
                }
                self.transition(OrderState::Cancelled, &cancel.base.time);
                true
            }
            Transaction::OrderClientExtensionsModify(modify) if &modify.order_id == self.id() => {
                match &modify.client_extensions_modify {
                    Some(extensions) => {
                        self.base_mut().client_extensions = Some(extensions.clone());
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    fn transition(&mut self, state: OrderState, at: &DateTime) {
        debug!("order {} {} -> {} at {}", self.id(), self.state(), state, at);
        self.base_mut().state = state;
    }

    /// Dependent orders requested for creation when this Order fills.
    pub fn on_fill(&self) -> Option<&OnFillOrders> {
        match self {
            Order::Market(o) => Some(&o.on_fill),
            Order::FixedPrice(o) => Some(&o.on_fill),
            Order::Limit(o) => Some(&o.on_fill),
            Order::Stop(o) => Some(&o.on_fill),
            Order::MarketIfTouched(o) => Some(&o.on_fill),
            Order::TakeProfit(_) | Order::StopLoss(_) | Order::GuaranteedStopLoss(_) | Order::TrailingStopLoss(_) => {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode;
    use crate::types::{OrderCancelReason, TradeID};
    use rust_decimal_macros::dec;

    fn limit_created() -> Transaction {
        decode::transaction(
            r#"{"id":"6372","time":"2024-03-01T10:00:00Z","userID":1,"accountID":"101-004-1-001","batchID":"6372",
                "type":"LIMIT_ORDER","instrument":"EUR_USD","units":"1000","price":"1.08500","timeInForce":"GTC",
                "positionFill":"DEFAULT","triggerCondition":"DEFAULT","reason":"CLIENT_ORDER",
                "takeProfitOnFill":{"price":"1.09000"},"replacesOrderID":"6368"}"#,
        )
        .unwrap()
    }

    fn filled(order_id: &str) -> Transaction {
        decode::transaction(&format!(
            r#"{{"id":"6380","time":"2024-03-01T11:00:00Z","userID":1,"accountID":"101-004-1-001","batchID":"6380",
                "type":"ORDER_FILL","orderID":"{order_id}","instrument":"EUR_USD","units":"1000","reason":"LIMIT_ORDER",
                "pl":"0.0000","financing":"0.0000","commission":"0.0000",
                "tradeOpened":{{"tradeID":"6381","units":"1000","price":"1.08500"}}}}"#
        ))
        .unwrap()
    }

    fn cancelled(order_id: &str) -> Transaction {
        decode::transaction(&format!(
            r#"{{"id":"6390","time":"2024-03-01T12:00:00Z","userID":1,"accountID":"101-004-1-001","batchID":"6390",
                "type":"ORDER_CANCEL","orderID":"{order_id}","reason":"CLIENT_REQUEST_REPLACED",
                "replacedByOrderID":"6391"}}"#
        ))
        .unwrap()
    }

    // =========================================================================
    // Creation Tests
    // =========================================================================

    #[test]
    fn test_order_from_create_transaction() {
        let order = Order::from_transaction(&limit_created()).unwrap();
        assert_eq!(order.id().as_str(), "6372");
        assert_eq!(order.state(), OrderState::Pending);
        assert_eq!(order.order_type(), OrderType::Limit);

        let Order::Limit(limit) = &order else {
            panic!("Expected Limit order");
        };
        assert_eq!(limit.price, dec!(1.08500));
        assert_eq!(limit.replacement.replaces_order_id, Some(OrderID::new("6368")));
        assert!(order.on_fill().unwrap().take_profit_on_fill.is_some());
    }

    #[test]
    fn test_non_create_transaction_has_no_order() {
        assert!(Order::from_transaction(&filled("6372")).is_none());
    }

    // =========================================================================
    // Transition Tests
    // =========================================================================

    #[test]
    fn test_fill_moves_to_filled() {
        let mut order = Order::from_transaction(&limit_created()).unwrap();
        assert!(order.apply(&filled("6372")));

        assert_eq!(order.state(), OrderState::Filled);
        let lifecycle = order.lifecycle();
        assert_eq!(lifecycle.filling_transaction_id.as_ref().map(|id| id.as_str()), Some("6380"));
        assert_eq!(lifecycle.trade_opened_id, Some(TradeID::new("6381")));
        assert!(lifecycle.trade_closed_ids.is_empty());
        assert!(lifecycle.cancelling_transaction_id.is_none());
    }

    #[test]
    fn test_cancel_records_replacement() {
        let mut order = Order::from_transaction(&limit_created()).unwrap();
        let cancel = cancelled("6372");
        assert!(order.apply(&cancel));

        assert_eq!(order.state(), OrderState::Cancelled);
        let Order::Limit(limit) = &order else {
            panic!("Expected Limit order");
        };
        assert_eq!(limit.replacement.replaced_by_order_id, Some(OrderID::new("6391")));
        let Transaction::OrderCancel(cancel) = &cancel else {
            panic!("Expected ORDER_CANCEL");
        };
        assert_eq!(cancel.reason, OrderCancelReason::ClientRequestReplaced);
    }

    #[test]
    fn test_terminal_order_ignores_later_transactions() {
        let mut order = Order::from_transaction(&limit_created()).unwrap();
        assert!(order.apply(&filled("6372")));
        assert!(!order.apply(&cancelled("6372")));
        assert_eq!(order.state(), OrderState::Filled);
    }

    #[test]
    fn test_other_order_transactions_ignored() {
        let mut order = Order::from_transaction(&limit_created()).unwrap();
        assert!(!order.apply(&filled("9999")));
        assert_eq!(order.state(), OrderState::Pending);
    }
}
