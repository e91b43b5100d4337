//! Two-pass decoding of polymorphic records.
//!
//! The first pass reads only `type`; the second decodes the whole object
//! into the variant that discriminant selects. Unknown discriminants fail
//! with [`Error::UnknownVariant`] and every other decode failure with
//! [`Error::SchemaViolation`].

use crate::error::{Error, Result, VariantFamily};
use crate::types::{Order, OrderType, Transaction, TransactionType};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;
use std::borrow::Cow;
use std::str::FromStr;

const UNKNOWN_VARIANT_MARKER: &str = "unknown variant discriminant ";

#[derive(Deserialize)]
struct Discriminant<'a> {
    #[serde(rename = "type", borrow, default)]
    kind: Cow<'a, str>,
}

/// Read the `type` field of a JSON object without decoding the rest.
pub fn discriminant(raw: &str) -> Result<Cow<'_, str>> {
    let probe: Discriminant<'_> = serde_json::from_str(raw).map_err(classify)?;
    if probe.kind.is_empty() {
        return Err(Error::SchemaViolation {
            field: Some("type".to_string()),
            message: "missing discriminant".to_string(),
        });
    }
    Ok(probe.kind)
}

/// Decode one Order object.
pub fn order(raw: &str) -> Result<Order> {
    let kind = discriminant(raw)?;
    order_of(&kind, raw)
}

pub(crate) fn order_of(kind: &str, raw: &str) -> Result<Order> {
    let order_type = OrderType::from_str(kind).map_err(|_| Error::UnknownVariant {
        family: VariantFamily::Order,
        discriminant: kind.to_string(),
    })?;

    Ok(match order_type {
        OrderType::Market => Order::Market(body(raw)?),
        OrderType::FixedPrice => Order::FixedPrice(body(raw)?),
        OrderType::Limit => Order::Limit(body(raw)?),
        OrderType::Stop => Order::Stop(body(raw)?),
        OrderType::MarketIfTouched => Order::MarketIfTouched(body(raw)?),
        OrderType::TakeProfit => Order::TakeProfit(body(raw)?),
        OrderType::StopLoss => Order::StopLoss(body(raw)?),
        OrderType::GuaranteedStopLoss => Order::GuaranteedStopLoss(body(raw)?),
        OrderType::TrailingStopLoss => Order::TrailingStopLoss(body(raw)?),
    })
}

/// Decode one Transaction object.
pub fn transaction(raw: &str) -> Result<Transaction> {
    let kind = discriminant(raw)?;
    transaction_of(&kind, raw)
}

pub(crate) fn transaction_of(kind: &str, raw: &str) -> Result<Transaction> {
    let transaction_type = TransactionType::from_str(kind).map_err(|_| Error::UnknownVariant {
        family: VariantFamily::Transaction,
        discriminant: kind.to_string(),
    })?;

    use Transaction as T;
    use TransactionType as K;
    Ok(match transaction_type {
        K::Create => T::Create(body(raw)?),
        K::Close => T::Close(body(raw)?),
        K::Reopen => T::Reopen(body(raw)?),
        K::ClientConfigure => T::ClientConfigure(body(raw)?),
        K::ClientConfigureReject => T::ClientConfigureReject(body(raw)?),
        K::TransferFunds => T::TransferFunds(body(raw)?),
        K::TransferFundsReject => T::TransferFundsReject(body(raw)?),
        K::MarketOrder => T::MarketOrder(body(raw)?),
        K::MarketOrderReject => T::MarketOrderReject(body(raw)?),
        K::FixedPriceOrder => T::FixedPriceOrder(body(raw)?),
        K::LimitOrder => T::LimitOrder(body(raw)?),
        K::LimitOrderReject => T::LimitOrderReject(body(raw)?),
        K::StopOrder => T::StopOrder(body(raw)?),
        K::StopOrderReject => T::StopOrderReject(body(raw)?),
        K::MarketIfTouchedOrder => T::MarketIfTouchedOrder(body(raw)?),
        K::MarketIfTouchedOrderReject => T::MarketIfTouchedOrderReject(body(raw)?),
        K::TakeProfitOrder => T::TakeProfitOrder(body(raw)?),
        K::TakeProfitOrderReject => T::TakeProfitOrderReject(body(raw)?),
        K::StopLossOrder => T::StopLossOrder(body(raw)?),
        K::StopLossOrderReject => T::StopLossOrderReject(body(raw)?),
        K::GuaranteedStopLossOrder => T::GuaranteedStopLossOrder(body(raw)?),
        K::GuaranteedStopLossOrderReject => T::GuaranteedStopLossOrderReject(body(raw)?),
        K::TrailingStopLossOrder => T::TrailingStopLossOrder(body(raw)?),
        K::TrailingStopLossOrderReject => T::TrailingStopLossOrderReject(body(raw)?),
        K::OrderFill => T::OrderFill(body(raw)?),
        K::OrderCancel => T::OrderCancel(body(raw)?),
        K::OrderCancelReject => T::OrderCancelReject(body(raw)?),
        K::OrderClientExtensionsModify => T::OrderClientExtensionsModify(body(raw)?),
        K::OrderClientExtensionsModifyReject => T::OrderClientExtensionsModifyReject(body(raw)?),
        K::TradeClientExtensionsModify => T::TradeClientExtensionsModify(body(raw)?),
        K::TradeClientExtensionsModifyReject => T::TradeClientExtensionsModifyReject(body(raw)?),
        K::MarginCallEnter => T::MarginCallEnter(body(raw)?),
        K::MarginCallExtend => T::MarginCallExtend(body(raw)?),
        K::MarginCallExit => T::MarginCallExit(body(raw)?),
        K::DelayedTradeClosure => T::DelayedTradeClosure(body(raw)?),
        K::DailyFinancing => T::DailyFinancing(body(raw)?),
        K::DividendAdjustment => T::DividendAdjustment(body(raw)?),
        K::ResetResettablePl => T::ResetResettablePl(body(raw)?),
    })
}

/// Decode a whole document into `T`, classifying failures.
pub fn body<T: DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(classify)
}

/// Decode a whole response body held as bytes.
pub fn slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(classify)
}

/// Decode each element on its own, so one bad element does not sink the
/// rest.
pub fn each<T: DeserializeOwned>(items: &[Box<RawValue>]) -> Vec<Result<T>> {
    items.iter().map(|item| body(item.get())).collect()
}

/// Map a serde_json error to [`Error::UnknownVariant`] when it was raised by
/// a nested polymorphic field, and to [`Error::SchemaViolation`] otherwise.
pub fn classify(err: serde_json::Error) -> Error {
    let message = err.to_string();

    if let Some(rest) = message.split(UNKNOWN_VARIANT_MARKER).nth(1) {
        let family = if rest.starts_with("order ") {
            Some(VariantFamily::Order)
        } else if rest.starts_with("transaction ") {
            Some(VariantFamily::Transaction)
        } else if rest.starts_with("stream ") {
            Some(VariantFamily::Stream)
        } else {
            None
        };
        if let (Some(family), Some(discriminant)) = (family, backticked(rest)) {
            return Error::UnknownVariant {
                family,
                discriminant: discriminant.to_string(),
            };
        }
    }

    let field = message
        .split("missing field ")
        .nth(1)
        .and_then(backticked)
        .map(str::to_string);

    Error::SchemaViolation { field, message }
}

fn backticked(text: &str) -> Option<&str> {
    let start = text.find('`')? + 1;
    let len = text[start..].find('`')?;
    Some(&text[start..start + len])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminant_borrowed() {
        let kind = discriminant(r#"{"id":"1","type":"LIMIT","price":"1.1"}"#).unwrap();
        assert_eq!(kind, "LIMIT");
        assert!(matches!(kind, Cow::Borrowed(_)));
    }

    #[test]
    fn test_missing_discriminant() {
        match discriminant(r#"{"id":"1"}"#) {
            Err(Error::SchemaViolation { field, .. }) => assert_eq!(field.as_deref(), Some("type")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_not_an_object() {
        assert!(matches!(discriminant("[1,2]"), Err(Error::SchemaViolation { .. })));
        assert!(matches!(discriminant("{\"type\":"), Err(Error::SchemaViolation { .. })));
    }

    #[test]
    fn test_unknown_order_type() {
        match order(r#"{"id":"1","type":"BRACKET"}"#) {
            Err(Error::UnknownVariant { family, discriminant }) => {
                assert_eq!(family, VariantFamily::Order);
                assert_eq!(discriminant, "BRACKET");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_classify_missing_field() {
        let err = serde_json::from_str::<crate::types::ClientExtensions>("42").unwrap_err();
        assert!(matches!(classify(err), Error::SchemaViolation { field: None, .. }));

        let err = serde_json::from_str::<crate::types::MarketOrderTradeClose>(r#"{"units":"ALL"}"#).unwrap_err();
        match classify(err) {
            Error::SchemaViolation { field, .. } => assert_eq!(field.as_deref(), Some("tradeID")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_classify_nested_unknown_variant() {
        let err = Error::UnknownVariant {
            family: VariantFamily::Transaction,
            discriminant: "MARGIN_CALL_SNOOZE".to_string(),
        };
        let wrapped = <serde_json::Error as serde::de::Error>::custom(err);
        match classify(wrapped) {
            Error::UnknownVariant { family, discriminant } => {
                assert_eq!(family, VariantFamily::Transaction);
                assert_eq!(discriminant, "MARGIN_CALL_SNOOZE");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_backticked() {
        assert_eq!(backticked("field `price` at line 1"), Some("price"));
        assert_eq!(backticked("no ticks"), None);
    }
}
