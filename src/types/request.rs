//! Request shapes: query parameters for GET endpoints and JSON bodies for
//! state-changing endpoints.
//!
//! Query structs serialize with `serde_urlencoded`. List parameters are
//! comma-joined; absent options and empty lists are omitted.

use super::order::{OrderStateFilter, OrderType};
use super::pricing::{CandlestickGranularity, WeeklyAlignment};
use super::primitives::{
    ClientExtensions, ClientID, CloseUnits, DateTime, DecimalNumber, GuaranteedStopLossDetails, InstrumentName,
    OnFillOrders, OrderID, OrderPositionFill, OrderTriggerCondition, PriceValue, PricingComponent, StopLossDetails,
    TakeProfitDetails, TimeInForce, TradeID, TrailingStopLossDetails, TransactionID,
};
use super::trade::TradeStateFilter;
use super::transaction::TransactionFilter;
use serde::{Serialize, Serializer};
use std::fmt;

#[allow(clippy::ptr_arg)]
fn comma_separated<T, S>(values: &Vec<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: Serializer,
{
    let joined = values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",");
    serializer.serialize_str(&joined)
}

// =============================================================================
// Query parameters
// =============================================================================

/// `GET /accounts/{id}/instruments`
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountInstrumentsQuery {
    #[serde(serialize_with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub instruments: Vec<InstrumentName>,
}

/// `GET /accounts/{id}/changes`
#[derive(Debug, Clone, Serialize)]
pub struct AccountChangesQuery {
    #[serde(rename = "sinceTransactionID")]
    pub since_transaction_id: TransactionID,
}

impl AccountChangesQuery {
    /// Changes after the cursor returned by a previous call.
    pub fn since(cursor: &TransactionID) -> Self {
        Self {
            since_transaction_id: cursor.clone(),
        }
    }
}

/// `GET /instruments/{instrument}/candles` and the account-scoped variant.
///
/// Fields are declared in key order so the encoded query is stable.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandlesQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment_timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Hour of day (0-23) daily candles start at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_alignment: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity: Option<CandlestickGranularity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_first: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PricingComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smooth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_alignment: Option<WeeklyAlignment>,
}

/// `GET /instruments/{instrument}/orderBook` and `/positionBook`
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime>,
}

/// `GET /accounts/{id}/orders`
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrdersQuery {
    #[serde(serialize_with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<OrderID>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<OrderStateFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument: Option<InstrumentName>,
    /// Maximum number of orders to return (server caps at 500).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(rename = "beforeID", skip_serializing_if = "Option::is_none")]
    pub before_id: Option<OrderID>,
}

/// `GET /accounts/{id}/trades`
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradesQuery {
    #[serde(serialize_with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<TradeID>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<TradeStateFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument: Option<InstrumentName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(rename = "beforeID", skip_serializing_if = "Option::is_none")]
    pub before_id: Option<TradeID>,
}

/// `GET /accounts/{id}/transactions`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(rename = "type", serialize_with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TransactionFilter>,
}

/// `GET /accounts/{id}/transactions/idrange`
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRangeQuery {
    pub from: TransactionID,
    pub to: TransactionID,
    #[serde(rename = "type", serialize_with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TransactionFilter>,
}

/// `GET /accounts/{id}/transactions/sinceid`
#[derive(Debug, Clone, Serialize)]
pub struct TransactionsSinceQuery {
    pub id: TransactionID,
    #[serde(rename = "type", serialize_with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TransactionFilter>,
}

impl TransactionsSinceQuery {
    pub fn new(id: TransactionID) -> Self {
        Self { id, types: Vec::new() }
    }
}

/// Candle specification for the latest-candles endpoint:
/// `{instrument}:{granularity}:{price components}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandleSpecification {
    pub instrument: InstrumentName,
    pub granularity: CandlestickGranularity,
    pub price: PricingComponent,
}

impl fmt::Display for CandleSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.instrument, self.granularity, self.price)
    }
}

/// `GET /accounts/{id}/candles/latest`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestCandlesQuery {
    #[serde(serialize_with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub candle_specifications: Vec<CandleSpecification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smooth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_alignment: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment_timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_alignment: Option<WeeklyAlignment>,
}

/// `GET /accounts/{id}/pricing`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingQuery {
    #[serde(serialize_with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub instruments: Vec<InstrumentName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_home_conversions: Option<bool>,
}

/// `GET /accounts/{id}/pricing/stream`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingStreamQuery {
    #[serde(serialize_with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub instruments: Vec<InstrumentName>,
    /// Send a snapshot of current prices before streaming updates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_home_conversions: Option<bool>,
}

impl PricingStreamQuery {
    pub fn new<I, S>(instruments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<InstrumentName>,
    {
        Self {
            instruments: instruments.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

// =============================================================================
// Request bodies
// =============================================================================

/// `PATCH /accounts/{id}/configuration`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountConfigurationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_rate: Option<DecimalNumber>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOrderRequest {
    pub instrument: InstrumentName,
    /// Positive to buy, negative to sell.
    pub units: DecimalNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_bound: Option<PriceValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_fill: Option<OrderPositionFill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
    #[serde(flatten)]
    pub on_fill: OnFillOrders,
}

impl MarketOrderRequest {
    pub fn new(instrument: impl Into<InstrumentName>, units: DecimalNumber) -> Self {
        Self {
            instrument: instrument.into(),
            units,
            time_in_force: None,
            price_bound: None,
            position_fill: None,
            client_extensions: None,
            on_fill: OnFillOrders::default(),
        }
    }
}

/// Body for Limit, Stop and MarketIfTouched entry orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceOrderRequest {
    pub instrument: InstrumentName,
    pub units: DecimalNumber,
    pub price: PriceValue,
    /// Ignored by the server for Limit orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_bound: Option<PriceValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_fill: Option<OrderPositionFill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_condition: Option<OrderTriggerCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
    #[serde(flatten)]
    pub on_fill: OnFillOrders,
}

impl PriceOrderRequest {
    pub fn new(instrument: impl Into<InstrumentName>, units: DecimalNumber, price: PriceValue) -> Self {
        Self {
            instrument: instrument.into(),
            units,
            price,
            price_bound: None,
            time_in_force: None,
            gtd_time: None,
            position_fill: None,
            trigger_condition: None,
            client_extensions: None,
            on_fill: OnFillOrders::default(),
        }
    }
}

/// Body for TakeProfit, StopLoss, GuaranteedStopLoss and TrailingStopLoss
/// orders attached to an existing Trade.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependentOrderRequest {
    #[serde(rename = "tradeID")]
    pub trade_id: TradeID,
    #[serde(rename = "clientTradeID", skip_serializing_if = "Option::is_none")]
    pub client_trade_id: Option<ClientID>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_condition: Option<OrderTriggerCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
}

impl DependentOrderRequest {
    pub fn at_price(trade_id: TradeID, price: PriceValue) -> Self {
        Self {
            price: Some(price),
            ..Self::bare(trade_id)
        }
    }

    pub fn at_distance(trade_id: TradeID, distance: DecimalNumber) -> Self {
        Self {
            distance: Some(distance),
            ..Self::bare(trade_id)
        }
    }

    fn bare(trade_id: TradeID) -> Self {
        Self {
            trade_id,
            client_trade_id: None,
            price: None,
            distance: None,
            time_in_force: None,
            gtd_time: None,
            trigger_condition: None,
            client_extensions: None,
        }
    }
}

/// An order to create or to replace an existing order with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderRequest {
    Market(MarketOrderRequest),
    Limit(PriceOrderRequest),
    Stop(PriceOrderRequest),
    MarketIfTouched(PriceOrderRequest),
    TakeProfit(DependentOrderRequest),
    StopLoss(DependentOrderRequest),
    GuaranteedStopLoss(DependentOrderRequest),
    TrailingStopLoss(DependentOrderRequest),
}

impl OrderRequest {
    pub fn order_type(&self) -> OrderType {
        match self {
            OrderRequest::Market(_) => OrderType::Market,
            OrderRequest::Limit(_) => OrderType::Limit,
            OrderRequest::Stop(_) => OrderType::Stop,
            OrderRequest::MarketIfTouched(_) => OrderType::MarketIfTouched,
            OrderRequest::TakeProfit(_) => OrderType::TakeProfit,
            OrderRequest::StopLoss(_) => OrderType::StopLoss,
            OrderRequest::GuaranteedStopLoss(_) => OrderType::GuaranteedStopLoss,
            OrderRequest::TrailingStopLoss(_) => OrderType::TrailingStopLoss,
        }
    }
}

/// `POST /accounts/{id}/orders` and `PUT /accounts/{id}/orders/{spec}`
#[derive(Debug, Clone, Serialize)]
pub struct OrderBody<'a> {
    pub order: &'a OrderRequest,
}

/// `PUT /accounts/{id}/orders/{spec}/clientExtensions`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderClientExtensionsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_client_extensions: Option<ClientExtensions>,
}

/// `PUT /accounts/{id}/trades/{spec}/close`
#[derive(Debug, Clone, Serialize)]
pub struct CloseTradeRequest {
    pub units: CloseUnits,
}

/// `PUT /accounts/{id}/trades/{spec}/clientExtensions`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeClientExtensionsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
}

/// Set or cancel one dependent order of a Trade. `Cancel` serializes as
/// `null`, which the server reads as "remove this order".
#[derive(Debug, Clone, PartialEq)]
pub enum Dependent<T> {
    Set(T),
    Cancel,
}

impl<T: Serialize> Serialize for Dependent<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Dependent::Set(details) => details.serialize(serializer),
            Dependent::Cancel => serializer.serialize_none(),
        }
    }
}

/// `PUT /accounts/{id}/trades/{spec}/orders`. Omitted fields leave the
/// existing dependent order untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeOrdersRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<Dependent<TakeProfitDetails>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<Dependent<StopLossDetails>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_stop_loss: Option<Dependent<TrailingStopLossDetails>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_stop_loss: Option<Dependent<GuaranteedStopLossDetails>>,
}

/// `PUT /accounts/{id}/positions/{instrument}/close`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosePositionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_units: Option<CloseUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_client_extensions: Option<ClientExtensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_units: Option<CloseUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_client_extensions: Option<ClientExtensions>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    // =========================================================================
    // Query Encoding Tests
    // =========================================================================

    #[test]
    fn test_candles_query_full() {
        let query = CandlesQuery {
            price: Some(PricingComponent::new("M")),
            granularity: Some(CandlestickGranularity::M15),
            count: Some(1000),
            from: Some(chrono::Utc.with_ymd_and_hms(2022, 12, 9, 12, 0, 0).unwrap()),
            to: Some(chrono::Utc.with_ymd_and_hms(2022, 12, 10, 12, 0, 0).unwrap()),
            smooth: Some(false),
            include_first: Some(false),
            daily_alignment: Some(5),
            alignment_timezone: Some("Europe/Prague".to_string()),
            weekly_alignment: Some(WeeklyAlignment::Friday),
        };
        assert_eq!(
            serde_urlencoded::to_string(&query).unwrap(),
            "alignmentTimezone=Europe%2FPrague&count=1000&dailyAlignment=5&from=2022-12-09T12%3A00%3A00Z\
             &granularity=M15&includeFirst=false&price=M&smooth=false&to=2022-12-10T12%3A00%3A00Z\
             &weeklyAlignment=Friday"
        );
    }

    #[test]
    fn test_candles_query_omits_absent() {
        let query = CandlesQuery {
            granularity: Some(CandlestickGranularity::H1),
            ..Default::default()
        };
        assert_eq!(serde_urlencoded::to_string(&query).unwrap(), "granularity=H1");
    }

    #[test]
    fn test_list_parameters_comma_joined() {
        let query = PricingStreamQuery::new(["EUR_USD", "USD_JPY"]);
        assert_eq!(serde_urlencoded::to_string(&query).unwrap(), "instruments=EUR_USD%2CUSD_JPY");

        let query = TransactionsQuery {
            page_size: Some(100),
            types: vec![TransactionFilter::OrderFill, TransactionFilter::OrderCancel],
            ..Default::default()
        };
        assert_eq!(
            serde_urlencoded::to_string(&query).unwrap(),
            "pageSize=100&type=ORDER_FILL%2CORDER_CANCEL"
        );
    }

    #[test]
    fn test_empty_list_omitted() {
        let query = OrdersQuery {
            state: Some(OrderStateFilter::Pending),
            ..Default::default()
        };
        assert_eq!(serde_urlencoded::to_string(&query).unwrap(), "state=PENDING");
    }

    #[test]
    fn test_candle_specification_display() {
        let spec = CandleSpecification {
            instrument: "EUR_USD".into(),
            granularity: CandlestickGranularity::S10,
            price: PricingComponent::new("BM"),
        };
        assert_eq!(spec.to_string(), "EUR_USD:S10:BM");
    }

    // =========================================================================
    // Body Tests
    // =========================================================================

    #[test]
    fn test_order_request_carries_type() {
        let mut market = MarketOrderRequest::new("EUR_USD", dec!(-500));
        market.on_fill.stop_loss_on_fill = Some(StopLossDetails {
            distance: Some(dec!(0.0050)),
            ..Default::default()
        });
        let request = OrderRequest::Market(market);
        let json = serde_json::to_value(OrderBody { order: &request }).unwrap();
        assert_eq!(json["order"]["type"], "MARKET");
        assert_eq!(json["order"]["units"], "-500");
        assert_eq!(json["order"]["stopLossOnFill"]["distance"], "0.0050");
        assert!(json["order"].get("priceBound").is_none());
        assert_eq!(request.order_type(), OrderType::Market);
    }

    #[test]
    fn test_dependent_order_request() {
        let request = OrderRequest::TakeProfit(DependentOrderRequest::at_price(TradeID::new("42"), dec!(1.10)));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "TAKE_PROFIT");
        assert_eq!(json["tradeID"], "42");
        assert_eq!(json["price"], "1.10");
        assert!(json.get("distance").is_none());
    }

    #[test]
    fn test_trade_orders_cancel_serializes_null() {
        let request = TradeOrdersRequest {
            take_profit: Some(Dependent::Cancel),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"takeProfit":null}"#);
    }

    #[test]
    fn test_close_requests() {
        let body = CloseTradeRequest { units: CloseUnits::All };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"units":"ALL"}"#);

        let body = ClosePositionRequest {
            long_units: Some(CloseUnits::Units(dec!(100))),
            short_units: Some(CloseUnits::Nothing),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"longUnits":"100","shortUnits":"NONE"}"#
        );
    }
}
