//! Identifiers, decimal aliases and the small records shared across the schema.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// RFC3339 timestamp as emitted by the server.
pub type DateTime = chrono::DateTime<Utc>;

/// A price for an instrument.
pub type PriceValue = Decimal;

/// An amount of money in the account's home currency.
pub type AccountUnits = Decimal;

/// A generic decimal quantity (units, rates, factors).
pub type DecimalNumber = Decimal;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Account identifier, formatted `{siteID}-{divisionID}-{userID}-{accountNumber}`.
    AccountID
);
string_id!(
    /// Server-assigned Order identifier.
    OrderID
);
string_id!(
    /// Server-assigned Trade identifier.
    TradeID
);
string_id!(
    /// Client-provided identifier for an Order or Trade.
    ClientID
);
string_id!(
    /// Identifier of the request that produced a Transaction.
    RequestID
);
string_id!(
    /// Client-provided tag for an Order or Trade.
    ClientTag
);
string_id!(
    /// Client-provided comment for an Order or Trade.
    ClientComment
);
string_id!(
    /// ISO 4217 currency code.
    Currency
);
string_id!(
    /// Instrument name, e.g. `EUR_USD`.
    InstrumentName
);
string_id!(
    /// Price components for candle queries: any combination of `M`, `B` and `A`.
    PricingComponent
);

/// Transaction identifier.
///
/// Transaction IDs increase monotonically within an Account, so ordering
/// compares the numeric value. IDs that are not numeric sort after numeric
/// ones and then lexically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionID(String);

impl TransactionID {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the ID, if it is one.
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl Ord for TransactionID {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_u64(), other.as_u64()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for TransactionID {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TransactionID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TransactionID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for TransactionID {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// Refers to an Order either by server ID or by client ID (`@clientID`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderSpecifier(String);

impl OrderSpecifier {
    pub fn client(id: &ClientID) -> Self {
        Self(format!("@{}", id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&OrderID> for OrderSpecifier {
    fn from(id: &OrderID) -> Self {
        Self(id.to_string())
    }
}

impl From<OrderID> for OrderSpecifier {
    fn from(id: OrderID) -> Self {
        Self(id.0)
    }
}

impl fmt::Display for OrderSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Refers to a Trade either by server ID or by client ID (`@clientID`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TradeSpecifier(String);

impl TradeSpecifier {
    pub fn client(id: &ClientID) -> Self {
        Self(format!("@{}", id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&TradeID> for TradeSpecifier {
    fn from(id: &TradeID) -> Self {
        Self(id.to_string())
    }
}

impl From<TradeID> for TradeSpecifier {
    fn from(id: TradeID) -> Self {
        Self(id.0)
    }
}

impl fmt::Display for TradeSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Units to close on a trade or position side: `ALL`, `NONE`, or an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseUnits {
    All,
    Nothing,
    Units(Decimal),
}

impl fmt::Display for CloseUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseUnits::All => f.write_str("ALL"),
            CloseUnits::Nothing => f.write_str("NONE"),
            CloseUnits::Units(units) => write!(f, "{}", units),
        }
    }
}

impl FromStr for CloseUnits {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(CloseUnits::All),
            "NONE" => Ok(CloseUnits::Nothing),
            other => Decimal::from_str(other).map(CloseUnits::Units),
        }
    }
}

impl Serialize for CloseUnits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CloseUnits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Long or short.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Long,
    Short,
}

/// How long an Order remains pending before it is cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good until cancelled.
    Gtc,
    /// Good until `gtdTime`.
    Gtd,
    /// Good for the trading day.
    Gfd,
    /// Fill completely or cancel.
    Fok,
    /// Fill what is possible immediately, cancel the rest.
    Ioc,
}

/// How a filled Order affects existing Positions.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderPositionFill {
    OpenOnly,
    ReduceFirst,
    ReduceOnly,
    #[default]
    Default,
}

/// Which side of the price triggers a price-dependent Order.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderTriggerCondition {
    #[default]
    Default,
    Inverse,
    Bid,
    Ask,
    Mid,
}

/// Whether guaranteed stop loss orders may be used on an account or instrument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuaranteedStopLossOrderMode {
    Disabled,
    Allowed,
    Required,
}

/// What may be done to an existing guaranteed stop loss order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuaranteedStopLossOrderMutability {
    Fixed,
    Replaceable,
    Cancelable,
    PriceWidenOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountFinancingMode {
    NoFinancing,
    SecondBySecond,
    Daily,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionAggregationMode {
    AbsoluteSum,
    MaximalSide,
    NetSum,
}

/// Client-attached metadata for an Order or Trade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientExtensions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ClientID>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<ClientTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<ClientComment>,
}

/// Take profit to create when an Order fills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeProfitDetails {
    pub price: PriceValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
}

/// Stop loss to create when an Order fills. Exactly one of `price` or
/// `distance` is expected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopLossDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
}

/// Guaranteed stop loss to create when an Order fills.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuaranteedStopLossDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
}

/// Trailing stop loss to create when an Order fills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailingStopLossDetails {
    pub distance: DecimalNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
}

/// Dependent orders and trade extensions attached to an entry Order.
///
/// Shared by entry orders and the transactions that create them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnFillOrders {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit_on_fill: Option<TakeProfitDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_on_fill: Option<StopLossDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_stop_loss_on_fill: Option<GuaranteedStopLossDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_stop_loss_on_fill: Option<TrailingStopLossDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_client_extensions: Option<ClientExtensions>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionFactor {
    pub factor: DecimalNumber,
}

/// Factors for converting quote and base currency amounts into home currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeConversionFactors {
    pub gain_quote_home: ConversionFactor,
    pub loss_quote_home: ConversionFactor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gain_base_home: Option<ConversionFactor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loss_base_home: Option<ConversionFactor>,
}

/// Deserializes an optional timestamp where the server uses `"0"` or an
/// empty string for "never".
pub(crate) fn optional_time<'de, D>(deserializer: D) -> Result<Option<DateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") | Some("0") => Ok(None),
        Some(value) => chrono::DateTime::parse_from_rfc3339(value)
            .map(|t| Some(t.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // =========================================================================
    // Identifier Tests
    // =========================================================================

    #[test]
    fn test_transaction_id_numeric_ordering() {
        let mut ids: Vec<TransactionID> = ["10", "9", "100", "2"].iter().map(|s| (*s).into()).collect();
        ids.sort();
        let sorted: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(sorted, vec!["2", "9", "10", "100"]);
    }

    #[test]
    fn test_transaction_id_non_numeric_sorts_last() {
        let a = TransactionID::from("99999");
        let b = TransactionID::from("abc");
        assert!(a < b);
        assert_eq!(a.as_u64(), Some(99999));
        assert_eq!(b.as_u64(), None);
    }

    #[test]
    fn test_identifier_serializes_as_plain_string() {
        let id = AccountID::new("101-004-1234567-001");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"101-004-1234567-001\"");
    }

    #[test]
    fn test_client_specifiers() {
        let client = ClientID::new("my-order");
        assert_eq!(OrderSpecifier::client(&client).as_str(), "@my-order");
        assert_eq!(TradeSpecifier::from(TradeID::new("42")).as_str(), "42");
    }

    // =========================================================================
    // CloseUnits Tests
    // =========================================================================

    #[test]
    fn test_close_units_tokens() {
        assert_eq!(serde_json::to_string(&CloseUnits::All).unwrap(), "\"ALL\"");
        assert_eq!(serde_json::to_string(&CloseUnits::Nothing).unwrap(), "\"NONE\"");
        let units: CloseUnits = serde_json::from_str("\"250.5\"").unwrap();
        assert_eq!(units, CloseUnits::Units(dec!(250.5)));
        assert!(serde_json::from_str::<CloseUnits>("\"SOME\"").is_err());
    }

    // =========================================================================
    // Enum Tests
    // =========================================================================

    #[test]
    fn test_time_in_force_tokens() {
        assert_eq!(serde_json::to_string(&TimeInForce::Ioc).unwrap(), "\"IOC\"");
        assert_eq!(TimeInForce::Gtd.to_string(), "GTD");
        assert_eq!("FOK".parse::<TimeInForce>().unwrap(), TimeInForce::Fok);
    }

    #[test]
    fn test_multi_word_enum_tokens() {
        assert_eq!(OrderPositionFill::ReduceFirst.as_ref(), "REDUCE_FIRST");
        let mode: GuaranteedStopLossOrderMutability = serde_json::from_str("\"PRICE_WIDEN_ONLY\"").unwrap();
        assert_eq!(mode, GuaranteedStopLossOrderMutability::PriceWidenOnly);
    }
}
