//! Prices, candlesticks and order/position books.

use super::primitives::{Currency, DateTime, DecimalNumber, InstrumentName, PriceValue};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// `type` of a price frame on the pricing stream.
pub const PRICE_TYPE: &str = "PRICE";

fn price_type() -> String {
    PRICE_TYPE.to_string()
}

/// One level of the order book as seen by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBucket {
    pub price: PriceValue,
    pub liquidity: DecimalNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteHomeConversionFactors {
    pub positive_units: DecimalNumber,
    pub negative_units: DecimalNumber,
}

/// Bid/ask price for an instrument as available to the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPrice {
    #[serde(rename = "type", default = "price_type")]
    pub kind: String,
    pub instrument: InstrumentName,
    pub time: DateTime,
    #[serde(default)]
    pub tradeable: bool,
    #[serde(default)]
    pub bids: Vec<PriceBucket>,
    #[serde(default)]
    pub asks: Vec<PriceBucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closeout_bid: Option<PriceValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closeout_ask: Option<PriceValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_home_conversion_factors: Option<QuoteHomeConversionFactors>,
}

impl ClientPrice {
    /// Best (first) bid.
    pub fn best_bid(&self) -> Option<PriceValue> {
        self.bids.first().map(|b| b.price)
    }

    /// Best (first) ask.
    pub fn best_ask(&self) -> Option<PriceValue> {
        self.asks.first().map(|b| b.price)
    }

    pub fn spread(&self) -> Option<PriceValue> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

/// Conversion rates from a currency into the account's home currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeConversions {
    pub currency: Currency,
    pub account_gain: DecimalNumber,
    pub account_loss: DecimalNumber,
    pub position_value: DecimalNumber,
}

/// Keepalive frame on the pricing stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingHeartbeat {
    #[serde(rename = "type")]
    pub kind: String,
    pub time: DateTime,
}

/// Candlestick width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum CandlestickGranularity {
    S5,
    S10,
    S15,
    S30,
    M1,
    M2,
    M4,
    M5,
    M10,
    M15,
    M30,
    H1,
    H2,
    H3,
    H4,
    H6,
    H8,
    H12,
    D,
    W,
    M,
}

impl CandlestickGranularity {
    /// Candle width in seconds. Monthly candles are counted as 31 days.
    pub fn seconds(&self) -> u64 {
        match self {
            Self::S5 => 5,
            Self::S10 => 10,
            Self::S15 => 15,
            Self::S30 => 30,
            Self::M1 => 60,
            Self::M2 => 120,
            Self::M4 => 240,
            Self::M5 => 300,
            Self::M10 => 600,
            Self::M15 => 900,
            Self::M30 => 1_800,
            Self::H1 => 3_600,
            Self::H2 => 7_200,
            Self::H3 => 10_800,
            Self::H4 => 14_400,
            Self::H6 => 21_600,
            Self::H8 => 28_800,
            Self::H12 => 43_200,
            Self::D => 86_400,
            Self::W => 604_800,
            Self::M => 2_678_400,
        }
    }
}

/// Day weekly candles start on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
pub enum WeeklyAlignment {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Open/high/low/close for one side of a candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandlestickData {
    pub o: PriceValue,
    pub h: PriceValue,
    pub l: PriceValue,
    pub c: PriceValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candlestick {
    pub time: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid: Option<CandlestickData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ask: Option<CandlestickData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid: Option<CandlestickData>,
    pub volume: i64,
    /// False while the candle is still being built.
    pub complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBookBucket {
    pub price: PriceValue,
    pub long_count_percent: DecimalNumber,
    pub short_count_percent: DecimalNumber,
}

/// Snapshot of client orders around the current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    pub instrument: InstrumentName,
    pub time: DateTime,
    pub price: PriceValue,
    pub bucket_width: PriceValue,
    pub buckets: Vec<OrderBookBucket>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionBookBucket {
    pub price: PriceValue,
    pub long_count_percent: DecimalNumber,
    pub short_count_percent: DecimalNumber,
}

/// Snapshot of client positions around the current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionBook {
    pub instrument: InstrumentName,
    pub time: DateTime,
    pub price: PriceValue,
    pub bucket_width: PriceValue,
    pub buckets: Vec<PositionBookBucket>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_client_price_spread() {
        let json = r#"{
            "type": "PRICE",
            "instrument": "EUR_USD",
            "time": "2024-03-01T10:00:00.123456789Z",
            "tradeable": true,
            "bids": [{"price": "1.08512", "liquidity": 1000000}, {"price": "1.08510", "liquidity": 5000000}],
            "asks": [{"price": "1.08525", "liquidity": 1000000}],
            "closeoutBid": "1.08508",
            "closeoutAsk": "1.08529"
        }"#;
        let price: ClientPrice = serde_json::from_str(json).unwrap();
        assert_eq!(price.best_bid(), Some(dec!(1.08512)));
        assert_eq!(price.spread(), Some(dec!(0.00013)));
        assert_eq!(price.bids[1].liquidity, dec!(5000000));
    }

    #[test]
    fn test_client_price_without_type_defaults() {
        let json = r#"{"instrument": "USD_JPY", "time": "2024-03-01T10:00:00Z", "bids": [], "asks": []}"#;
        let price: ClientPrice = serde_json::from_str(json).unwrap();
        assert_eq!(price.kind, PRICE_TYPE);
        assert!(price.spread().is_none());
    }

    #[test]
    fn test_granularity_tokens() {
        assert_eq!(CandlestickGranularity::M15.to_string(), "M15");
        assert_eq!(serde_json::to_string(&CandlestickGranularity::H12).unwrap(), "\"H12\"");
        assert_eq!("S5".parse::<CandlestickGranularity>().unwrap(), CandlestickGranularity::S5);
        assert_eq!(CandlestickGranularity::H4.seconds(), 14_400);
    }

    #[test]
    fn test_weekly_alignment_tokens() {
        assert_eq!(WeeklyAlignment::Friday.to_string(), "Friday");
        assert_eq!(serde_json::to_string(&WeeklyAlignment::Monday).unwrap(), "\"Monday\"");
    }
}
