//! Tradeable instrument metadata.

use super::primitives::{DecimalNumber, GuaranteedStopLossOrderMode, InstrumentName};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentType {
    Currency,
    Cfd,
    Metal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentCommission {
    pub commission: DecimalNumber,
    pub units_traded: DecimalNumber,
    pub minimum_commission: DecimalNumber,
}

/// Limits on the total size of guaranteed stop loss orders near a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuaranteedStopLossOrderLevelRestriction {
    pub volume: DecimalNumber,
    pub price_range: DecimalNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingDayOfWeek {
    pub day_of_week: DayOfWeek,
    pub days_charged: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentFinancing {
    pub long_rate: DecimalNumber,
    pub short_rate: DecimalNumber,
    #[serde(default)]
    pub financing_days_of_week: Vec<FinancingDayOfWeek>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

/// Entry data for guaranteed stop loss orders on an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuaranteedStopLossOrderEntryData {
    pub minimum_distance: DecimalNumber,
    pub premium: DecimalNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_restriction: Option<GuaranteedStopLossOrderLevelRestriction>,
}

/// Full specification of an instrument as tradeable by an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub name: InstrumentName,
    #[serde(rename = "type")]
    pub kind: InstrumentType,
    pub display_name: String,
    /// Location of the pip: 10^pipLocation is one pip.
    pub pip_location: i32,
    pub display_precision: i32,
    pub trade_units_precision: i32,
    pub minimum_trade_size: DecimalNumber,
    pub maximum_trailing_stop_distance: DecimalNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_guaranteed_stop_loss_distance: Option<DecimalNumber>,
    pub minimum_trailing_stop_distance: DecimalNumber,
    pub maximum_position_size: DecimalNumber,
    pub maximum_order_units: DecimalNumber,
    pub margin_rate: DecimalNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission: Option<InstrumentCommission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_stop_loss_order_mode: Option<GuaranteedStopLossOrderMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_stop_loss_order_execution_premium: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_stop_loss_order_level_restriction: Option<GuaranteedStopLossOrderLevelRestriction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financing: Option<InstrumentFinancing>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Instrument {
    /// Size of one pip as a decimal, e.g. `0.0001` for a pip location of -4.
    pub fn pip_size(&self) -> DecimalNumber {
        let scale = self.pip_location.unsigned_abs();
        if self.pip_location < 0 {
            DecimalNumber::new(1, scale)
        } else {
            DecimalNumber::from(10u64.pow(scale))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_instrument_decode_and_pip_size() {
        let json = r#"{
            "name": "EUR_USD",
            "type": "CURRENCY",
            "displayName": "EUR/USD",
            "pipLocation": -4,
            "displayPrecision": 5,
            "tradeUnitsPrecision": 0,
            "minimumTradeSize": "1",
            "maximumTrailingStopDistance": "1.00000",
            "minimumTrailingStopDistance": "0.00050",
            "maximumPositionSize": "0",
            "maximumOrderUnits": "100000000",
            "marginRate": "0.0333",
            "guaranteedStopLossOrderMode": "DISABLED",
            "tags": [{"type": "ASSET_CLASS", "name": "CURRENCY"}],
            "financing": {
                "longRate": "-0.0567",
                "shortRate": "0.0349",
                "financingDaysOfWeek": [{"dayOfWeek": "WEDNESDAY", "daysCharged": 3}]
            }
        }"#;
        let instrument: Instrument = serde_json::from_str(json).unwrap();
        assert_eq!(instrument.kind, InstrumentType::Currency);
        assert_eq!(instrument.pip_size(), dec!(0.0001));
        assert_eq!(instrument.margin_rate, dec!(0.0333));
        let financing = instrument.financing.unwrap();
        assert_eq!(financing.financing_days_of_week[0].day_of_week, DayOfWeek::Wednesday);
        assert_eq!(financing.financing_days_of_week[0].days_charged, 3);
    }
}
