//! Transactions: the append-only account ledger and its record variants.
//!
//! Every variant embeds [`TransactionBase`]. Reject variants embed the
//! record that would have been created and add a `rejectReason`.

use super::order::{
    MarketOrderDelayedTradeClose, MarketOrderMarginCloseout, MarketOrderPositionCloseout, MarketOrderTradeClose,
};
use super::pricing::ClientPrice;
use super::primitives::{
    AccountFinancingMode, AccountID, AccountUnits, ClientExtensions, ClientID, Currency, DateTime, DecimalNumber,
    HomeConversionFactors, InstrumentName, OnFillOrders, OrderID, OrderPositionFill, OrderTriggerCondition,
    PriceValue, RequestID, TimeInForce, TradeID, TransactionID,
};
use crate::decode;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The `type` discriminant of a Transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Create,
    Close,
    Reopen,
    ClientConfigure,
    ClientConfigureReject,
    TransferFunds,
    TransferFundsReject,
    MarketOrder,
    MarketOrderReject,
    FixedPriceOrder,
    LimitOrder,
    LimitOrderReject,
    StopOrder,
    StopOrderReject,
    MarketIfTouchedOrder,
    MarketIfTouchedOrderReject,
    TakeProfitOrder,
    TakeProfitOrderReject,
    StopLossOrder,
    StopLossOrderReject,
    GuaranteedStopLossOrder,
    GuaranteedStopLossOrderReject,
    TrailingStopLossOrder,
    TrailingStopLossOrderReject,
    OrderFill,
    OrderCancel,
    OrderCancelReject,
    OrderClientExtensionsModify,
    OrderClientExtensionsModifyReject,
    TradeClientExtensionsModify,
    TradeClientExtensionsModifyReject,
    MarginCallEnter,
    MarginCallExtend,
    MarginCallExit,
    DelayedTradeClosure,
    DailyFinancing,
    DividendAdjustment,
    ResetResettablePl,
}

/// Filter values accepted by the transaction list endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionFilter {
    Order,
    Funding,
    Admin,
    Create,
    Close,
    Reopen,
    ClientConfigure,
    ClientConfigureReject,
    TransferFunds,
    TransferFundsReject,
    MarketOrder,
    MarketOrderReject,
    LimitOrder,
    LimitOrderReject,
    StopOrder,
    StopOrderReject,
    MarketIfTouchedOrder,
    MarketIfTouchedOrderReject,
    TakeProfitOrder,
    TakeProfitOrderReject,
    StopLossOrder,
    StopLossOrderReject,
    GuaranteedStopLossOrder,
    GuaranteedStopLossOrderReject,
    TrailingStopLossOrder,
    TrailingStopLossOrderReject,
    OneCancelsAllOrder,
    OneCancelsAllOrderReject,
    OneCancelsAllOrderTriggered,
    OrderFill,
    OrderCancel,
    OrderCancelReject,
    OrderClientExtensionsModify,
    OrderClientExtensionsModifyReject,
    TradeClientExtensionsModify,
    TradeClientExtensionsModifyReject,
    MarginCallEnter,
    MarginCallExtend,
    MarginCallExit,
    DelayedTradeClosure,
    DailyFinancing,
    ResetResettablePl,
}

macro_rules! reason_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter)]
        #[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($variant),+
        }
    };
}

reason_enum!(
    FundingReason {
        ClientFunding,
        AccountTransfer,
        DivisionMigration,
        SiteMigration,
        Adjustment,
    }
);

reason_enum!(
    MarketOrderReason {
        ClientOrder,
        TradeClose,
        PositionCloseout,
        MarginCloseout,
        DelayedTradeClose,
    }
);

reason_enum!(
    FixedPriceOrderReason {
        PlatformAccountMigration,
        TradeCloseDivisionAccountMigration,
        TradeCloseAdministrativeAction,
    }
);

reason_enum!(LimitOrderReason { ClientOrder, Replacement });
reason_enum!(StopOrderReason { ClientOrder, Replacement });
reason_enum!(MarketIfTouchedOrderReason { ClientOrder, Replacement });
reason_enum!(TakeProfitOrderReason { ClientOrder, Replacement, OnFill });
reason_enum!(StopLossOrderReason { ClientOrder, Replacement, OnFill });
reason_enum!(GuaranteedStopLossOrderReason { ClientOrder, Replacement, OnFill });
reason_enum!(TrailingStopLossOrderReason { ClientOrder, Replacement, OnFill });

reason_enum!(
    /// Why an Order was filled.
    OrderFillReason {
        LimitOrder,
        StopOrder,
        MarketIfTouchedOrder,
        TakeProfitOrder,
        StopLossOrder,
        GuaranteedStopLossOrder,
        TrailingStopLossOrder,
        MarketOrder,
        MarketOrderTradeClose,
        MarketOrderPositionCloseout,
        MarketOrderMarginCloseout,
        MarketOrderDelayedTradeClose,
        FixedPriceOrder,
        FixedPriceOrderPlatformAccountMigration,
        FixedPriceOrderDivisionAccountMigration,
        FixedPriceOrderAdministrativeAction,
    }
);

reason_enum!(
    /// Why an Order was cancelled.
    OrderCancelReason {
        InternalServerError,
        AccountLocked,
        AccountNewPositionsLocked,
        AccountOrderCreationLocked,
        AccountOrderFillLocked,
        ClientRequest,
        Migration,
        MarketHalted,
        LinkedTradeClosed,
        TimeInForceExpired,
        InsufficientMargin,
        FifoViolation,
        BoundsViolation,
        ClientRequestReplaced,
        DividendAdjustmentReplaced,
        InsufficientLiquidity,
        TakeProfitOnFillGtdTimestampInPast,
        TakeProfitOnFillLoss,
        LosingTakeProfit,
        StopLossOnFillGtdTimestampInPast,
        StopLossOnFillLoss,
        StopLossOnFillPriceDistanceMaximumExceeded,
        StopLossOnFillRequired,
        StopLossOnFillGuaranteedRequired,
        StopLossOnFillGuaranteedNotAllowed,
        StopLossOnFillGuaranteedMinimumDistanceNotMet,
        StopLossOnFillGuaranteedLevelRestrictionExceeded,
        StopLossOnFillGuaranteedHedgingNotAllowed,
        StopLossOnFillTimeInForceInvalid,
        StopLossOnFillTriggerConditionInvalid,
        GuaranteedStopLossOnFillGtdTimestampInPast,
        GuaranteedStopLossOnFillLoss,
        GuaranteedStopLossOnFillPriceDistanceMaximumExceeded,
        GuaranteedStopLossOnFillRequired,
        GuaranteedStopLossOnFillNotAllowed,
        GuaranteedStopLossOnFillMinimumDistanceNotMet,
        GuaranteedStopLossOnFillLevelRestrictionVolumeExceeded,
        GuaranteedStopLossOnFillLevelRestrictionPriceRangeExceeded,
        GuaranteedStopLossOnFillHedgingNotAllowed,
        GuaranteedStopLossOnFillTimeInForceInvalid,
        GuaranteedStopLossOnFillTriggerConditionInvalid,
        TakeProfitOnFillPriceDistanceMaximumExceeded,
        TrailingStopLossOnFillGtdTimestampInPast,
        ClientTradeIdAlreadyExists,
        PositionCloseoutFailed,
        OpenTradesAllowedExceeded,
        PendingOrdersAllowedExceeded,
        TakeProfitOnFillClientOrderIdAlreadyExists,
        StopLossOnFillClientOrderIdAlreadyExists,
        GuaranteedStopLossOnFillClientOrderIdAlreadyExists,
        TrailingStopLossOnFillClientOrderIdAlreadyExists,
        PositionSizeExceeded,
        HedgingGsloViolation,
        AccountPositionValueLimitExceeded,
        InstrumentBidReduceOnly,
        InstrumentAskReduceOnly,
        InstrumentBidHalted,
        InstrumentAskHalted,
        StopLossOnFillGuaranteedBidHalted,
        StopLossOnFillGuaranteedAskHalted,
        GuaranteedStopLossOnFillBidHalted,
        GuaranteedStopLossOnFillAskHalted,
        FifoViolationSafeguardViolation,
        FifoViolationSafeguardPartialCloseViolation,
        OrdersOnFillRmoMutualExclusivityMutuallyExclusiveViolation,
    }
);

reason_enum!(
    /// Why the server rejected a request.
    TransactionRejectReason {
        InternalServerError,
        InstrumentPriceUnknown,
        AccountNotActive,
        AccountLocked,
        AccountOrderCreationLocked,
        AccountConfigurationLocked,
        AccountDepositLocked,
        AccountWithdrawalLocked,
        AccountOrderCancelLocked,
        InstrumentNotTradeable,
        PendingOrdersAllowedExceeded,
        OrderIdUnspecified,
        OrderDoesntExist,
        OrderIdentifierInconsistency,
        TradeIdUnspecified,
        TradeDoesntExist,
        TradeIdentifierInconsistency,
        InsufficientMargin,
        InstrumentMissing,
        InstrumentUnknown,
        UnitsMissing,
        UnitsInvalid,
        UnitsPrecisionExceeded,
        UnitsLimitExceeded,
        UnitsMinimumNotMet,
        PriceMissing,
        PriceInvalid,
        PricePrecisionExceeded,
        PriceDistanceMissing,
        PriceDistanceInvalid,
        PriceDistancePrecisionExceeded,
        PriceDistanceMaximumExceeded,
        PriceDistanceMinimumNotMet,
        TimeInForceMissing,
        TimeInForceInvalid,
        TimeInForceGtdTimestampMissing,
        TimeInForceGtdTimestampInPast,
        PriceBoundInvalid,
        PriceBoundPrecisionExceeded,
        OrdersOnFillDuplicateClientOrderIds,
        TradeOnFillClientExtensionsNotSupported,
        ClientOrderIdInvalid,
        ClientOrderIdAlreadyExists,
        ClientOrderTagInvalid,
        ClientOrderCommentInvalid,
        ClientTradeIdInvalid,
        ClientTradeIdAlreadyExists,
        ClientTradeTagInvalid,
        ClientTradeCommentInvalid,
        OrderFillPositionActionMissing,
        OrderFillPositionActionInvalid,
        TriggerConditionMissing,
        TriggerConditionInvalid,
        OrderPartialFillOptionMissing,
        OrderPartialFillOptionInvalid,
        InvalidReissueImmediatePartialFill,
        OrdersOnFillRmoMutualExclusivityMutuallyExclusiveViolation,
        OrdersOnFillRmoMutualExclusivityGsloExcludesOthersViolation,
        TakeProfitOrderAlreadyExists,
        TakeProfitOrderWouldViolateFifoViolationSafeguard,
        TakeProfitOnFillPriceMissing,
        TakeProfitOnFillPriceInvalid,
        TakeProfitOnFillPricePrecisionExceeded,
        TakeProfitOnFillTimeInForceMissing,
        TakeProfitOnFillTimeInForceInvalid,
        TakeProfitOnFillGtdTimestampMissing,
        TakeProfitOnFillGtdTimestampInPast,
        TakeProfitOnFillClientOrderIdInvalid,
        TakeProfitOnFillClientOrderTagInvalid,
        TakeProfitOnFillClientOrderCommentInvalid,
        TakeProfitOnFillTriggerConditionMissing,
        TakeProfitOnFillTriggerConditionInvalid,
        StopLossOrderAlreadyExists,
        StopLossOrderGuaranteedRequired,
        StopLossOrderGuaranteedPriceWithinSpread,
        StopLossOrderGuaranteedNotAllowed,
        StopLossOrderGuaranteedHaltedCreateViolation,
        StopLossOrderGuaranteedHaltedTightenViolation,
        StopLossOrderGuaranteedHedgingNotAllowed,
        StopLossOrderGuaranteedMinimumDistanceNotMet,
        StopLossOrderNotCancelable,
        StopLossOrderNotReplaceable,
        StopLossOrderGuaranteedLevelRestrictionExceeded,
        StopLossOrderPriceAndDistanceBothSpecified,
        StopLossOrderPriceAndDistanceBothMissing,
        StopLossOrderWouldViolateFifoViolationSafeguard,
        StopLossOrderRmoMutualExclusivityMutuallyExclusiveViolation,
        StopLossOrderRmoMutualExclusivityGsloExcludesOthersViolation,
        StopLossOnFillRequiredForPendingOrder,
        StopLossOnFillGuaranteedNotAllowed,
        StopLossOnFillGuaranteedRequired,
        StopLossOnFillPriceMissing,
        StopLossOnFillPriceInvalid,
        StopLossOnFillPricePrecisionExceeded,
        StopLossOnFillGuaranteedMinimumDistanceNotMet,
        StopLossOnFillGuaranteedLevelRestrictionExceeded,
        StopLossOnFillDistanceInvalid,
        StopLossOnFillPriceDistanceMaximumExceeded,
        StopLossOnFillDistancePrecisionExceeded,
        StopLossOnFillPriceAndDistanceBothSpecified,
        StopLossOnFillPriceAndDistanceBothMissing,
        StopLossOnFillTimeInForceMissing,
        StopLossOnFillTimeInForceInvalid,
        StopLossOnFillGtdTimestampMissing,
        StopLossOnFillGtdTimestampInPast,
        StopLossOnFillClientOrderIdInvalid,
        StopLossOnFillClientOrderTagInvalid,
        StopLossOnFillClientOrderCommentInvalid,
        StopLossOnFillTriggerConditionMissing,
        StopLossOnFillTriggerConditionInvalid,
        GuaranteedStopLossOrderAlreadyExists,
        GuaranteedStopLossOrderRequired,
        GuaranteedStopLossOrderPriceWithinSpread,
        GuaranteedStopLossOrderNotAllowed,
        GuaranteedStopLossOrderHaltedCreateViolation,
        GuaranteedStopLossOrderCreateViolation,
        GuaranteedStopLossOrderHaltedTightenViolation,
        GuaranteedStopLossOrderTightenViolation,
        GuaranteedStopLossOrderHedgingNotAllowed,
        GuaranteedStopLossOrderMinimumDistanceNotMet,
        GuaranteedStopLossOrderNotCancelable,
        GuaranteedStopLossOrderHaltedNotCancelable,
        GuaranteedStopLossOrderNotReplaceable,
        GuaranteedStopLossOrderHaltedNotReplaceable,
        GuaranteedStopLossOrderLevelRestrictionVolumeExceeded,
        GuaranteedStopLossOrderLevelRestrictionPriceRangeExceeded,
        GuaranteedStopLossOrderPriceAndDistanceBothSpecified,
        GuaranteedStopLossOrderPriceAndDistanceBothMissing,
        GuaranteedStopLossOrderWouldViolateFifoViolationSafeguard,
        GuaranteedStopLossOrderRmoMutualExclusivityMutuallyExclusiveViolation,
        GuaranteedStopLossOrderRmoMutualExclusivityGsloExcludesOthersViolation,
        GuaranteedStopLossOnFillRequiredForPendingOrder,
        GuaranteedStopLossOnFillNotAllowed,
        GuaranteedStopLossOnFillRequired,
        GuaranteedStopLossOnFillPriceMissing,
        GuaranteedStopLossOnFillPriceInvalid,
        GuaranteedStopLossOnFillPricePrecisionExceeded,
        GuaranteedStopLossOnFillMinimumDistanceNotMet,
        GuaranteedStopLossOnFillLevelRestrictionVolumeExceeded,
        GuaranteedStopLossOnFillLevelRestrictionPriceRangeExceeded,
        GuaranteedStopLossOnFillDistanceInvalid,
        GuaranteedStopLossOnFillPriceDistanceMaximumExceeded,
        GuaranteedStopLossOnFillDistancePrecisionExceeded,
        GuaranteedStopLossOnFillPriceAndDistanceBothSpecified,
        GuaranteedStopLossOnFillPriceAndDistanceBothMissing,
        GuaranteedStopLossOnFillTimeInForceMissing,
        GuaranteedStopLossOnFillTimeInForceInvalid,
        GuaranteedStopLossOnFillGtdTimestampMissing,
        GuaranteedStopLossOnFillGtdTimestampInPast,
        GuaranteedStopLossOnFillClientOrderIdInvalid,
        GuaranteedStopLossOnFillClientOrderTagInvalid,
        GuaranteedStopLossOnFillClientOrderCommentInvalid,
        GuaranteedStopLossOnFillTriggerConditionMissing,
        GuaranteedStopLossOnFillTriggerConditionInvalid,
        TrailingStopLossOrderAlreadyExists,
        TrailingStopLossOrderWouldViolateFifoViolationSafeguard,
        TrailingStopLossOrderRmoMutualExclusivityMutuallyExclusiveViolation,
        TrailingStopLossOrderRmoMutualExclusivityGsloExcludesOthersViolation,
        TrailingStopLossOnFillPriceDistanceMissing,
        TrailingStopLossOnFillPriceDistanceInvalid,
        TrailingStopLossOnFillPriceDistancePrecisionExceeded,
        TrailingStopLossOnFillPriceDistanceMaximumExceeded,
        TrailingStopLossOnFillPriceDistanceMinimumNotMet,
        TrailingStopLossOnFillTimeInForceMissing,
        TrailingStopLossOnFillTimeInForceInvalid,
        TrailingStopLossOnFillGtdTimestampMissing,
        TrailingStopLossOnFillGtdTimestampInPast,
        TrailingStopLossOnFillClientOrderIdInvalid,
        TrailingStopLossOnFillClientOrderTagInvalid,
        TrailingStopLossOnFillClientOrderCommentInvalid,
        TrailingStopLossOrdersNotSupported,
        TrailingStopLossOnFillTriggerConditionMissing,
        TrailingStopLossOnFillTriggerConditionInvalid,
        CloseTradeTypeMissing,
        CloseTradePartialUnitsMissing,
        CloseTradeUnitsExceedTradeSize,
        CloseoutPositionDoesntExist,
        CloseoutPositionIncompleteSpecification,
        CloseoutPositionUnitsExceedPositionSize,
        CloseoutPositionReject,
        CloseoutPositionPartialUnitsMissing,
        MarkupGroupIdInvalid,
        PositionAggregationModeInvalid,
        AdminConfigureDataMissing,
        MarginRateInvalid,
        MarginRateWouldTriggerCloseout,
        AliasInvalid,
        ClientConfigureDataMissing,
        MarginRateWouldTriggerMarginCall,
        AmountInvalid,
        InsufficientFunds,
        AmountMissing,
        FundingReasonMissing,
        OcaOrderIdsStopLossNotAllowed,
        ClientExtensionsDataMissing,
        ReplacingOrderInvalid,
        ReplacingTradeIdInvalid,
        OrderCancelWouldTriggerCloseout,
    }
);

/// Fields every Transaction carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionBase {
    /// Sequential, account-unique Transaction ID.
    pub id: TransactionID,
    /// When the Transaction was created.
    pub time: DateTime,
    /// User that caused the Transaction.
    #[serde(rename = "userID")]
    pub user_id: i64,
    /// Account the Transaction belongs to.
    #[serde(rename = "accountID")]
    pub account_id: AccountID,
    /// Shared by all Transactions created atomically by one request.
    #[serde(rename = "batchID")]
    pub batch_id: TransactionID,
    /// Request that caused the Transaction. Absent for server-initiated
    /// Transactions.
    #[serde(rename = "requestID", skip_serializing_if = "Option::is_none")]
    pub request_id: Option<RequestID>,
    /// Which Transaction variant this is.
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    #[serde(rename = "divisionID", skip_serializing_if = "Option::is_none")]
    pub division_id: Option<i64>,
    #[serde(rename = "siteID", skip_serializing_if = "Option::is_none")]
    pub site_id: Option<i64>,
    #[serde(rename = "accountUserID", skip_serializing_if = "Option::is_none")]
    pub account_user_id: Option<i64>,
    #[serde(rename = "accountNumber", skip_serializing_if = "Option::is_none")]
    pub account_number: Option<i64>,
    #[serde(rename = "homeCurrency", skip_serializing_if = "Option::is_none")]
    pub home_currency: Option<Currency>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReopenTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfigureTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_rate: Option<DecimalNumber>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfigureRejectTransaction {
    #[serde(flatten)]
    pub rejected: ClientConfigureTransaction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<TransactionRejectReason>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferFundsTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    /// Positive for deposits, negative for withdrawals.
    pub amount: AccountUnits,
    /// Only present for client or administrative transfers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_reason: Option<FundingReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Balance after the transfer. Absent on rejects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_balance: Option<AccountUnits>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferFundsRejectTransaction {
    #[serde(flatten)]
    pub rejected: TransferFundsTransaction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<TransactionRejectReason>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOrderTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    pub instrument: InstrumentName,
    /// Positive for a long Order, negative for a short one.
    pub units: DecimalNumber,
    pub time_in_force: TimeInForce,
    /// Worst price the Order may fill at. Only present if the client set one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_bound: Option<PriceValue>,
    #[serde(default)]
    pub position_fill: OrderPositionFill,
    /// Only present when `reason` is TRADE_CLOSE.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_close: Option<MarketOrderTradeClose>,
    /// Only present when `reason` is POSITION_CLOSEOUT.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_position_closeout: Option<MarketOrderPositionCloseout>,
    /// Only present when `reason` is POSITION_CLOSEOUT.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_position_closeout: Option<MarketOrderPositionCloseout>,
    /// Only present when `reason` is MARGIN_CLOSEOUT.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_closeout: Option<MarketOrderMarginCloseout>,
    /// Only present when `reason` is DELAYED_TRADE_CLOSE.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delayed_trade_close: Option<MarketOrderDelayedTradeClose>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<MarketOrderReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
    #[serde(flatten)]
    pub on_fill: OnFillOrders,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOrderRejectTransaction {
    #[serde(flatten)]
    pub rejected: MarketOrderTransaction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<TransactionRejectReason>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedPriceOrderTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    pub instrument: InstrumentName,
    pub units: DecimalNumber,
    pub price: PriceValue,
    #[serde(default)]
    pub position_fill: OrderPositionFill,
    pub trade_state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FixedPriceOrderReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
    #[serde(flatten)]
    pub on_fill: OnFillOrders,
}

/// Links from a created Order record to the Order it replaces and the
/// Transaction that cancelled that Order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplacementLinks {
    #[serde(rename = "replacesOrderID", skip_serializing_if = "Option::is_none")]
    pub replaces_order_id: Option<OrderID>,
    #[serde(rename = "cancellingTransactionID", skip_serializing_if = "Option::is_none")]
    pub cancelling_transaction_id: Option<TransactionID>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitOrderTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    pub instrument: InstrumentName,
    pub units: DecimalNumber,
    pub price: PriceValue,
    pub time_in_force: TimeInForce,
    /// Only present when `time_in_force` is GTD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(default)]
    pub position_fill: OrderPositionFill,
    #[serde(default)]
    pub trigger_condition: OrderTriggerCondition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<LimitOrderReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
    #[serde(flatten)]
    pub on_fill: OnFillOrders,
    #[serde(flatten)]
    pub links: ReplacementLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopOrderTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    pub instrument: InstrumentName,
    pub units: DecimalNumber,
    pub price: PriceValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_bound: Option<PriceValue>,
    pub time_in_force: TimeInForce,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(default)]
    pub position_fill: OrderPositionFill,
    #[serde(default)]
    pub trigger_condition: OrderTriggerCondition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<StopOrderReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
    #[serde(flatten)]
    pub on_fill: OnFillOrders,
    #[serde(flatten)]
    pub links: ReplacementLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketIfTouchedOrderTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    pub instrument: InstrumentName,
    pub units: DecimalNumber,
    pub price: PriceValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_bound: Option<PriceValue>,
    pub time_in_force: TimeInForce,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(default)]
    pub position_fill: OrderPositionFill,
    #[serde(default)]
    pub trigger_condition: OrderTriggerCondition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<MarketIfTouchedOrderReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
    #[serde(flatten)]
    pub on_fill: OnFillOrders,
    #[serde(flatten)]
    pub links: ReplacementLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeProfitOrderTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    #[serde(rename = "tradeID")]
    pub trade_id: TradeID,
    #[serde(rename = "clientTradeID", skip_serializing_if = "Option::is_none")]
    pub client_trade_id: Option<ClientID>,
    pub price: PriceValue,
    pub time_in_force: TimeInForce,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(default)]
    pub trigger_condition: OrderTriggerCondition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<TakeProfitOrderReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
    /// The fill that opened the Trade, when created on fill.
    #[serde(rename = "orderFillTransactionID", skip_serializing_if = "Option::is_none")]
    pub order_fill_transaction_id: Option<TransactionID>,
    #[serde(flatten)]
    pub links: ReplacementLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopLossOrderTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    #[serde(rename = "tradeID")]
    pub trade_id: TradeID,
    #[serde(rename = "clientTradeID", skip_serializing_if = "Option::is_none")]
    pub client_trade_id: Option<ClientID>,
    /// Absent when the Order was created with `distance`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceValue>,
    /// Absent when the Order was created with `price`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<DecimalNumber>,
    pub time_in_force: TimeInForce,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(default)]
    pub trigger_condition: OrderTriggerCondition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<StopLossOrderReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
    #[serde(rename = "orderFillTransactionID", skip_serializing_if = "Option::is_none")]
    pub order_fill_transaction_id: Option<TransactionID>,
    #[serde(flatten)]
    pub links: ReplacementLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuaranteedStopLossOrderTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    #[serde(rename = "tradeID")]
    pub trade_id: TradeID,
    #[serde(rename = "clientTradeID", skip_serializing_if = "Option::is_none")]
    pub client_trade_id: Option<ClientID>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<DecimalNumber>,
    pub time_in_force: TimeInForce,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(default)]
    pub trigger_condition: OrderTriggerCondition,
    /// Fee charged if the order is triggered and filled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_execution_premium: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<GuaranteedStopLossOrderReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
    #[serde(rename = "orderFillTransactionID", skip_serializing_if = "Option::is_none")]
    pub order_fill_transaction_id: Option<TransactionID>,
    #[serde(flatten)]
    pub links: ReplacementLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailingStopLossOrderTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    #[serde(rename = "tradeID")]
    pub trade_id: TradeID,
    #[serde(rename = "clientTradeID", skip_serializing_if = "Option::is_none")]
    pub client_trade_id: Option<ClientID>,
    pub distance: DecimalNumber,
    pub time_in_force: TimeInForce,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_time: Option<DateTime>,
    #[serde(default)]
    pub trigger_condition: OrderTriggerCondition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<TrailingStopLossOrderReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
    #[serde(rename = "orderFillTransactionID", skip_serializing_if = "Option::is_none")]
    pub order_fill_transaction_id: Option<TransactionID>,
    #[serde(flatten)]
    pub links: ReplacementLinks,
}

macro_rules! order_reject {
    ($(#[$meta:meta])* $name:ident($inner:ty)) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            #[serde(flatten)]
            pub rejected: $inner,
            /// The Order the rejected request meant to replace.
            #[serde(rename = "intendedReplacesOrderID", skip_serializing_if = "Option::is_none")]
            pub intended_replaces_order_id: Option<OrderID>,
            #[serde(rename = "rejectReason", skip_serializing_if = "Option::is_none")]
            pub reject_reason: Option<TransactionRejectReason>,
        }
    };
}

order_reject!(LimitOrderRejectTransaction(LimitOrderTransaction));
order_reject!(StopOrderRejectTransaction(StopOrderTransaction));
order_reject!(MarketIfTouchedOrderRejectTransaction(MarketIfTouchedOrderTransaction));
order_reject!(TakeProfitOrderRejectTransaction(TakeProfitOrderTransaction));
order_reject!(StopLossOrderRejectTransaction(StopLossOrderTransaction));
order_reject!(GuaranteedStopLossOrderRejectTransaction(GuaranteedStopLossOrderTransaction));
order_reject!(TrailingStopLossOrderRejectTransaction(TrailingStopLossOrderTransaction));

/// A Trade opened by an Order fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeOpen {
    /// The new Trade.
    #[serde(rename = "tradeID")]
    pub trade_id: TradeID,
    /// Units opened.
    pub units: DecimalNumber,
    /// Average price the Trade opened at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_execution_fee: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_guaranteed_execution_fee: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions: Option<ClientExtensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_spread_cost: Option<AccountUnits>,
    /// Margin the Trade required when it opened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_margin_required: Option<AccountUnits>,
}

/// A Trade reduced or closed by an Order fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeReduce {
    /// The reduced or closed Trade.
    #[serde(rename = "tradeID")]
    pub trade_id: TradeID,
    /// Units closed. Opposite in sign to the Trade.
    pub units: DecimalNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceValue>,
    /// Profit or loss realized by the close, in home currency.
    #[serde(rename = "realizedPL", skip_serializing_if = "Option::is_none")]
    pub realized_pl: Option<AccountUnits>,
    /// Financing paid or collected on the closed units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financing: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_financing: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_financing: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financing_rate: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_execution_fee: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_guaranteed_execution_fee: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_spread_cost: Option<AccountUnits>,
}

/// An Order was filled, opening, reducing or closing Trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFillTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    /// The Order that filled.
    #[serde(rename = "orderID")]
    pub order_id: OrderID,
    /// Client ID of the Order, if it has one.
    #[serde(rename = "clientOrderID", skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<ClientID>,
    pub instrument: InstrumentName,
    /// Units filled. Positive for a buy, negative for a sell.
    pub units: DecimalNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_conversion_factors: Option<HomeConversionFactors>,
    /// Volume-weighted average price across all fills.
    #[serde(rename = "fullVWAP", skip_serializing_if = "Option::is_none")]
    pub full_vwap: Option<PriceValue>,
    /// Price data the fill was executed against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_price: Option<ClientPrice>,
    pub reason: OrderFillReason,
    /// Realized profit or loss across closed and reduced Trades.
    /// Only present if the fill realized any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pl: Option<AccountUnits>,
    #[serde(rename = "quotePL", skip_serializing_if = "Option::is_none")]
    pub quote_pl: Option<DecimalNumber>,
    /// Financing paid or collected on the closed units.
    /// Only present if the fill closed any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financing: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_financing: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_financing: Option<DecimalNumber>,
    /// Commission charged. Only present on accounts that pay commission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guaranteed_execution_fee: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_guaranteed_execution_fee: Option<DecimalNumber>,
    /// Balance after the fill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_balance: Option<AccountUnits>,
    /// Only present if the fill opened a Trade.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_opened: Option<TradeOpen>,
    /// Trades fully closed by the fill. Empty if none were.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trades_closed: Vec<TradeReduce>,
    /// Only present if the fill partially closed a Trade.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_reduced: Option<TradeReduce>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_spread_cost: Option<AccountUnits>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCancelTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    /// The cancelled Order.
    #[serde(rename = "orderID")]
    pub order_id: OrderID,
    #[serde(rename = "clientOrderID", skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<ClientID>,
    pub reason: OrderCancelReason,
    /// Set when the cancel is part of a replacement.
    #[serde(rename = "replacedByOrderID", skip_serializing_if = "Option::is_none")]
    pub replaced_by_order_id: Option<OrderID>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCancelRejectTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    #[serde(rename = "orderID")]
    pub order_id: OrderID,
    #[serde(rename = "clientOrderID", skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<ClientID>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<TransactionRejectReason>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderClientExtensionsModifyTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    #[serde(rename = "orderID")]
    pub order_id: OrderID,
    #[serde(rename = "clientOrderID", skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<ClientID>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_extensions_modify: Option<ClientExtensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_client_extensions_modify: Option<ClientExtensions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderClientExtensionsModifyRejectTransaction {
    #[serde(flatten)]
    pub rejected: OrderClientExtensionsModifyTransaction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<TransactionRejectReason>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeClientExtensionsModifyTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    #[serde(rename = "tradeID")]
    pub trade_id: TradeID,
    #[serde(rename = "clientTradeID", skip_serializing_if = "Option::is_none")]
    pub client_trade_id: Option<ClientID>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_client_extensions_modify: Option<ClientExtensions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeClientExtensionsModifyRejectTransaction {
    #[serde(flatten)]
    pub rejected: TradeClientExtensionsModifyTransaction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<TransactionRejectReason>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginCallEnterTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginCallExtendTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    pub extension_number: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginCallExitTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
}

/// Open Trades that should have been closed but could not be, and will be
/// closed when their instrument becomes tradeable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayedTradeClosureTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<MarketOrderReason>,
    #[serde(rename = "tradeIDs", default, skip_serializing_if = "Vec::is_empty")]
    pub trade_ids: Vec<TradeID>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenTradeFinancing {
    #[serde(rename = "tradeID")]
    pub trade_id: TradeID,
    pub financing: AccountUnits,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_financing: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_financing: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financing_rate: Option<DecimalNumber>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionFinancing {
    pub instrument: InstrumentName,
    pub financing: AccountUnits,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_financing: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_financing: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_conversion_factors: Option<HomeConversionFactors>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub open_trade_financings: Vec<OpenTradeFinancing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_financing_mode: Option<AccountFinancingMode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyFinancingTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    /// Total financing paid or collected across all Positions.
    pub financing: AccountUnits,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_balance: Option<AccountUnits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_financing_mode: Option<AccountFinancingMode>,
    /// Per-Position breakdown of `financing`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub position_financings: Vec<PositionFinancing>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenTradeDividendAdjustment {
    #[serde(rename = "tradeID")]
    pub trade_id: TradeID,
    pub dividend_adjustment: AccountUnits,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_dividend_adjustment: Option<DecimalNumber>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendAdjustmentTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
    pub instrument: InstrumentName,
    pub dividend_adjustment: AccountUnits,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_dividend_adjustment: Option<DecimalNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_conversion_factors: Option<HomeConversionFactors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_balance: Option<AccountUnits>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub open_trade_dividend_adjustments: Vec<OpenTradeDividendAdjustment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetResettablePlTransaction {
    #[serde(flatten)]
    pub base: TransactionBase,
}

/// A Transaction of any type.
///
/// Serializes as the inner record. Deserialization reads `type` first and
/// then decodes the matching variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Transaction {
    Create(CreateTransaction),
    Close(CloseTransaction),
    Reopen(ReopenTransaction),
    ClientConfigure(ClientConfigureTransaction),
    ClientConfigureReject(ClientConfigureRejectTransaction),
    TransferFunds(TransferFundsTransaction),
    TransferFundsReject(TransferFundsRejectTransaction),
    MarketOrder(MarketOrderTransaction),
    MarketOrderReject(MarketOrderRejectTransaction),
    FixedPriceOrder(FixedPriceOrderTransaction),
    LimitOrder(LimitOrderTransaction),
    LimitOrderReject(LimitOrderRejectTransaction),
    StopOrder(StopOrderTransaction),
    StopOrderReject(StopOrderRejectTransaction),
    MarketIfTouchedOrder(MarketIfTouchedOrderTransaction),
    MarketIfTouchedOrderReject(MarketIfTouchedOrderRejectTransaction),
    TakeProfitOrder(TakeProfitOrderTransaction),
    TakeProfitOrderReject(TakeProfitOrderRejectTransaction),
    StopLossOrder(StopLossOrderTransaction),
    StopLossOrderReject(StopLossOrderRejectTransaction),
    GuaranteedStopLossOrder(GuaranteedStopLossOrderTransaction),
    GuaranteedStopLossOrderReject(GuaranteedStopLossOrderRejectTransaction),
    TrailingStopLossOrder(TrailingStopLossOrderTransaction),
    TrailingStopLossOrderReject(TrailingStopLossOrderRejectTransaction),
    OrderFill(OrderFillTransaction),
    OrderCancel(OrderCancelTransaction),
    OrderCancelReject(OrderCancelRejectTransaction),
    OrderClientExtensionsModify(OrderClientExtensionsModifyTransaction),
    OrderClientExtensionsModifyReject(OrderClientExtensionsModifyRejectTransaction),
    TradeClientExtensionsModify(TradeClientExtensionsModifyTransaction),
    TradeClientExtensionsModifyReject(TradeClientExtensionsModifyRejectTransaction),
    MarginCallEnter(MarginCallEnterTransaction),
    MarginCallExtend(MarginCallExtendTransaction),
    MarginCallExit(MarginCallExitTransaction),
    DelayedTradeClosure(DelayedTradeClosureTransaction),
    DailyFinancing(DailyFinancingTransaction),
    DividendAdjustment(DividendAdjustmentTransaction),
    ResetResettablePl(ResetResettablePlTransaction),
}

impl Transaction {
    pub fn base(&self) -> &TransactionBase {
        match self {
            Transaction::Create(t) => &t.base,
            Transaction::Close(t) => &t.base,
            Transaction::Reopen(t) => &t.base,
            Transaction::ClientConfigure(t) => &t.base,
            Transaction::ClientConfigureReject(t) => &t.rejected.base,
            Transaction::TransferFunds(t) => &t.base,
            Transaction::TransferFundsReject(t) => &t.rejected.base,
            Transaction::MarketOrder(t) => &t.base,
            Transaction::MarketOrderReject(t) => &t.rejected.base,
            Transaction::FixedPriceOrder(t) => &t.base,
            Transaction::LimitOrder(t) => &t.base,
            Transaction::LimitOrderReject(t) => &t.rejected.base,
            Transaction::StopOrder(t) => &t.base,
            Transaction::StopOrderReject(t) => &t.rejected.base,
            Transaction::MarketIfTouchedOrder(t) => &t.base,
            Transaction::MarketIfTouchedOrderReject(t) => &t.rejected.base,
            Transaction::TakeProfitOrder(t) => &t.base,
            Transaction::TakeProfitOrderReject(t) => &t.rejected.base,
            Transaction::StopLossOrder(t) => &t.base,
            Transaction::StopLossOrderReject(t) => &t.rejected.base,
            Transaction::GuaranteedStopLossOrder(t) => &t.base,
            Transaction::GuaranteedStopLossOrderReject(t) => &t.rejected.base,
            Transaction::TrailingStopLossOrder(t) => &t.base,
            Transaction::TrailingStopLossOrderReject(t) => &t.rejected.base,
            Transaction::OrderFill(t) => &t.base,
            Transaction::OrderCancel(t) => &t.base,
            Transaction::OrderCancelReject(t) => &t.base,
            Transaction::OrderClientExtensionsModify(t) => &t.base,
            Transaction::OrderClientExtensionsModifyReject(t) => &t.rejected.base,
            Transaction::TradeClientExtensionsModify(t) => &t.base,
            Transaction::TradeClientExtensionsModifyReject(t) => &t.rejected.base,
            Transaction::MarginCallEnter(t) => &t.base,
            Transaction::MarginCallExtend(t) => &t.base,
            Transaction::MarginCallExit(t) => &t.base,
            Transaction::DelayedTradeClosure(t) => &t.base,
            Transaction::DailyFinancing(t) => &t.base,
            Transaction::DividendAdjustment(t) => &t.base,
            Transaction::ResetResettablePl(t) => &t.base,
        }
    }

    pub fn id(&self) -> &TransactionID {
        &self.base().id
    }

    pub fn time(&self) -> &DateTime {
        &self.base().time
    }

    pub fn batch_id(&self) -> &TransactionID {
        &self.base().batch_id
    }

    pub fn account_id(&self) -> &AccountID {
        &self.base().account_id
    }

    pub fn request_id(&self) -> Option<&RequestID> {
        self.base().request_id.as_ref()
    }

    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Transaction::Create(_) => TransactionType::Create,
            Transaction::Close(_) => TransactionType::Close,
            Transaction::Reopen(_) => TransactionType::Reopen,
            Transaction::ClientConfigure(_) => TransactionType::ClientConfigure,
            Transaction::ClientConfigureReject(_) => TransactionType::ClientConfigureReject,
            Transaction::TransferFunds(_) => TransactionType::TransferFunds,
            Transaction::TransferFundsReject(_) => TransactionType::TransferFundsReject,
            Transaction::MarketOrder(_) => TransactionType::MarketOrder,
            Transaction::MarketOrderReject(_) => TransactionType::MarketOrderReject,
            Transaction::FixedPriceOrder(_) => TransactionType::FixedPriceOrder,
            Transaction::LimitOrder(_) => TransactionType::LimitOrder,
            Transaction::LimitOrderReject(_) => TransactionType::LimitOrderReject,
            Transaction::StopOrder(_) => TransactionType::StopOrder,
            Transaction::StopOrderReject(_) => TransactionType::StopOrderReject,
            Transaction::MarketIfTouchedOrder(_) => TransactionType::MarketIfTouchedOrder,
            Transaction::MarketIfTouchedOrderReject(_) => TransactionType::MarketIfTouchedOrderReject,
            Transaction::TakeProfitOrder(_) => TransactionType::TakeProfitOrder,
            Transaction::TakeProfitOrderReject(_) => TransactionType::TakeProfitOrderReject,
            Transaction::StopLossOrder(_) => TransactionType::StopLossOrder,
            Transaction::StopLossOrderReject(_) => TransactionType::StopLossOrderReject,
            Transaction::GuaranteedStopLossOrder(_) => TransactionType::GuaranteedStopLossOrder,
            Transaction::GuaranteedStopLossOrderReject(_) => TransactionType::GuaranteedStopLossOrderReject,
            Transaction::TrailingStopLossOrder(_) => TransactionType::TrailingStopLossOrder,
            Transaction::TrailingStopLossOrderReject(_) => TransactionType::TrailingStopLossOrderReject,
            Transaction::OrderFill(_) => TransactionType::OrderFill,
            Transaction::OrderCancel(_) => TransactionType::OrderCancel,
            Transaction::OrderCancelReject(_) => TransactionType::OrderCancelReject,
            Transaction::OrderClientExtensionsModify(_) => TransactionType::OrderClientExtensionsModify,
            Transaction::OrderClientExtensionsModifyReject(_) => TransactionType::OrderClientExtensionsModifyReject,
            Transaction::TradeClientExtensionsModify(_) => TransactionType::TradeClientExtensionsModify,
            Transaction::TradeClientExtensionsModifyReject(_) => TransactionType::TradeClientExtensionsModifyReject,
            Transaction::MarginCallEnter(_) => TransactionType::MarginCallEnter,
            Transaction::MarginCallExtend(_) => TransactionType::MarginCallExtend,
            Transaction::MarginCallExit(_) => TransactionType::MarginCallExit,
            Transaction::DelayedTradeClosure(_) => TransactionType::DelayedTradeClosure,
            Transaction::DailyFinancing(_) => TransactionType::DailyFinancing,
            Transaction::DividendAdjustment(_) => TransactionType::DividendAdjustment,
            Transaction::ResetResettablePl(_) => TransactionType::ResetResettablePl,
        }
    }

    /// Reject reason, for reject variants that carry one.
    pub fn reject_reason(&self) -> Option<TransactionRejectReason> {
        match self {
            Transaction::ClientConfigureReject(t) => t.reject_reason,
            Transaction::TransferFundsReject(t) => t.reject_reason,
            Transaction::MarketOrderReject(t) => t.reject_reason,
            Transaction::LimitOrderReject(t) => t.reject_reason,
            Transaction::StopOrderReject(t) => t.reject_reason,
            Transaction::MarketIfTouchedOrderReject(t) => t.reject_reason,
            Transaction::TakeProfitOrderReject(t) => t.reject_reason,
            Transaction::StopLossOrderReject(t) => t.reject_reason,
            Transaction::GuaranteedStopLossOrderReject(t) => t.reject_reason,
            Transaction::TrailingStopLossOrderReject(t) => t.reject_reason,
            Transaction::OrderCancelReject(t) => t.reject_reason,
            Transaction::OrderClientExtensionsModifyReject(t) => t.reject_reason,
            Transaction::TradeClientExtensionsModifyReject(t) => t.reject_reason,
            _ => None,
        }
    }

    pub fn is_reject(&self) -> bool {
        self.transaction_type().as_ref().ends_with("_REJECT")
    }
}

impl<'de> Deserialize<'de> for Transaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        decode::transaction(raw.get()).map_err(serde::de::Error::custom)
    }
}

/// Keepalive frame on the transaction stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionHeartbeat {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "lastTransactionID")]
    pub last_transaction_id: TransactionID,
    pub time: DateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityRegenerationScheduleStep {
    pub timestamp: DateTime,
    pub bid_liquidity_used: DecimalNumber,
    pub ask_liquidity_used: DecimalNumber,
}

/// How liquidity consumed by a fill is regenerated over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityRegenerationSchedule {
    pub steps: Vec<LiquidityRegenerationScheduleStep>,
}
