use crate::types::{
    AccountConfigurationReject, ApiErrorBody, CancelOrderReject, ClosePositionReject, CloseTradeReject,
    CreateOrderReject, OrderClientExtensionsReject, RejectDetails, ReplaceOrderReject, TradeClientExtensionsReject,
    TradeOrdersReject, TransactionID, TransactionRejectReason,
};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Which polymorphic family a discriminant was read for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantFamily {
    Order,
    Transaction,
    Stream,
}

impl fmt::Display for VariantFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VariantFamily::Order => "order",
            VariantFamily::Transaction => "transaction",
            VariantFamily::Stream => "stream",
        })
    }
}

/// Typed body of a documented 4xx response, by endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    CreateOrder(CreateOrderReject),
    ReplaceOrder(ReplaceOrderReject),
    CancelOrder(CancelOrderReject),
    OrderClientExtensions(OrderClientExtensionsReject),
    CloseTrade(CloseTradeReject),
    TradeClientExtensions(TradeClientExtensionsReject),
    TradeOrders(TradeOrdersReject),
    ClosePosition(ClosePositionReject),
    AccountConfiguration(AccountConfigurationReject),
    /// Endpoints whose error body is only `errorCode`/`errorMessage`.
    Api(ApiErrorBody),
}

impl Rejection {
    fn details(&self) -> Option<&RejectDetails> {
        match self {
            Rejection::CreateOrder(r) => Some(&r.details),
            Rejection::ReplaceOrder(r) => Some(&r.details),
            Rejection::CancelOrder(r) => Some(&r.details),
            Rejection::OrderClientExtensions(r) => Some(&r.details),
            Rejection::CloseTrade(r) => Some(&r.details),
            Rejection::TradeClientExtensions(r) => Some(&r.details),
            Rejection::TradeOrders(r) => Some(&r.details),
            Rejection::ClosePosition(r) => Some(&r.details),
            Rejection::AccountConfiguration(r) => Some(&r.details),
            Rejection::Api(_) => None,
        }
    }

    fn error_body(&self) -> &ApiErrorBody {
        match self {
            Rejection::CreateOrder(r) => &r.details.error,
            Rejection::ReplaceOrder(r) => &r.details.error,
            Rejection::CancelOrder(r) => &r.details.error,
            Rejection::OrderClientExtensions(r) => &r.details.error,
            Rejection::CloseTrade(r) => &r.details.error,
            Rejection::TradeClientExtensions(r) => &r.details.error,
            Rejection::TradeOrders(r) => &r.details.error,
            Rejection::ClosePosition(r) => &r.details.error,
            Rejection::AccountConfiguration(r) => &r.details.error,
            Rejection::Api(body) => body,
        }
    }

    pub fn error_code(&self) -> Option<&str> {
        self.error_body().error_code.as_deref()
    }

    pub fn error_message(&self) -> &str {
        &self.error_body().error_message
    }

    pub fn last_transaction_id(&self) -> Option<&TransactionID> {
        self.details().and_then(|d| d.last_transaction_id.as_ref())
    }

    /// Reject reason of the first reject Transaction in the body.
    pub fn reject_reason(&self) -> Option<TransactionRejectReason> {
        match self {
            Rejection::CreateOrder(r) => r.order_reject_transaction.as_ref()?.reject_reason(),
            Rejection::ReplaceOrder(r) => r.order_reject_transaction.as_ref()?.reject_reason(),
            Rejection::CancelOrder(r) => r.order_cancel_reject_transaction.as_ref()?.reject_reason,
            Rejection::OrderClientExtensions(r) => {
                r.order_client_extensions_modify_reject_transaction.as_ref()?.reject_reason
            }
            Rejection::CloseTrade(r) => r.order_reject_transaction.as_ref()?.reject_reason,
            Rejection::TradeClientExtensions(r) => {
                r.trade_client_extensions_modify_reject_transaction.as_ref()?.reject_reason
            }
            Rejection::TradeOrders(r) => r
                .take_profit_order_cancel_reject_transaction
                .as_ref()
                .and_then(|t| t.reject_reason)
                .or_else(|| r.take_profit_order_reject_transaction.as_ref()?.reject_reason)
                .or_else(|| r.stop_loss_order_cancel_reject_transaction.as_ref()?.reject_reason)
                .or_else(|| r.stop_loss_order_reject_transaction.as_ref()?.reject_reason)
                .or_else(|| r.trailing_stop_loss_order_cancel_reject_transaction.as_ref()?.reject_reason)
                .or_else(|| r.trailing_stop_loss_order_reject_transaction.as_ref()?.reject_reason)
                .or_else(|| r.guaranteed_stop_loss_order_cancel_reject_transaction.as_ref()?.reject_reason)
                .or_else(|| r.guaranteed_stop_loss_order_reject_transaction.as_ref()?.reject_reason),
            Rejection::ClosePosition(r) => r
                .long_order_reject_transaction
                .as_ref()
                .and_then(|t| t.reject_reason)
                .or_else(|| r.short_order_reject_transaction.as_ref()?.reject_reason),
            Rejection::AccountConfiguration(r) => r.client_configure_reject_transaction.as_ref()?.reject_reason,
            Rejection::Api(_) => None,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error_code() {
            Some(code) => write!(f, "{}: {}", code, self.error_message()),
            None => f.write_str(self.error_message()),
        }
    }
}

/// Client error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Connection, TLS, timeout or body read failure.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("stream idle for {0:?}")]
    StreamIdle(Duration),

    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("request rejected ({status}): {rejection}")]
    Rejected { status: u16, rejection: Box<Rejection> },

    #[error("schema violation{}: {message}", field.as_ref().map(|f| format!(" at `{f}`")).unwrap_or_default())]
    SchemaViolation { field: Option<String>, message: String },

    #[error("unknown variant discriminant {family} `{discriminant}`")]
    UnknownVariant {
        family: VariantFamily,
        discriminant: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Error::Rejected { rejection, .. } => Some(rejection),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Rejected { status, .. } | Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
