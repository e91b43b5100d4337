use super::{Client, Reject};
use crate::error::Result;
use crate::types::{
    AccountID, CloseTradeRequest, CloseTradeResponse, CloseUnits, TradeClientExtensionsRequest,
    TradeClientExtensionsResponse, TradeOrdersRequest, TradeOrdersResponse, TradeResponse, TradeSpecifier,
    TradesQuery, TradesResponse,
};
use reqwest::Method;

impl Client {
    pub async fn trades(&self, account: &AccountID, query: &TradesQuery) -> Result<TradesResponse> {
        self.get_with(&["accounts", account.as_str(), "trades"], query, Reject::Api)
            .await
    }

    pub async fn open_trades(&self, account: &AccountID) -> Result<TradesResponse> {
        self.get(&["accounts", account.as_str(), "openTrades"]).await
    }

    pub async fn trade(&self, account: &AccountID, trade: &TradeSpecifier) -> Result<TradeResponse> {
        self.get(&["accounts", account.as_str(), "trades", trade.as_str()]).await
    }

    /// Close all or part of an open Trade.
    pub async fn close_trade(
        &self,
        account: &AccountID,
        trade: &TradeSpecifier,
        units: CloseUnits,
    ) -> Result<CloseTradeResponse> {
        self.send(
            Method::PUT,
            &["accounts", account.as_str(), "trades", trade.as_str(), "close"],
            &CloseTradeRequest { units },
            Reject::CloseTrade,
        )
        .await
    }

    pub async fn set_trade_client_extensions(
        &self,
        account: &AccountID,
        trade: &TradeSpecifier,
        request: &TradeClientExtensionsRequest,
    ) -> Result<TradeClientExtensionsResponse> {
        self.send(
            Method::PUT,
            &["accounts", account.as_str(), "trades", trade.as_str(), "clientExtensions"],
            request,
            Reject::TradeClientExtensions,
        )
        .await
    }

    /// Create, replace or cancel a Trade's take profit and stop loss orders.
    pub async fn set_trade_orders(
        &self,
        account: &AccountID,
        trade: &TradeSpecifier,
        request: &TradeOrdersRequest,
    ) -> Result<TradeOrdersResponse> {
        self.send(
            Method::PUT,
            &["accounts", account.as_str(), "trades", trade.as_str(), "orders"],
            request,
            Reject::TradeOrders,
        )
        .await
    }
}
