use super::{Client, Reject};
use crate::error::Result;
use crate::types::{
    AccountID, CancelOrderResponse, CreateOrderResponse, OrderBody, OrderClientExtensionsRequest,
    OrderClientExtensionsResponse, OrderRequest, OrderResponse, OrderSpecifier, OrdersQuery, OrdersResponse,
    ReplaceOrderResponse,
};
use reqwest::Method;

impl Client {
    /// Create an Order. Whether it filled, was cancelled or is pending is
    /// told by which transactions the response carries.
    pub async fn create_order(&self, account: &AccountID, order: &OrderRequest) -> Result<CreateOrderResponse> {
        self.send(
            Method::POST,
            &["accounts", account.as_str(), "orders"],
            &OrderBody { order },
            Reject::CreateOrder,
        )
        .await
    }

    pub async fn orders(&self, account: &AccountID, query: &OrdersQuery) -> Result<OrdersResponse> {
        self.get_with(&["accounts", account.as_str(), "orders"], query, Reject::Api)
            .await
    }

    pub async fn pending_orders(&self, account: &AccountID) -> Result<OrdersResponse> {
        self.get(&["accounts", account.as_str(), "pendingOrders"]).await
    }

    pub async fn order(&self, account: &AccountID, order: &OrderSpecifier) -> Result<OrderResponse> {
        self.get(&["accounts", account.as_str(), "orders", order.as_str()]).await
    }

    /// Cancel `order` and create `replacement` in its place.
    pub async fn replace_order(
        &self,
        account: &AccountID,
        order: &OrderSpecifier,
        replacement: &OrderRequest,
    ) -> Result<ReplaceOrderResponse> {
        self.send(
            Method::PUT,
            &["accounts", account.as_str(), "orders", order.as_str()],
            &OrderBody { order: replacement },
            Reject::ReplaceOrder,
        )
        .await
    }

    pub async fn cancel_order(&self, account: &AccountID, order: &OrderSpecifier) -> Result<CancelOrderResponse> {
        self.send_empty(
            Method::PUT,
            &["accounts", account.as_str(), "orders", order.as_str(), "cancel"],
            Reject::CancelOrder,
        )
        .await
    }

    pub async fn set_order_client_extensions(
        &self,
        account: &AccountID,
        order: &OrderSpecifier,
        request: &OrderClientExtensionsRequest,
    ) -> Result<OrderClientExtensionsResponse> {
        self.send(
            Method::PUT,
            &["accounts", account.as_str(), "orders", order.as_str(), "clientExtensions"],
            request,
            Reject::OrderClientExtensions,
        )
        .await
    }
}
