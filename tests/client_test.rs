//! Client tests against a local mock of the v20 API.

use axum::body::Body;
use axum::extract::{Path, RawQuery};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use futures_util::stream;
use oanda_v20::{
    AccountID, Client, ClientID, Config, Environment, Error, MarketOrderRequest, OrderID, OrderRequest, OrderSpecifier,
    PricingStreamQuery, Rejection, Transaction, TransactionID, TransactionRejectReason,
};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

const TOKEN: &str = "test-token";
const ACCOUNT: &str = "101-004-1234567-001";

fn authorized(headers: &HeaderMap) -> bool {
    let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
    let datetime = headers.get("accept-datetime-format").and_then(|v| v.to_str().ok());
    bearer == Some("Bearer test-token") && datetime == Some("RFC3339")
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"errorMessage": "Insufficient authorization to perform request."})),
    )
        .into_response()
}

fn transaction(id: u64, kind: &str, extra: Value) -> Value {
    let mut value = json!({
        "id": id.to_string(),
        "time": "2024-03-01T10:00:00.000000000Z",
        "userID": 1234567,
        "accountID": ACCOUNT,
        "batchID": id.to_string(),
        "type": kind,
    });
    if let (Some(target), Value::Object(fields)) = (value.as_object_mut(), extra) {
        target.extend(fields);
    }
    value
}

async fn summary(Path(account): Path<String>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "account": {
            "id": account,
            "currency": "USD",
            "createdByUserID": 1234567,
            "createdTime": "2023-01-05T09:00:00.000000000Z",
            "resettablePLTime": "0",
            "marginRate": "0.02",
            "openTradeCount": 1,
            "openPositionCount": 1,
            "pendingOrderCount": 0,
            "hedgingEnabled": false,
            "unrealizedPL": "12.3400",
            "NAV": "100012.3400",
            "marginUsed": "21.6824",
            "marginAvailable": "99990.6576",
            "balance": "100000.0000",
            "pl": "0.0000",
            "lastTransactionID": "1523"
        },
        "lastTransactionID": "1523"
    }))
    .into_response()
}

async fn changes(RawQuery(query): RawQuery) -> Response {
    if query.as_deref() != Some("sinceTransactionID=1523") {
        return (StatusCode::BAD_REQUEST, Json(json!({"errorMessage": "bad cursor"}))).into_response();
    }
    Json(json!({
        "changes": {
            "transactions": [transaction(1524, "DAILY_FINANCING", json!({"financing": "-0.0100"}))]
        },
        "state": {"NAV": "100012.3300"},
        "lastTransactionID": "1524"
    }))
    .into_response()
}

async fn create_order(Json(body): Json<Value>) -> Response {
    let order = &body["order"];
    if order["type"] != "MARKET" {
        return (StatusCode::BAD_REQUEST, Json(json!({"errorMessage": "unsupported"}))).into_response();
    }

    if order["units"] == "100" {
        let created = transaction(
            2000,
            "MARKET_ORDER",
            json!({"instrument": "EUR_USD", "units": "100", "timeInForce": "FOK", "reason": "CLIENT_ORDER"}),
        );
        let fill = transaction(
            2001,
            "ORDER_FILL",
            json!({
                "orderID": "2000", "batchID": "2000", "instrument": "EUR_USD", "units": "100",
                "reason": "MARKET_ORDER", "pl": "0.0000", "financing": "0.0000", "commission": "0.0000",
                "tradeOpened": {"tradeID": "2002", "units": "100", "price": "1.08412"}
            }),
        );
        return (
            StatusCode::CREATED,
            Json(json!({
                "orderCreateTransaction": created,
                "orderFillTransaction": fill,
                "relatedTransactionIDs": ["2000", "2001"],
                "lastTransactionID": "2001"
            })),
        )
            .into_response();
    }

    let reject = transaction(
        2003,
        "MARKET_ORDER_REJECT",
        json!({"instrument": "EUR_USD", "units": order["units"], "timeInForce": "FOK",
               "rejectReason": "INSUFFICIENT_MARGIN"}),
    );
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "orderRejectTransaction": reject,
            "relatedTransactionIDs": ["2003"],
            "lastTransactionID": "2003",
            "errorCode": "INSUFFICIENT_MARGIN",
            "errorMessage": "Insufficient margin to place the order"
        })),
    )
        .into_response()
}

/// Order 2010 also carries the client ID `desk#7?/a`.
async fn cancel_order(Path((_, order)): Path<(String, String)>) -> Response {
    if order != "2010" && order != "@desk#7?/a" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "orderCancelRejectTransaction": transaction(2011, "ORDER_CANCEL_REJECT",
                    json!({"orderID": order, "rejectReason": "ORDER_DOESNT_EXIST"})),
                "lastTransactionID": "2011",
                "errorCode": "ORDER_DOESNT_EXIST",
                "errorMessage": "The order does not exist"
            })),
        )
            .into_response();
    }
    Json(json!({
        "orderCancelTransaction": transaction(2012, "ORDER_CANCEL",
            json!({"orderID": "2010", "reason": "CLIENT_REQUEST"})),
        "relatedTransactionIDs": ["2012"],
        "lastTransactionID": "2012"
    }))
    .into_response()
}

async fn pending_orders() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance").into_response()
}

fn ndjson(lines: Vec<String>) -> Response {
    let chunks: Vec<Result<String, std::io::Error>> = lines.into_iter().map(|l| Ok(format!("{l}\n"))).collect();
    Response::new(Body::from_stream(stream::iter(chunks)))
}

async fn transaction_stream() -> Response {
    ndjson(vec![
        r#"{"type":"HEARTBEAT","lastTransactionID":"1523","time":"2024-03-01T10:00:05Z"}"#.to_string(),
        transaction(1524, "DAILY_FINANCING", json!({"financing": "-0.0100"})).to_string(),
        "not json".to_string(),
        r#"{"type":"HEARTBEAT","lastTransactionID":"1524","time":"2024-03-01T10:00:10Z"}"#.to_string(),
        transaction(1525, "MARGIN_CALL_ENTER", json!({})).to_string(),
    ])
}

async fn pricing_stream(RawQuery(query): RawQuery) -> Response {
    if query.as_deref() != Some("instruments=EUR_USD%2CUSD_JPY&snapshot=true") {
        return (StatusCode::BAD_REQUEST, Json(json!({"errorMessage": "bad instruments"}))).into_response();
    }
    let price = |instrument: &str| {
        json!({
            "type": "PRICE", "instrument": instrument, "time": "2024-03-01T10:00:00.000000000Z",
            "tradeable": true,
            "bids": [{"price": "1.08410", "liquidity": 1000000}],
            "asks": [{"price": "1.08425", "liquidity": 1000000}]
        })
        .to_string()
    };
    ndjson(vec![
        price("EUR_USD"),
        r#"{"type":"HEARTBEAT","time":"2024-03-01T10:00:05Z"}"#.to_string(),
        price("USD_JPY"),
    ])
}

async fn serve() -> Config {
    let router = Router::new()
        .route("/v3/accounts/:account/summary", get(summary))
        .route("/v3/accounts/:account/changes", get(changes))
        .route("/v3/accounts/:account/orders", post(create_order))
        .route("/v3/accounts/:account/orders/:order/cancel", put(cancel_order))
        .route("/v3/accounts/:account/pendingOrders", get(pending_orders))
        .route("/v3/accounts/:account/transactions/stream", get(transaction_stream))
        .route("/v3/accounts/:account/pricing/stream", get(pricing_stream));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Config::new(Environment::Practice, TOKEN)
        .with_api_url(format!("http://{addr}"))
        .with_stream_url(format!("http://{addr}"))
        .with_stream_idle_timeout(None)
}

fn account() -> AccountID {
    AccountID::new(ACCOUNT)
}

// =========================================================================
// Account Tests
// =========================================================================

#[tokio::test]
async fn test_account_summary_sends_auth_headers() {
    let client = Client::new(&serve().await).unwrap();
    let summary = client.account_summary(&account()).await.unwrap();

    assert_eq!(summary.account.id.as_str(), ACCOUNT);
    assert_eq!(summary.account.nav, dec!(100012.3400));
    assert!(summary.account.resettable_pl_time.is_none());
    assert_eq!(summary.last_transaction_id, TransactionID::new("1523"));
}

#[tokio::test]
async fn test_wrong_token_is_rejected() {
    let mut config = serve().await;
    config.access_token = Some("other".to_string());
    let client = Client::new(&config).unwrap();

    let err = client.account_summary(&account()).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(matches!(err.rejection(), Some(Rejection::Api(_))));
}

#[tokio::test]
async fn test_changes_since_cursor() {
    let client = Client::new(&serve().await).unwrap();
    let summary = client.account_summary(&account()).await.unwrap();

    let changes = client
        .account_changes(&account(), &summary.last_transaction_id)
        .await
        .unwrap();
    assert_eq!(changes.last_transaction_id, TransactionID::new("1524"));
    assert!(matches!(changes.changes.transactions[0], Transaction::DailyFinancing(_)));
    assert_eq!(changes.state.nav, Some(dec!(100012.3300)));
}

// =========================================================================
// Order Tests
// =========================================================================

#[tokio::test]
async fn test_market_order_fills() {
    let client = Client::new(&serve().await).unwrap();
    let request = OrderRequest::Market(MarketOrderRequest::new("EUR_USD", dec!(100)));

    let response = client.create_order(&account(), &request).await.unwrap();
    assert!(response.is_filled());
    assert!(!response.is_cancelled());
    assert!(matches!(response.order_create_transaction, Transaction::MarketOrder(_)));

    let fill = response.order_fill_transaction.as_ref().unwrap();
    assert_eq!(fill.order_id, OrderID::new("2000"));
    assert_eq!(fill.trade_opened.as_ref().map(|t| t.trade_id.as_str()), Some("2002"));
    assert_eq!(response.last_transaction_id, TransactionID::new("2001"));
}

#[tokio::test]
async fn test_market_order_rejected_with_typed_body() {
    let client = Client::new(&serve().await).unwrap();
    let request = OrderRequest::Market(MarketOrderRequest::new("EUR_USD", dec!(1000000000)));

    let err = client.create_order(&account(), &request).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    let rejection = err.rejection().unwrap();
    let Rejection::CreateOrder(body) = rejection else {
        panic!("Expected CreateOrder rejection, got {rejection:?}");
    };
    assert!(matches!(body.order_reject_transaction, Some(Transaction::MarketOrderReject(_))));
    assert_eq!(rejection.reject_reason(), Some(TransactionRejectReason::InsufficientMargin));
    assert_eq!(rejection.error_code(), Some("INSUFFICIENT_MARGIN"));
    assert_eq!(rejection.last_transaction_id(), Some(&TransactionID::new("2003")));
}

#[tokio::test]
async fn test_cancel_order() {
    let client = Client::new(&serve().await).unwrap();

    let cancelled = client
        .cancel_order(&account(), &OrderSpecifier::from(OrderID::new("2010")))
        .await
        .unwrap();
    assert_eq!(cancelled.order_cancel_transaction.order_id, OrderID::new("2010"));

    let err = client
        .cancel_order(&account(), &OrderSpecifier::from(OrderID::new("9999")))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    match err.rejection() {
        Some(rejection @ Rejection::CancelOrder(_)) => {
            assert_eq!(rejection.reject_reason(), Some(TransactionRejectReason::OrderDoesntExist));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_cancel_order_by_client_id_with_reserved_characters() {
    let client = Client::new(&serve().await).unwrap();
    let order = OrderSpecifier::client(&ClientID::new("desk#7?/a"));

    let cancelled = client.cancel_order(&account(), &order).await.unwrap();
    assert_eq!(cancelled.order_cancel_transaction.order_id, OrderID::new("2010"));
}

#[tokio::test]
async fn test_undocumented_status() {
    let client = Client::new(&serve().await).unwrap();
    match client.pending_orders(&account()).await {
        Err(Error::UnexpectedStatus { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "down for maintenance");
        }
        other => panic!("unexpected {other:?}"),
    }
}

// =========================================================================
// Streaming Tests
// =========================================================================

#[tokio::test]
async fn test_transaction_stream() {
    let client = Client::new(&serve().await).unwrap();
    let mut events = client.transaction_stream(&account()).await.unwrap();

    let mut ids = Vec::new();
    while let Some(item) = events.recv().await {
        ids.push(item.unwrap().id().to_string());
    }
    assert_eq!(ids, vec!["1524", "1525"]);
}

#[tokio::test]
async fn test_pricing_stream() {
    let client = Client::new(&serve().await).unwrap();
    let mut query = PricingStreamQuery::new(["EUR_USD", "USD_JPY"]);
    query.snapshot = Some(true);
    let mut events = client.pricing_stream(&account(), &query).await.unwrap();

    let first = events.recv().await.unwrap().unwrap();
    assert_eq!(first.instrument.as_str(), "EUR_USD");
    assert_eq!(first.best_bid(), Some(dec!(1.08410)));
    let second = events.recv().await.unwrap().unwrap();
    assert_eq!(second.instrument.as_str(), "USD_JPY");
    assert!(events.recv().await.is_none());
}

#[tokio::test]
async fn test_stream_open_failure() {
    let client = Client::new(&serve().await).unwrap();
    let query = PricingStreamQuery::new(["GBP_USD"]);
    let err = client.pricing_stream(&account(), &query).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
}
