//! Stream demultiplexer tests over synthetic bodies.

use futures_util::{stream, StreamExt};
use oanda_v20::stream::{spawn, EventStream};
use oanda_v20::{ClientPrice, Error, Transaction};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

type Chunk = Result<Vec<u8>, Error>;

fn price(instrument: &str, bid: &str) -> String {
    format!(
        r#"{{"type":"PRICE","instrument":"{instrument}","time":"2024-03-01T10:00:00.000000000Z","tradeable":true,"bids":[{{"price":"{bid}","liquidity":1000000}}],"asks":[{{"price":"1.50000","liquidity":1000000}}],"closeoutBid":"{bid}","closeoutAsk":"1.50000"}}"#
    )
}

fn pricing_heartbeat() -> String {
    r#"{"type":"HEARTBEAT","time":"2024-03-01T10:00:05.000000000Z"}"#.to_string()
}

fn transaction(id: u64) -> String {
    format!(
        r#"{{"id":"{id}","time":"2024-03-01T10:00:00Z","userID":1,"accountID":"101-004-1-001","batchID":"{id}","type":"DAILY_FINANCING","financing":"-0.0100"}}"#
    )
}

fn transaction_heartbeat(last: u64) -> String {
    format!(r#"{{"type":"HEARTBEAT","lastTransactionID":"{last}","time":"2024-03-01T10:00:05Z"}}"#)
}

/// Join lines into one body and cut it into fixed-size chunks, so frames
/// straddle chunk boundaries.
fn body(lines: &[String], chunk_size: usize) -> Vec<Chunk> {
    let bytes: Vec<u8> = lines.iter().flat_map(|l| format!("{l}\n").into_bytes()).collect();
    bytes.chunks(chunk_size).map(|c| Ok(c.to_vec())).collect()
}

async fn collect<T: oanda_v20::StreamEvent>(mut events: EventStream<T>) -> Vec<oanda_v20::Result<T>> {
    let mut out = Vec::new();
    while let Some(item) = events.recv().await {
        out.push(item);
    }
    out
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

// =========================================================================
// Filtering Tests
// =========================================================================

#[tokio::test]
async fn test_heartbeats_are_filtered() {
    let instruments = ["EUR_USD", "USD_JPY", "GBP_USD", "AUD_USD", "USD_CAD"];
    let mut lines = Vec::new();
    for (i, instrument) in instruments.iter().enumerate() {
        for _ in 0..(i % 3) {
            lines.push(pricing_heartbeat());
        }
        lines.push(price(instrument, "1.10000"));
    }
    lines.push(pricing_heartbeat());
    lines.push(pricing_heartbeat());

    let events: EventStream<ClientPrice> = spawn(stream::iter(body(&lines, 7)), 16, None);
    let received = collect(events).await;

    assert_eq!(received.len(), instruments.len());
    for (item, expected) in received.iter().zip(instruments) {
        let price = item.as_ref().unwrap();
        assert_eq!(price.instrument.as_str(), expected);
        assert_eq!(price.kind, "PRICE");
    }
}

#[tokio::test]
async fn test_malformed_line_is_skipped() {
    let lines = vec![
        price("EUR_USD", "1.08000"),
        r#"{"type":"PRICE","instrument":"#.to_string(),
        price("EUR_USD", "1.08010"),
    ];
    let events: EventStream<ClientPrice> = spawn(stream::iter(body(&lines, 64)), 16, None);
    let received = collect(events).await;

    assert_eq!(received.len(), 2);
    assert!(received.iter().all(|r| r.is_ok()));
}

#[tokio::test]
async fn test_invalid_utf8_line_is_skipped() {
    // "EUR\xff_USD" is not valid UTF-8.
    let mut bad = price("EUR_USD", "1.08005").into_bytes();
    let underscore = bad.iter().position(|b| *b == b'_').unwrap();
    bad.insert(underscore, 0xff);

    let mut bytes = format!("{}\n", price("EUR_USD", "1.08000")).into_bytes();
    bytes.extend(bad);
    bytes.push(b'\n');
    bytes.extend(format!("{}\n", price("USD_JPY", "150.100")).into_bytes());

    let chunks: Vec<Chunk> = bytes.chunks(40).map(|c| Ok(c.to_vec())).collect();
    let events: EventStream<ClientPrice> = spawn(stream::iter(chunks), 16, None);
    let instruments: Vec<String> = collect(events)
        .await
        .into_iter()
        .map(|p| p.unwrap().instrument.to_string())
        .collect();
    assert_eq!(instruments, vec!["EUR_USD", "USD_JPY"]);
}

#[tokio::test]
async fn test_unknown_transaction_type_is_skipped() {
    let lines = vec![
        transaction(1),
        r#"{"id":"2","time":"2024-03-01T10:00:00Z","type":"SOMETHING_NEW"}"#.to_string(),
        transaction(3),
    ];
    let events: EventStream<Transaction> = spawn(stream::iter(body(&lines, 64)), 16, None);
    let ids: Vec<String> = collect(events)
        .await
        .into_iter()
        .map(|t| t.unwrap().id().to_string())
        .collect();
    assert_eq!(ids, vec!["1", "3"]);
}

// =========================================================================
// Ordering Tests
// =========================================================================

#[tokio::test]
async fn test_transactions_arrive_in_order() {
    let mut lines = Vec::new();
    for id in 1..=200u64 {
        lines.push(transaction(id));
        if id % 25 == 0 {
            lines.push(transaction_heartbeat(id));
        }
    }

    // A small buffer keeps the producer blocked on the consumer.
    let mut events: EventStream<Transaction> = spawn(stream::iter(body(&lines, 97)), 4, None);
    let mut expected = 1u64;
    while let Some(item) = events.recv().await {
        let transaction = item.unwrap();
        assert_eq!(transaction.id().as_u64(), Some(expected));
        expected += 1;
        if expected % 10 == 0 {
            tokio::task::yield_now().await;
        }
    }
    assert_eq!(expected, 201);
}

#[tokio::test]
async fn test_stream_trait_yields_events() {
    let lines = vec![price("EUR_USD", "1.1"), pricing_heartbeat(), price("USD_JPY", "150.1")];
    let events: EventStream<ClientPrice> = spawn(stream::iter(body(&lines, 16)), 16, None);
    let instruments: Vec<String> = events.map(|p| p.unwrap().instrument.to_string()).collect().await;
    assert_eq!(instruments, vec!["EUR_USD", "USD_JPY"]);
}

// =========================================================================
// Termination Tests
// =========================================================================

#[tokio::test]
async fn test_read_error_ends_stream() {
    let mut chunks = body(&[price("EUR_USD", "1.1")], 256);
    chunks.push(Err(Error::InvalidRequest("connection reset by peer".to_string())));
    chunks.extend(body(&[price("USD_JPY", "150.1")], 256));

    let events: EventStream<ClientPrice> = spawn(stream::iter(chunks), 16, None);
    let received = collect(events).await;

    assert_eq!(received.len(), 2);
    assert!(received[0].is_ok());
    assert!(matches!(received[1], Err(Error::InvalidRequest(_))));
}

#[tokio::test]
async fn test_idle_timeout() {
    let chunks = body(&[price("EUR_USD", "1.1")], 256);
    let silent = stream::iter(chunks).chain(stream::pending());
    let mut events: EventStream<ClientPrice> = spawn(silent, 16, Some(Duration::from_millis(50)));

    assert!(events.recv().await.unwrap().is_ok());
    match events.recv().await {
        Some(Err(Error::StreamIdle(idle))) => assert_eq!(idle, Duration::from_millis(50)),
        other => panic!("unexpected {other:?}"),
    }
    assert!(events.recv().await.is_none());
}

#[tokio::test]
async fn test_dropping_consumer_releases_body() {
    let released = Arc::new(AtomicBool::new(false));
    let flag = DropFlag(released.clone());
    let chunks = body(&[price("EUR_USD", "1.1")], 256);
    let open = stream::iter(chunks).chain(stream::pending()).map(move |chunk| {
        let _held = &flag;
        chunk
    });

    let mut events: EventStream<ClientPrice> = spawn(open, 16, None);
    assert!(events.recv().await.unwrap().is_ok());
    drop(events);

    for _ in 0..100 {
        if released.load(Ordering::SeqCst) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("body was not released after the consumer was dropped");
}

#[tokio::test]
async fn test_close_stops_producer() {
    let chunks = body(&[price("EUR_USD", "1.1")], 256);
    let open = stream::iter(chunks).chain(stream::pending());
    let mut events: EventStream<ClientPrice> = spawn(open, 16, None);
    assert!(events.recv().await.unwrap().is_ok());

    events.close();
    assert!(events.recv().await.is_none());
    for _ in 0..100 {
        if events.is_finished() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("producer still running after close");
}
