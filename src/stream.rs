//! Streaming demultiplexer for the pricing and transaction streams.
//!
//! A producer task reads the response body, frames it into lines, drops
//! heartbeats and pushes decoded events into a bounded channel. The
//! consumer holds an [`EventStream`]; dropping it aborts the producer and
//! releases the connection.

use crate::decode;
use crate::error::{Error, Result, VariantFamily};
use crate::types::{ClientPrice, PricingHeartbeat, Transaction, TransactionHeartbeat, PRICE_TYPE};
use futures_util::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

/// `type` of keepalive frames on both streams.
pub const HEARTBEAT: &str = "HEARTBEAT";

/// A payload carried by a stream.
pub trait StreamEvent: Sized + Send + 'static {
    /// Shape of this stream's keepalive frames.
    type Heartbeat: DeserializeOwned + fmt::Debug;

    /// Stream name for logs.
    const NAME: &'static str;

    /// Decode a non-heartbeat line whose `type` is `kind`.
    fn decode(kind: &str, line: &str) -> Result<Self>;
}

impl StreamEvent for ClientPrice {
    type Heartbeat = PricingHeartbeat;
    const NAME: &'static str = "pricing";

    fn decode(kind: &str, line: &str) -> Result<Self> {
        if kind != PRICE_TYPE {
            return Err(Error::UnknownVariant {
                family: VariantFamily::Stream,
                discriminant: kind.to_string(),
            });
        }
        decode::body(line)
    }
}

impl StreamEvent for Transaction {
    type Heartbeat = TransactionHeartbeat;
    const NAME: &'static str = "transaction";

    fn decode(kind: &str, line: &str) -> Result<Self> {
        decode::transaction_of(kind, line)
    }
}

/// Longest frame accepted before the framer gives up on it. Price and
/// transaction frames are a few KiB at most.
pub const MAX_FRAME_LEN: usize = 1024 * 1024;

/// Splits a byte stream into newline-terminated lines.
///
/// Each byte is scanned once. A frame longer than the limit is dropped up
/// to its terminating newline, and a frame that is not valid UTF-8 is
/// dropped whole.
#[derive(Debug)]
pub struct LineFramer {
    buf: Vec<u8>,
    max_len: usize,
    // Inside an oversized frame; bytes are ignored until the next newline.
    discarding: bool,
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::with_max_len(MAX_FRAME_LEN)
    }
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            buf: Vec::new(),
            max_len: max_len.max(1),
            discarding: false,
        }
    }

    /// Feed a chunk and return every line it completes. Blank lines are
    /// dropped and a trailing `\r` is stripped.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        let mut rest = chunk;

        while let Some(pos) = rest.iter().position(|b| *b == b'\n') {
            if self.discarding {
                self.discarding = false;
            } else {
                self.buf.extend_from_slice(&rest[..pos]);
                if self.buf.len() > self.max_len {
                    warn!("dropping frame of {} bytes, limit is {}", self.buf.len(), self.max_len);
                } else if let Some(line) = Self::line(&self.buf) {
                    lines.push(line);
                }
            }
            self.buf.clear();
            rest = &rest[pos + 1..];
        }

        if !self.discarding {
            self.buf.extend_from_slice(rest);
            if self.buf.len() > self.max_len {
                warn!("dropping frame over {} bytes", self.max_len);
                self.buf = Vec::new();
                self.discarding = true;
            }
        }
        lines
    }

    /// Flush an unterminated final line at end of input.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buf);
        if std::mem::take(&mut self.discarding) {
            return None;
        }
        Self::line(&rest)
    }

    fn line(bytes: &[u8]) -> Option<String> {
        let text = match std::str::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!("dropping frame that is not valid UTF-8: {}", e);
                return None;
            }
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Consumer handle for an open stream.
///
/// Yields events in wire order. Ends after the connection closes, after a
/// read error (delivered as the last item) or after [`close`](Self::close).
pub struct EventStream<T> {
    rx: mpsc::Receiver<Result<T>>,
    task: JoinHandle<()>,
}

impl<T> EventStream<T> {
    /// Next event, or `None` once the stream has ended.
    pub async fn recv(&mut self) -> Option<Result<T>> {
        self.rx.recv().await
    }

    /// Stop the producer and release the connection. Events already
    /// buffered can still be drained with [`recv`](Self::recv).
    pub fn close(&mut self) {
        self.rx.close();
        self.task.abort();
    }

    /// True once the producer task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl<T> Stream for EventStream<T> {
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

impl<T> Drop for EventStream<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl<T> fmt::Debug for EventStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("finished", &self.task.is_finished())
            .finish()
    }
}

/// Spawn a producer over `body` and return the consumer handle.
///
/// `capacity` bounds the number of undelivered events; when it is reached
/// the producer stops reading until the consumer catches up. `idle_timeout`
/// limits the silence between chunks.
pub fn spawn<T, S, B, E>(body: S, capacity: usize, idle_timeout: Option<Duration>) -> EventStream<T>
where
    T: StreamEvent,
    S: Stream<Item = std::result::Result<B, E>> + Send + Unpin + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<Error> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let task = tokio::spawn(produce(body, tx, idle_timeout));
    EventStream { rx, task }
}

async fn produce<T, S, B, E>(mut body: S, tx: mpsc::Sender<Result<T>>, idle_timeout: Option<Duration>)
where
    T: StreamEvent,
    S: Stream<Item = std::result::Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Into<Error>,
{
    info!("{} stream opened", T::NAME);
    let mut framer = LineFramer::new();

    loop {
        let next = tokio::select! {
            _ = tx.closed() => {
                debug!("{} stream consumer gone, stopping", T::NAME);
                return;
            }
            next = next_chunk(&mut body, idle_timeout) => next,
        };

        match next {
            Some(Some(Ok(chunk))) => {
                for line in framer.push(chunk.as_ref()) {
                    if !dispatch(&tx, &line).await {
                        debug!("{} stream consumer gone, stopping", T::NAME);
                        return;
                    }
                }
            }
            Some(Some(Err(e))) => {
                let err: Error = e.into();
                warn!("{} stream read error: {}", T::NAME, err);
                let _ = tx.send(Err(err)).await;
                return;
            }
            Some(None) => {
                if let Some(line) = framer.finish() {
                    dispatch(&tx, &line).await;
                }
                info!("{} stream closed by server", T::NAME);
                return;
            }
            None => {
                // `next_chunk` only returns None when the idle timer fired.
                let idle = idle_timeout.unwrap_or_default();
                warn!("{} stream idle for {:?}, giving up", T::NAME, idle);
                let _ = tx.send(Err(Error::StreamIdle(idle))).await;
                return;
            }
        }
    }
}

async fn next_chunk<S>(body: &mut S, idle_timeout: Option<Duration>) -> Option<Option<S::Item>>
where
    S: Stream + Unpin,
{
    match idle_timeout {
        Some(limit) => tokio::time::timeout(limit, body.next()).await.ok(),
        None => Some(body.next().await),
    }
}

/// Decode one line and deliver it. Returns false once the consumer is gone.
async fn dispatch<T: StreamEvent>(tx: &mpsc::Sender<Result<T>>, line: &str) -> bool {
    let kind = match decode::discriminant(line) {
        Ok(kind) => kind,
        Err(e) => {
            warn!("skipping malformed {} frame: {}", T::NAME, e);
            return true;
        }
    };

    if kind == HEARTBEAT {
        match serde_json::from_str::<T::Heartbeat>(line) {
            Ok(heartbeat) => trace!(?heartbeat, "{} heartbeat", T::NAME),
            Err(_) => trace!("{} heartbeat", T::NAME),
        }
        return true;
    }

    match T::decode(&kind, line) {
        Ok(event) => tx.send(Ok(event)).await.is_ok(),
        Err(e) => {
            warn!("skipping {} frame of type {}: {}", T::NAME, kind, e);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    // =========================================================================
    // LineFramer Tests
    // =========================================================================

    #[test]
    fn test_framer_split_chunks() {
        let mut framer = LineFramer::new();
        assert!(framer.push(b"{\"a\":").is_empty());
        assert_eq!(framer.push(b"1}\n{\"b\""), vec!["{\"a\":1}"]);
        assert_eq!(framer.push(b":2}\n"), vec!["{\"b\":2}"]);
        assert!(framer.finish().is_none());
    }

    #[test]
    fn test_framer_crlf_and_blank_lines() {
        let mut framer = LineFramer::new();
        let lines = framer.push(b"one\r\n\r\n\ntwo\r\n");
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_framer_drops_invalid_utf8() {
        let mut framer = LineFramer::new();
        let lines = framer.push(b"{\"a\":1}\n{\"i\":\"EUR\xff_USD\"}\n{\"b\":2}\n");
        assert_eq!(lines, vec!["{\"a\":1}", "{\"b\":2}"]);

        assert!(framer.push(b"\xfe\xff").is_empty());
        assert!(framer.finish().is_none());
    }

    #[test]
    fn test_framer_multibyte_split_across_chunks() {
        let mut framer = LineFramer::new();
        let text = "{\"n\":\"caf\u{e9}\"}\n".as_bytes();
        // Split inside the two-byte character.
        let split = text.len() - 4;
        assert!(framer.push(&text[..split]).is_empty());
        assert_eq!(framer.push(&text[split..]), vec!["{\"n\":\"caf\u{e9}\"}"]);
    }

    #[test]
    fn test_framer_drops_oversized_frame() {
        let mut framer = LineFramer::with_max_len(8);
        assert!(framer.push(b"0123456").is_empty());
        assert!(framer.push(b"789abcdef").is_empty());
        assert!(framer.push(b"ghij").is_empty());
        assert_eq!(framer.push(b"klm\nshort\n"), vec!["short"]);

        assert_eq!(framer.push(b"123456789\nok\n"), vec!["ok"]);
        assert!(framer.push(b"far too long").is_empty());
        assert!(framer.finish().is_none());
        assert_eq!(framer.push(b"next\n"), vec!["next"]);
    }

    #[test]
    fn test_framer_line_over_many_chunks() {
        let mut framer = LineFramer::new();
        let line = format!("{{\"pad\":\"{}\"}}", "x".repeat(4096));
        for chunk in line.as_bytes().chunks(3) {
            assert!(framer.push(chunk).is_empty());
        }
        assert_eq!(framer.push(b"\n"), vec![line]);
    }

    #[test]
    fn test_framer_trailing_line() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.push(b"first\nlast"), vec!["first"]);
        assert_eq!(framer.finish().as_deref(), Some("last"));
        assert!(framer.finish().is_none());
    }

    // =========================================================================
    // Producer Tests
    // =========================================================================

    fn price(instrument: &str) -> String {
        format!(
            r#"{{"type":"PRICE","instrument":"{instrument}","time":"2024-03-01T10:00:00Z","tradeable":true,"bids":[{{"price":"1.1","liquidity":1000}}],"asks":[{{"price":"1.2","liquidity":1000}}]}}"#
        )
    }

    fn chunks(lines: &[String]) -> Vec<std::result::Result<Vec<u8>, Error>> {
        lines.iter().map(|l| Ok(format!("{l}\n").into_bytes())).collect()
    }

    #[tokio::test]
    async fn test_unknown_pricing_frame_skipped() {
        let lines = vec![
            r#"{"type":"CANDLE","time":"2024-03-01T10:00:00Z"}"#.to_string(),
            price("EUR_USD"),
        ];
        let mut events: EventStream<ClientPrice> = spawn(stream::iter(chunks(&lines)), 8, None);
        let first = events.recv().await.unwrap().unwrap();
        assert_eq!(first.instrument.as_str(), "EUR_USD");
        assert!(events.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_close_drains_buffer_then_ends() {
        let lines = vec![price("EUR_USD"), price("USD_JPY")];
        let body = stream::iter(chunks(&lines)).chain(stream::pending());
        let mut events: EventStream<ClientPrice> = spawn(body, 8, None);
        let first = events.recv().await.unwrap().unwrap();
        assert_eq!(first.instrument.as_str(), "EUR_USD");
        events.close();
        while let Some(item) = events.recv().await {
            assert!(item.is_ok());
        }
    }
}
