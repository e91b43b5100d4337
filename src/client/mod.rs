//! REST and streaming client for the v20 API.
//!
//! [`Client`] owns one `reqwest::Client` (and its connection pool) shared by
//! every request and stream. Endpoint groups live in submodules as further
//! `impl Client` blocks.

mod accounts;
mod instruments;
mod orders;
mod positions;
mod pricing;
mod trades;
mod transactions;

use crate::config::Config;
use crate::decode;
use crate::error::{Error, Rejection, Result};
use crate::stream::{self, EventStream, StreamEvent};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

const API_VERSION: &str = "v3";

/// Status codes the API documents for error bodies.
const DOCUMENTED_ERRORS: &[u16] = &[400, 401, 403, 404, 405];

/// Which typed body a documented 4xx carries for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reject {
    Api,
    CreateOrder,
    ReplaceOrder,
    CancelOrder,
    OrderClientExtensions,
    CloseTrade,
    TradeClientExtensions,
    TradeOrders,
    ClosePosition,
    AccountConfiguration,
}

impl Reject {
    fn decode(self, status: u16, body: &[u8]) -> Result<Rejection> {
        let typed = match self {
            Reject::Api => false,
            Reject::AccountConfiguration => matches!(status, 400 | 403),
            _ => matches!(status, 400 | 404),
        };
        if !typed {
            return decode::slice(body).map(Rejection::Api);
        }

        Ok(match self {
            Reject::Api => Rejection::Api(decode::slice(body)?),
            Reject::CreateOrder => Rejection::CreateOrder(decode::slice(body)?),
            Reject::ReplaceOrder => Rejection::ReplaceOrder(decode::slice(body)?),
            Reject::CancelOrder => Rejection::CancelOrder(decode::slice(body)?),
            Reject::OrderClientExtensions => Rejection::OrderClientExtensions(decode::slice(body)?),
            Reject::CloseTrade => Rejection::CloseTrade(decode::slice(body)?),
            Reject::TradeClientExtensions => Rejection::TradeClientExtensions(decode::slice(body)?),
            Reject::TradeOrders => Rejection::TradeOrders(decode::slice(body)?),
            Reject::ClosePosition => Rejection::ClosePosition(decode::slice(body)?),
            Reject::AccountConfiguration => Rejection::AccountConfiguration(decode::slice(body)?),
        })
    }
}

/// v20 API client. Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_url: Url,
    stream_url: Url,
    request_timeout: Duration,
    stream_buffer: usize,
    stream_idle_timeout: Option<Duration>,
}

impl Client {
    /// Create a client from configuration. Fails without an access token.
    pub fn new(config: &Config) -> Result<Self> {
        let token = config
            .access_token
            .as_deref()
            .ok_or_else(|| Error::Config("OANDA_ACCESS_TOKEN is not set".to_string()))?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| Error::Config("access token is not a valid header value".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("Accept-Datetime-Format", HeaderValue::from_static("RFC3339"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout)
            .build()?;

        debug!("OANDA client for {} ({})", config.api_url, config.environment);

        Ok(Self {
            http,
            api_url: Self::base_url(&config.api_url)?,
            stream_url: Self::base_url(&config.stream_url)?,
            request_timeout: config.request_timeout,
            stream_buffer: config.stream_buffer.max(1),
            stream_idle_timeout: config.stream_idle_timeout,
        })
    }

    fn base_url(raw: &str) -> Result<Url> {
        let url = Url::parse(raw).map_err(|e| Error::Config(format!("invalid base URL {}: {}", raw, e)))?;
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!("{} cannot be a base URL", raw)));
        }
        Ok(url)
    }

    /// Join `segments` under the versioned base. Each segment is
    /// percent-encoded, so client IDs cannot escape their path position.
    fn url(base: &Url, segments: &[&str], query: &str) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("{} cannot be a base URL", base)))?
            .pop_if_empty()
            .push(API_VERSION)
            .extend(segments.iter().copied());
        if !query.is_empty() {
            url.set_query(Some(query));
        }
        Ok(url)
    }

    fn encode_query<Q: Serialize + ?Sized>(query: &Q) -> Result<String> {
        serde_urlencoded::to_string(query).map_err(|e| Error::InvalidRequest(e.to_string()))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T> {
        self.get_with(path, &(), Reject::Api).await
    }

    pub(crate) async fn get_with<T, Q>(&self, path: &[&str], query: &Q, reject: Reject) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = Self::url(&self.api_url, path, &Self::encode_query(query)?)?;
        debug!("GET {}", url.path());
        self.execute(self.http.get(url), reject).await
    }

    pub(crate) async fn send<T, B>(&self, method: Method, path: &[&str], body: &B, reject: Reject) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body).map_err(|e| Error::InvalidRequest(e.to_string()))?;
        let url = Self::url(&self.api_url, path, "")?;
        debug!("{} {}", method, url.path());
        self.execute(self.http.request(method, url).body(body), reject).await
    }

    pub(crate) async fn send_empty<T: DeserializeOwned>(&self, method: Method, path: &[&str], reject: Reject) -> Result<T> {
        let url = Self::url(&self.api_url, path, "")?;
        debug!("{} {}", method, url.path());
        self.execute(self.http.request(method, url), reject).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder, reject: Reject) -> Result<T> {
        let response = request.timeout(self.request_timeout).send().await?;
        let path = response.url().path().to_string();
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return decode::slice(&body);
        }

        warn!("{} returned {}", path, status);
        Err(Self::error_for(status, &body, reject))
    }

    fn error_for(status: StatusCode, body: &[u8], reject: Reject) -> Error {
        let code = status.as_u16();
        if !DOCUMENTED_ERRORS.contains(&code) {
            return Error::UnexpectedStatus {
                status: code,
                body: String::from_utf8_lossy(body).into_owned(),
            };
        }

        match reject.decode(code, body) {
            Ok(rejection) => Error::Rejected {
                status: code,
                rejection: Box::new(rejection),
            },
            Err(e) => e,
        }
    }

    /// Open a streaming endpoint. No request timeout applies; the idle
    /// timeout guards against a silent connection instead.
    pub(crate) async fn open_stream<T, Q>(&self, path: &[&str], query: &Q) -> Result<EventStream<T>>
    where
        T: StreamEvent,
        Q: Serialize + ?Sized,
    {
        let url = Self::url(&self.stream_url, path, &Self::encode_query(query)?)?;
        debug!("GET {} (stream)", url.path());
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let response_path = response.url().path().to_string();
            let body = response.bytes().await?;
            warn!("{} returned {}", response_path, status);
            return Err(Self::error_for(status, &body, Reject::Api));
        }

        Ok(stream::spawn(
            Box::pin(response.bytes_stream()),
            self.stream_buffer,
            self.stream_idle_timeout,
        ))
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("api_url", &self.api_url.as_str())
            .field("stream_url", &self.stream_url.as_str())
            .finish()
    }
}
