use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Which OANDA environment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// fxTrade Practice (demo accounts).
    #[default]
    Practice,
    /// fxTrade (real money).
    Live,
}

impl Environment {
    pub fn api_url(&self) -> &'static str {
        match self {
            Environment::Practice => "https://api-fxpractice.oanda.com",
            Environment::Live => "https://api-fxtrade.oanda.com",
        }
    }

    pub fn stream_url(&self) -> &'static str {
        match self {
            Environment::Practice => "https://stream-fxpractice.oanda.com",
            Environment::Live => "https://stream-fxtrade.oanda.com",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "practice" | "demo" => Ok(Environment::Practice),
            "live" | "trade" => Ok(Environment::Live),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Environment::Practice => "practice",
            Environment::Live => "live",
        })
    }
}

/// Client configuration.
#[derive(Clone)]
pub struct Config {
    pub environment: Environment,
    /// REST base URL, without the `/v3` prefix.
    pub api_url: String,
    /// Streaming base URL, without the `/v3` prefix.
    pub stream_url: String,
    /// Personal access token.
    pub access_token: Option<String>,
    /// Default account for callers that work with one account.
    pub account_id: Option<String>,
    /// Timeout for non-streaming requests.
    pub request_timeout: Duration,
    /// TCP/TLS connect timeout (all requests).
    pub connect_timeout: Duration,
    /// Events buffered between a stream's reader and its consumer.
    pub stream_buffer: usize,
    /// Longest silence tolerated on an open stream. `None` disables.
    pub stream_idle_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Config {
    /// Configuration for `environment` with its default hosts.
    pub fn new(environment: Environment, access_token: impl Into<String>) -> Self {
        Self {
            environment,
            api_url: environment.api_url().to_string(),
            stream_url: environment.stream_url().to_string(),
            access_token: Some(access_token.into()),
            account_id: None,
            request_timeout: Duration::from_millis(30_000),
            connect_timeout: Duration::from_millis(10_000),
            stream_buffer: 1024,
            stream_idle_timeout: Some(Duration::from_millis(30_000)),
            user_agent: default_user_agent(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let environment: Environment = env::var("OANDA_ENVIRONMENT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let stream_idle_ms: u64 = env::var("OANDA_STREAM_IDLE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30_000);

        Self {
            environment,
            api_url: env::var("OANDA_API_URL").unwrap_or_else(|_| environment.api_url().to_string()),
            stream_url: env::var("OANDA_STREAM_URL").unwrap_or_else(|_| environment.stream_url().to_string()),
            access_token: env::var("OANDA_ACCESS_TOKEN").ok().filter(|v| !v.is_empty()),
            account_id: env::var("OANDA_ACCOUNT_ID").ok().filter(|v| !v.is_empty()),
            request_timeout: Duration::from_millis(
                env::var("OANDA_REQUEST_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30_000),
            ),
            connect_timeout: Duration::from_millis(
                env::var("OANDA_CONNECT_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10_000),
            ),
            stream_buffer: env::var("OANDA_STREAM_BUFFER")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(1024),
            stream_idle_timeout: (stream_idle_ms > 0).then(|| Duration::from_millis(stream_idle_ms)),
            user_agent: env::var("OANDA_USER_AGENT").unwrap_or_else(|_| default_user_agent()),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_stream_url(mut self, url: impl Into<String>) -> Self {
        self.stream_url = url.into();
        self
    }

    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_stream_buffer(mut self, capacity: usize) -> Self {
        self.stream_buffer = capacity.max(1);
        self
    }

    pub fn with_stream_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.stream_idle_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

// Keep the token out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("environment", &self.environment)
            .field("api_url", &self.api_url)
            .field("stream_url", &self.stream_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("account_id", &self.account_id)
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("stream_buffer", &self.stream_buffer)
            .field("stream_idle_timeout", &self.stream_idle_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn default_user_agent() -> String {
    format!("oanda-v20-rust/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Environment Tests
    // =========================================================================

    #[test]
    fn test_environment_hosts() {
        assert_eq!(Environment::Practice.api_url(), "https://api-fxpractice.oanda.com");
        assert_eq!(Environment::Practice.stream_url(), "https://stream-fxpractice.oanda.com");
        assert_eq!(Environment::Live.api_url(), "https://api-fxtrade.oanda.com");
        assert_eq!(Environment::Live.stream_url(), "https://stream-fxtrade.oanda.com");
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!("practice".parse::<Environment>().unwrap(), Environment::Practice);
        assert_eq!("LIVE".parse::<Environment>().unwrap(), Environment::Live);
        assert!("staging".parse::<Environment>().is_err());
        assert_eq!(Environment::default(), Environment::Practice);
    }

    // =========================================================================
    // Config Tests
    // =========================================================================

    #[test]
    fn test_config_new_defaults() {
        let config = Config::new(Environment::Live, "token");
        assert_eq!(config.api_url, "https://api-fxtrade.oanda.com");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.stream_buffer, 1024);
        assert_eq!(config.stream_idle_timeout, Some(Duration::from_secs(30)));
        assert!(config.user_agent.starts_with("oanda-v20-rust/"));
    }

    #[test]
    fn test_config_builders() {
        let config = Config::new(Environment::Practice, "token")
            .with_api_url("http://127.0.0.1:9000")
            .with_stream_buffer(0)
            .with_stream_idle_timeout(None)
            .with_account_id("101-004-1-001");
        assert_eq!(config.api_url, "http://127.0.0.1:9000");
        assert_eq!(config.stream_url, "https://stream-fxpractice.oanda.com");
        assert_eq!(config.stream_buffer, 1);
        assert!(config.stream_idle_timeout.is_none());
        assert_eq!(config.account_id.as_deref(), Some("101-004-1-001"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::new(Environment::Practice, "secret-token-value");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-token-value"));
        assert!(debug.contains("<redacted>"));
    }
}
