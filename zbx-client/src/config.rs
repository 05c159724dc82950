//! Session configuration

use std::fmt;
use std::time::Duration;

/// Endpoint and credentials for one API session
///
/// Immutable once handed to a client.
#[derive(Clone)]
pub struct Config {
    /// Full URL of the JSON-RPC endpoint, e.g. `https://mon.example.com/api_jsonrpc.php`
    pub url: String,
    /// Login name
    pub username: String,
    /// Login password
    pub password: String,
    /// Default deadline for every call
    pub timeout: Duration,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl Config {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Creates a configuration with default timeout and user agent.
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("zbx/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the default call deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
