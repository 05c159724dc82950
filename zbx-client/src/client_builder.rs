//! Client builder for login and observability options
//!
//! ```rust,no_run
//! use zbx_client::{ClientBuilder, Config};
//! use std::time::Duration;
//!
//! # async fn example() -> zbx_core::Result<()> {
//! let config = Config::new("https://mon.example.com/api_jsonrpc.php", "Admin", "zabbix");
//!
//! let (client, user) = ClientBuilder::new(config)
//!     .user_data(true)
//!     .timeout(Duration::from_secs(10))
//!     .with_default_observability()
//!     .service_name("inventory-sync")
//!     .connect()
//!     .await?;
//!
//! assert!(user.is_some());
//! # Ok(())
//! # }
//! ```

use crate::{ClientMetrics, Config, LoginResponse, ZbxClient};
use std::sync::Arc;
use std::time::Duration;
use zbx_core::{Error, Result};

/// Builder for configuring and creating a ZbxClient
pub struct ClientBuilder {
    config: Config,
    user_data: bool,
    observability_config: Option<zbx_core::ObservabilityConfig>,
    service_name: Option<String>,
}

impl ClientBuilder {
    /// Create a new client builder
    pub fn new(config: Config) -> Self {
        Self {
            config,
            user_data: false,
            observability_config: None,
            service_name: None,
        }
    }

    /// Ask for the full user and session object at login
    pub fn user_data(mut self, user_data: bool) -> Self {
        self.user_data = user_data;
        self
    }

    /// Override the configured default call deadline
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Override the configured user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Enable OpenTelemetry observability with custom configuration
    pub fn with_observability(mut self, config: zbx_core::ObservabilityConfig) -> Self {
        self.observability_config = Some(config);
        self
    }

    /// Enable OpenTelemetry observability with default configuration
    pub fn with_default_observability(mut self) -> Self {
        self.observability_config = Some(zbx_core::ObservabilityConfig::default());
        self
    }

    /// Set service name for observability (used if observability is enabled)
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Build the client and log in
    ///
    /// Returns the client with its token stored, plus the login info when
    /// `user_data` was requested.
    ///
    /// Observability is installed process-wide on the first connect. Later
    /// connects, including retries after a failed login, reuse the pipeline
    /// that is already in place.
    pub async fn connect(self) -> Result<(ZbxClient, Option<LoginResponse>)> {
        let metrics = if let Some(mut config) = self.observability_config {
            if let Some(name) = self.service_name {
                config.service_name = name;
            }

            if tracing::dispatcher::has_been_set() {
                tracing::debug!("Global subscriber already set, skipping observability init");
            } else {
                zbx_core::init_observability(config.clone()).map_err(|e| {
                    Error::Config(format!("Failed to initialize observability: {}", e))
                })?;
            }

            Some(Arc::new(ClientMetrics::new(&config.service_name)))
        } else {
            None
        };

        let http = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(url = %self.config.url, "Connecting to API");

        let client = ZbxClient::from_parts(http, self.config, metrics);
        let info = client.login(self.user_data).await?;

        Ok((client, info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::new("http://localhost/api_jsonrpc.php", "Admin", "zabbix")
    }

    #[test]
    fn test_builder_defaults() {
        let builder = ClientBuilder::new(config());

        assert!(!builder.user_data);
        assert!(builder.observability_config.is_none());
        assert!(builder.service_name.is_none());
        assert_eq!(builder.config.timeout, Duration::from_secs(Config::DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_builder_overrides_config() {
        let builder = ClientBuilder::new(config())
            .timeout(Duration::from_millis(1500))
            .user_agent("inventory-sync/1.0");

        assert_eq!(builder.config.timeout, Duration::from_millis(1500));
        assert_eq!(builder.config.user_agent, "inventory-sync/1.0");
        assert_eq!(builder.config.url, "http://localhost/api_jsonrpc.php");
    }

    #[test]
    fn test_builder_observability_config() {
        let obs = zbx_core::ObservabilityConfig::new("test-client").with_log_level("debug");
        let builder = ClientBuilder::new(config()).with_observability(obs);

        let obs_config = builder.observability_config.unwrap();
        assert_eq!(obs_config.service_name, "test-client");
        assert_eq!(obs_config.log_level, "debug");
    }

    #[test]
    fn test_builder_chaining() {
        let builder = ClientBuilder::new(config())
            .user_data(true)
            .service_name("test-service")
            .with_default_observability();

        assert!(builder.user_data);
        assert!(builder.observability_config.is_some());
        assert_eq!(builder.service_name, Some("test-service".to_string()));
    }
}
