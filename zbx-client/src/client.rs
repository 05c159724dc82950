//! JSON-RPC session client over HTTP
//!
//! `ZbxClient` owns the HTTP transport, the session configuration and the
//! bearer token obtained at login. Every API group goes through the same
//! [`ZbxClient::execute`] path: one request envelope, one POST, one
//! response envelope.
//!
//! # Client Lifecycle
//!
//! 1. **Connect**: build the transport and log in; the token is stored
//! 2. **Use**: call API groups; each call carries `Authorization: Bearer <token>`
//! 3. **Re-login / logout** (optional): replace or drop the token
//!
//! # Cloning
//!
//! `ZbxClient` is cheaply cloneable. Clones share the HTTP connection pool
//! and the token, so a re-login on one clone is seen by all of them.

use crate::{ClientBuilder, ClientMetrics, Config, LoginRequest, LoginResponse, UserApi};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use zbx_core::{codec, Error, JsonRpcRequest, Result, DEFAULT_ID};

/// JSON-RPC client for the monitoring API
#[derive(Clone)]
pub struct ZbxClient {
    /// HTTP transport (pooled, shared by clones)
    pub(crate) http: reqwest::Client,
    /// Endpoint and credentials
    pub(crate) config: Arc<Config>,
    /// Session token from the last successful login
    pub(crate) token: Arc<RwLock<Option<String>>>,
    /// Metrics for observability
    pub(crate) metrics: Option<Arc<ClientMetrics>>,
}

impl ZbxClient {
    /// Connect and log in with the configured credentials
    ///
    /// With `user_data` set, the login asks for the full user and session
    /// object and returns it; otherwise the second element is `None`.
    /// On failure no client is returned.
    pub async fn connect(config: Config, user_data: bool) -> Result<(Self, Option<LoginResponse>)> {
        ClientBuilder::new(config).user_data(user_data).connect().await
    }

    /// Create a builder for more options
    pub fn builder(config: Config) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    pub(crate) fn from_parts(
        http: reqwest::Client,
        config: Config,
        metrics: Option<Arc<ClientMetrics>>,
    ) -> Self {
        Self {
            http,
            config: Arc::new(config),
            token: Arc::new(RwLock::new(None)),
            metrics,
        }
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The current session token
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Check whether a session token is held
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// User API group
    pub fn user(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    /// Log in again with the configured credentials and store the new token
    ///
    /// The old token is dropped before the exchange, so `user.login` is
    /// never sent with a bearer credential. If the login fails the client is
    /// left without a token.
    #[tracing::instrument(skip(self), fields(url = %self.config.url))]
    pub async fn login(&self, user_data: bool) -> Result<Option<LoginResponse>> {
        *self.token.write().await = None;

        let request = LoginRequest::new(self.config.username.clone(), self.config.password.clone())
            .with_user_data(user_data);
        let (token, info) = self.user().login(&request, None).await?;

        *self.token.write().await = Some(token);

        if let Some(ref m) = self.metrics {
            m.record_login();
        }
        tracing::debug!(user_data, "Logged in");

        Ok(user_data.then_some(info))
    }

    /// End the session on the server and drop the token
    pub async fn logout(&self) -> Result<bool> {
        let logged_out = self.user().logout().await?;
        *self.token.write().await = None;
        Ok(logged_out)
    }

    /// Send a request envelope and return the undecoded result payload
    ///
    /// The deadline is the configured default timeout.
    pub async fn execute(&self, request: JsonRpcRequest) -> Result<serde_json::Value> {
        self.send(request, None).await
    }

    /// Like [`execute`](Self::execute) with a deadline for this call only
    pub async fn execute_with_timeout(
        &self,
        request: JsonRpcRequest,
        timeout: Duration,
    ) -> Result<serde_json::Value> {
        self.send(request, Some(timeout)).await
    }

    /// Call a method with typed params and decode its result
    pub async fn call<P, R>(&self, method: impl Into<String>, params: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let request = JsonRpcRequest::with_params(method, &params, DEFAULT_ID)?;
        let result = self.execute(request).await?;
        codec::decode_result(result)
    }

    #[tracing::instrument(skip(self, request, timeout), fields(method = %request.method, id = request.id))]
    async fn send(
        &self,
        request: JsonRpcRequest,
        timeout: Option<Duration>,
    ) -> Result<serde_json::Value> {
        let start = Instant::now();
        let method = request.method.clone();

        let outcome = self.round_trip(request, timeout).await;

        let duration = start.elapsed().as_secs_f64();
        if let Some(ref m) = self.metrics {
            match &outcome {
                Ok(_) => m.record_request(&method, "success", duration),
                Err(e) => {
                    m.record_request(&method, "error", duration);
                    m.record_error(e.kind());
                }
            }
        }
        tracing::debug!(duration_secs = duration, ok = outcome.is_ok(), "Request finished");

        outcome
    }

    async fn round_trip(
        &self,
        mut request: JsonRpcRequest,
        timeout: Option<Duration>,
    ) -> Result<serde_json::Value> {
        // Fields are public, so the envelope may have been edited after new().
        if request.id == 0 {
            request.id = DEFAULT_ID;
        }
        let body = codec::encode_request(&request)?;

        let mut http_request = self
            .http
            .post(&self.config.url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body);

        let token = self.token.read().await.clone();
        if let Some(token) = token {
            http_request = http_request.bearer_auth(token);
        }
        if let Some(timeout) = timeout {
            http_request = http_request.timeout(timeout);
        }

        tracing::trace!("Sending request");
        let response = http_request.send().await.map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        tracing::trace!(status = status.as_u16(), bytes = body.len(), "Response received");

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        codec::parse_response(&body)
    }
}

fn transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout
    } else {
        Error::Transport(e.to_string())
    }
}
