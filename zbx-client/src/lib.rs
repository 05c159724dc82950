//! JSON-RPC 2.0 session client for the monitoring API over HTTP
//!
//! The client logs in once at construction, keeps the session token, and
//! sends every later call as a single HTTP POST carrying that token as a
//! bearer credential.
//!
//! # Core Features
//!
//! - **Login at connect**: bare token or full user/session info
//! - **Generic execute path**: envelope in, result payload or fault out
//! - **API groups**: lightweight handles such as [`UserApi`]
//! - **Per-call deadlines**: default from [`Config`], override per request
//! - **Observability**: `tracing` spans and OpenTelemetry metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use zbx_client::{Config, UserGetParams, ZbxClient};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new("https://mon.example.com/api_jsonrpc.php", "Admin", "zabbix");
//!     let (client, _) = ZbxClient::connect(config, false).await?;
//!
//!     let users = client
//!         .user()
//!         .get(&UserGetParams {
//!             output: Some(json!(["userid", "username"])),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("{} users", users.len());
//!
//!     let hosts: String = client.call("host.get", json!({"countOutput": true})).await?;
//!     println!("{} hosts", hosts);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod client_builder;
mod config;
mod metrics;
mod user;

pub use client::ZbxClient;
pub use client_builder::ClientBuilder;
pub use config::Config;
pub use metrics::ClientMetrics;
pub use user::{LoginRequest, LoginResponse, Media, User, UserApi, UserGetParams};
