//! zbx - JSON-RPC client for the monitoring API
//!
//! Convenience crate re-exporting the zbx sub-crates:
//!
//! - **zbx-core**: envelope types, codec, error handling, observability
//! - **zbx-client**: HTTP session client and API groups
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use zbx::{Config, ZbxClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new("http://localhost:8080/api_jsonrpc.php", "Admin", "zabbix");
//!     let (client, user) = ZbxClient::connect(config, true).await?;
//!
//!     if let Some(user) = user {
//!         println!("logged in as {:?} from {}", user.user.username, user.user_ip);
//!     }
//!     println!("authenticated: {}", client.is_authenticated().await);
//!
//!     Ok(())
//! }
//! ```

pub use zbx_client as client;
pub use zbx_core as core;

pub use zbx_client::{Config, ZbxClient};
pub use zbx_core::{Error, Result};
