//! Core JSON-RPC 2.0 envelope types and codec for zbx
//!
//! This crate holds everything about the monitoring API's wire format that
//! does not depend on a transport:
//!
//! - **Types**: request and response envelopes
//! - **Codec**: encoding requests, decoding responses, splitting result from error
//! - **Error handling**: the fault taxonomy shared by every zbx call
//! - **Observability**: OpenTelemetry and `tracing` setup for embedding applications
//!
//! The `zbx-client` crate builds the HTTP session client on top of it.
//!
//! # Example
//!
//! ```rust
//! use zbx_core::{codec, Error, JsonRpcRequest};
//! use serde_json::json;
//!
//! let request = JsonRpcRequest::new("user.login", json!({"username": "Admin", "password": "zabbix"}), 0);
//! let json = codec::encode_request(&request).unwrap();
//! assert!(json.contains("\"method\":\"user.login\""));
//!
//! let fault = codec::parse_response(
//!     br#"{"jsonrpc":"2.0","error":{"code":-32602,"message":"Invalid params.","data":"Login name or password is incorrect."},"id":1}"#,
//! )
//! .unwrap_err();
//! assert!(matches!(fault, Error::JsonRpc(_)));
//! ```

pub mod codec;
pub mod error;
pub mod observability;
pub mod types;

pub use error::{Error, JsonRpcErrorData, Result};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use types::{JsonRpcRequest, JsonRpcResponse, DEFAULT_ID, JSONRPC_VERSION};
