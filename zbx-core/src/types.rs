//! JSON-RPC 2.0 envelopes exchanged with the monitoring API
//!
//! Every call is a single request envelope POSTed to the API endpoint,
//! answered by a single response envelope:
//!
//! ```json
//! {"jsonrpc":"2.0","method":"user.login","params":{"username":"Admin","password":"zabbix"},"id":1}
//! {"jsonrpc":"2.0","result":"0424bd59b807674191e7d77572075f33","id":1}
//! ```
//!
//! # Request IDs
//!
//! The remote system uses plain integer ids. The transport is strictly one
//! request per HTTP exchange, so the id only has to round-trip; an unset
//! (zero) id is normalized to 1.
//!
//! # Result Payloads
//!
//! The `result` field is kept as an undecoded `serde_json::Value`. Its shape
//! depends on the method (an object, an array, or a bare scalar such as the
//! session token returned by `user.login`), so decoding is left to the
//! method-specific layer.

use crate::error::JsonRpcErrorData;
use serde::{Deserialize, Serialize};

/// Protocol version tag carried by every envelope
pub const JSONRPC_VERSION: &str = "2.0";

/// Id used when the caller does not pick one
pub const DEFAULT_ID: i64 = 1;

/// JSON-RPC 2.0 request envelope
///
/// # Examples
///
/// ```rust
/// use zbx_core::JsonRpcRequest;
/// use serde_json::json;
///
/// let req = JsonRpcRequest::new("user.get", json!({"output": "extend"}), 0);
/// assert_eq!(req.id, 1);
/// assert_eq!(req.jsonrpc, "2.0");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version - always "2.0"
    pub jsonrpc: String,
    /// Name of the remote operation, e.g. "user.login"
    pub method: String,
    /// Method-specific parameter payload
    pub params: serde_json::Value,
    /// Correlation id
    pub id: i64,
}

impl JsonRpcRequest {
    /// Build a request envelope
    ///
    /// An `id` of zero means "unset" and becomes [`DEFAULT_ID`]; any other
    /// value is kept as given.
    pub fn new(method: impl Into<String>, params: serde_json::Value, id: i64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id: if id == 0 { DEFAULT_ID } else { id },
        }
    }

    /// Build a request envelope from any serializable params
    ///
    /// Fails with `Error::Serialization` if the params cannot be encoded.
    pub fn with_params<P: Serialize>(
        method: impl Into<String>,
        params: &P,
        id: i64,
    ) -> crate::Result<Self> {
        let params = serde_json::to_value(params)
            .map_err(|e| crate::Error::Serialization(e.to_string()))?;
        Ok(Self::new(method, params, id))
    }
}

/// JSON-RPC 2.0 response envelope
///
/// A well-formed response has exactly one of `result` or `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version - "2.0"
    #[serde(default)]
    pub jsonrpc: String,
    /// Undecoded result payload (success only)
    ///
    /// `None` only when the field is absent; `"result": null` is
    /// `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub result: Option<serde_json::Value>,
    /// Error object (failure only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcErrorData>,
    /// Id echoed from the request; `None` when the server could not read it
    #[serde(default)]
    pub id: Option<i64>,
}

fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl JsonRpcResponse {
    /// Create a successful response
    pub fn success(result: serde_json::Value, id: i64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id: Some(id),
        }
    }

    /// Create an error response
    pub fn error(error: JsonRpcErrorData, id: Option<i64>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }

    /// True when the envelope carries no error and a result
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.result.is_some()
    }

    /// True when the envelope carries an error object
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
