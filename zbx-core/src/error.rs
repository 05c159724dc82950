//! Error types for zbx
//!
//! This module defines the two error shapes used across the client:
//!
//! - **Error**: every fault a call can end in (uses thiserror)
//! - **JsonRpcErrorData**: the wire-format error object carried in a response envelope
//!
//! # Fault Taxonomy
//!
//! | Variant         | Raised when                                              |
//! |-----------------|----------------------------------------------------------|
//! | `Serialization` | the request payload cannot be encoded                    |
//! | `Transport`     | connect/send/receive fails below HTTP                    |
//! | `Timeout`       | the call deadline expires                                |
//! | `Http`          | the server answers with a non-2xx status                 |
//! | `Decode`        | the body is not a valid envelope or result shape         |
//! | `JsonRpc`       | the envelope carries an error object (protocol fault)    |
//! | `Config`        | the HTTP transport cannot be built from the configuration|
//!
//! Only `JsonRpc` is defined by the remote system itself. None of the faults
//! are retried; each is returned to the immediate caller.
//!
//! # Examples
//!
//! ```rust
//! use zbx_core::{Error, JsonRpcErrorData};
//!
//! let fault = Error::from(JsonRpcErrorData::with_data(-32602, "Invalid params.", "Incorrect user name or password."));
//! assert!(fault.is_protocol());
//! assert_eq!(fault.protocol_error().unwrap().code, -32602);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for zbx operations
pub type Result<T> = std::result::Result<T, Error>;

/// Every fault a zbx call can end in
///
/// Transport-level variants store their cause as a `String` so the error
/// stays `Clone` and can be handed across tasks without lifetimes.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Protocol fault reported by the remote system
    ///
    /// Carries the exact code, message and detail from the envelope's
    /// error object.
    #[error("JSON-RPC error: {0}")]
    JsonRpc(#[from] JsonRpcErrorData),

    /// The request could not be encoded to the wire format
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Network-level failure to connect, send or receive
    #[error("Transport error: {0}")]
    Transport(String),

    /// The call did not complete before its deadline
    #[error("Request timeout")]
    Timeout,

    /// Non-2xx HTTP status
    ///
    /// The body is kept verbatim because the server sometimes answers with
    /// plain text or HTML that is not an envelope.
    #[error("HTTP status {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The response body is not a valid envelope, or the result payload
    /// does not have the shape the caller asked for
    #[error("Decode error: {0}")]
    Decode(String),

    /// The HTTP transport could not be built from the client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True when the fault was reported by the remote system
    pub fn is_protocol(&self) -> bool {
        matches!(self, Error::JsonRpc(_))
    }

    /// The remote error object, if this is a protocol fault
    pub fn protocol_error(&self) -> Option<&JsonRpcErrorData> {
        match self {
            Error::JsonRpc(data) => Some(data),
            _ => None,
        }
    }

    /// The HTTP status, if this is an HTTP fault
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short, stable label for the fault kind
    ///
    /// Used as a metric attribute; never contains request data.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::JsonRpc(_) => "json_rpc",
            Error::Serialization(_) => "serialization",
            Error::Transport(_) => "transport",
            Error::Timeout => "timeout",
            Error::Http { .. } => "http",
            Error::Decode(_) => "decode",
            Error::Config(_) => "config",
        }
    }
}

/// JSON-RPC error object as sent by the monitoring API
///
/// The remote system fills `data` with a human-readable detail string, for
/// example:
///
/// ```json
/// {"code": -32602, "message": "Invalid params.", "data": "Incorrect user name or password or account is temporarily blocked."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcErrorData {
    /// Numeric error code
    pub code: i64,

    /// Short description of the error
    pub message: String,

    /// Optional detail string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl JsonRpcErrorData {
    /// Create an error object with code and message
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Create an error object with a detail string
    pub fn with_data(code: i64, message: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data.into()),
        }
    }
}

impl std::fmt::Display for JsonRpcErrorData {
    /// Formats as "code: N, message: M, data: D"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "code: {}, message: {}", self.code, self.message)?;
        if let Some(ref data) = self.data {
            write!(f, ", data: {}", data)?;
        }
        Ok(())
    }
}

impl std::error::Error for JsonRpcErrorData {}
