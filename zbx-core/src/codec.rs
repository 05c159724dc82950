//! Codec for JSON-RPC envelopes
//!
//! Pure transformations between Rust values and the two wire shapes. Nothing
//! here touches the network; the client crate feeds raw HTTP bodies through
//! these functions.
//!
//! # Error Mapping
//!
//! - encoding failures → `Error::Serialization`
//! - bodies that are not an envelope → `Error::Decode`
//! - envelopes carrying an error object → `Error::JsonRpc`
//!
//! # Examples
//!
//! ```rust
//! use zbx_core::{codec, JsonRpcRequest};
//! use serde_json::json;
//!
//! let request = JsonRpcRequest::new("apiinfo.version", json!([]), 0);
//! let body = codec::encode_request(&request).unwrap();
//! assert!(body.contains("\"id\":1"));
//!
//! let result = codec::parse_response(br#"{"jsonrpc":"2.0","result":"7.0.0","id":1}"#).unwrap();
//! assert_eq!(result, json!("7.0.0"));
//! ```

use crate::error::{Error, Result};
use crate::types::{JsonRpcRequest, JsonRpcResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Longest body excerpt quoted inside a decode error
const BODY_EXCERPT_LEN: usize = 256;

/// Encode any serializable value to a JSON string
pub fn encode<T: Serialize>(msg: &T) -> Result<String> {
    serde_json::to_string(msg).map_err(|e| Error::Serialization(e.to_string()))
}

/// Encode a request envelope to JSON
pub fn encode_request(req: &JsonRpcRequest) -> Result<String> {
    encode(req)
}

/// Decode raw bytes into a response envelope
///
/// Only checks that the body is a JSON object of the envelope's shape; the
/// result/error split is handled by [`into_result`].
pub fn decode_response(data: &[u8]) -> Result<JsonRpcResponse> {
    serde_json::from_slice(data).map_err(|e| {
        Error::Decode(format!(
            "invalid response envelope: {} (body: {})",
            e,
            excerpt(data)
        ))
    })
}

/// Split a decoded envelope into its outcome
///
/// An error object wins: its code, message and detail become
/// `Error::JsonRpc` and any result is dropped. Otherwise the result payload
/// is handed back undecoded. An envelope with neither is malformed.
pub fn into_result(resp: JsonRpcResponse) -> Result<serde_json::Value> {
    if let Some(error) = resp.error {
        return Err(Error::JsonRpc(error));
    }

    resp.result
        .ok_or_else(|| Error::Decode("response carries neither result nor error".to_string()))
}

/// Decode raw bytes and return the result payload or the protocol fault
pub fn parse_response(data: &[u8]) -> Result<serde_json::Value> {
    into_result(decode_response(data)?)
}

/// Decode a result payload into a method-specific type
pub fn decode_result<T: DeserializeOwned>(result: serde_json::Value) -> Result<T> {
    serde_json::from_value(result).map_err(|e| Error::Decode(e.to_string()))
}

fn excerpt(data: &[u8]) -> String {
    let text = String::from_utf8_lossy(data);
    if text.chars().count() <= BODY_EXCERPT_LEN {
        text.into_owned()
    } else {
        let cut: String = text.chars().take(BODY_EXCERPT_LEN).collect();
        format!("{}...", cut)
    }
}
