//! JSON-RPC error taxonomy.
//!
//! These never map to an HTTP status: every error is carried inside a
//! 200 response body as an `error` object.

use thiserror::Error;

use crate::models::RpcErrorObject;

/// Errors reported back to the caller in the response envelope.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RpcError {
    /// Body missing, unparseable, or lacking `method`/`params`.
    #[error("Invalid or empty payload")]
    InvalidRequest,

    /// Unknown method, or no usable message text.
    #[error("Invalid method or parameters")]
    InvalidMethodOrParams,

    /// Unexpected fault while building the reply.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RpcError {
    /// JSON-RPC error code.
    pub fn code(&self) -> i64 {
        match self {
            RpcError::InvalidRequest => -32600,
            RpcError::InvalidMethodOrParams => -32601,
            RpcError::Internal(_) => -32000,
        }
    }
}

impl From<RpcError> for RpcErrorObject {
    fn from(e: RpcError) -> Self {
        RpcErrorObject {
            code: e.code(),
            message: e.to_string(),
        }
    }
}
