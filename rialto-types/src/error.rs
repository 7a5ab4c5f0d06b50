use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the rialto workspace.
///
/// Covers argument validation, benign not-found conditions, and failures of the
/// backing store. Errors are `Clone` so a single coalesced fetch can hand the
/// same outcome to every waiting caller.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RialtoError {
    /// Malformed symbol, interval, date, or pagination input.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// No records matched the request.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "trades for ABC".
        what: String,
    },

    /// The backing store reported a failure (connection, query, decode).
    #[error("{store} unavailable: {msg}")]
    Upstream {
        /// Store name that failed.
        store: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A backing store call exceeded the configured timeout.
    #[error("{store} timed out: {operation}")]
    UpstreamTimeout {
        /// Store name that timed out.
        store: String,
        /// Operation label (e.g. "find", "find_one").
        operation: String,
    },

    /// Issues with returned data (missing or mistyped fields).
    #[error("data issue: {0}")]
    Data(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl RialtoError {
    /// Helper: build an `InvalidArg` error.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build an `Upstream` error with the store name and message.
    pub fn upstream(store: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Upstream {
            store: store.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build an `UpstreamTimeout` error.
    pub fn upstream_timeout(store: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::UpstreamTimeout {
            store: store.into(),
            operation: operation.into(),
        }
    }

    /// Returns true for failures a caller may reasonably retry.
    ///
    /// Only store-side failures qualify; bad input and missing data will fail
    /// the same way again.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream { .. } | Self::UpstreamTimeout { .. })
    }

    /// Returns true when the request itself was at fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidArg(_) | Self::NotFound { .. })
    }
}
