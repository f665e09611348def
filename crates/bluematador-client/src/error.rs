//! Error types for the Blue Matador API client
//!
//! Every failed request is normalized into [`ApiError`], preserving enough
//! request/response context for callers to build detailed diagnostics.

use thiserror::Error;

/// Classification of transport-level failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// The request timed out
    Timeout,
    /// Could not connect to the API host
    Connect,
    /// Any other transport failure (DNS, TLS, protocol)
    Other,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportKind::Timeout => write!(f, "timeout"),
            TransportKind::Connect => write!(f, "connection refused"),
            TransportKind::Other => write!(f, "transport error"),
        }
    }
}

/// Error type for all Blue Matador API operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API returned a non-2xx status
    #[error("{method} {url} returned HTTP {status}: {message}")]
    Status {
        status: u16,
        /// Message from the response body's `message` field, or the raw body
        message: String,
        /// Raw response body, for diagnostics
        body: String,
        /// Response Content-Type header, if present
        content_type: Option<String>,
        method: String,
        url: String,
    },

    /// The request never produced a response
    #[error("{method} {url} failed ({kind}): {message}")]
    Transport {
        kind: TransportKind,
        message: String,
        method: String,
        url: String,
    },

    /// A 2xx response body could not be decoded into the expected type
    #[error("failed to decode response from {url}: {message}")]
    Decode { message: String, url: String },

    /// The request could not be constructed
    #[error("failed to build request: {0}")]
    Request(String),
}

impl ApiError {
    /// HTTP status of the failed request, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// URL of the failed request, if known
    pub fn url(&self) -> Option<&str> {
        match self {
            ApiError::Status { url, .. }
            | ApiError::Transport { url, .. }
            | ApiError::Decode { url, .. } => Some(url),
            ApiError::Request(_) => None,
        }
    }

    /// HTTP method of the failed request, if known
    pub fn method(&self) -> Option<&str> {
        match self {
            ApiError::Status { method, .. } | ApiError::Transport { method, .. } => Some(method),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: u16) -> ApiError {
        ApiError::Status {
            status,
            message: "no such integration".to_string(),
            body: "{\"message\":\"no such integration\"}".to_string(),
            content_type: Some("application/json".to_string()),
            method: "GET".to_string(),
            url: "https://app.bluematador.com/zi/accounts/a/inbounds".to_string(),
        }
    }

    #[test]
    fn status_is_exposed() {
        assert_eq!(status_error(404).status(), Some(404));
    }

    #[test]
    fn transport_has_no_status() {
        let err = ApiError::Transport {
            kind: TransportKind::Connect,
            message: "connection refused".to_string(),
            method: "GET".to_string(),
            url: "https://app.bluematador.com/zi".to_string(),
        };
        assert_eq!(err.status(), None);
        assert_eq!(err.method(), Some("GET"));
    }

    #[test]
    fn display_includes_method_and_status() {
        let rendered = status_error(404).to_string();
        assert!(rendered.contains("GET"));
        assert!(rendered.contains("404"));
        assert!(rendered.contains("no such integration"));
    }
}
