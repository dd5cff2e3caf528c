use thiserror::Error;

/// Top-level error type for the `larder-api` crate.
///
/// Covers every failure mode of the item resource client: client
/// construction, transport, non-2xx responses, and body decoding.
/// `larder-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The configured API key could not be used as a header value.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The server rejected the API key (HTTP 401).
    #[error("Invalid API key")]
    InvalidApiKey,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Server ──────────────────────────────────────────────────────
    /// Non-success status returned by the server.
    #[error("Server returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying
    /// (timeouts, refused connections, 429 and 5xx).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Http { status: 404, .. } => true,
            _ => false,
        }
    }

    /// HTTP status code attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Http { status, .. } => Some(*status),
            Self::InvalidApiKey => Some(401),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Http {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(err.is_transient());
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn client_errors_are_not_transient() {
        let err = Error::Http {
            status: 422,
            message: "bad price".into(),
        };
        assert!(!err.is_transient());
        assert!(!err.is_not_found());
    }

    #[test]
    fn rejected_key_reports_401() {
        let err = Error::InvalidApiKey;
        assert_eq!(err.status(), Some(401));
        assert!(!err.is_transient());
    }

    #[test]
    fn too_many_requests_is_transient() {
        let err = Error::Http {
            status: 429,
            message: "slow down".into(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn http_404_is_not_found() {
        let err = Error::Http {
            status: 404,
            message: "Not Found".into(),
        };
        assert!(err.is_not_found());
    }
}
