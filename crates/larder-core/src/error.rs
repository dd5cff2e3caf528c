// ── Core error types ──
//
// User-facing errors from larder-core. Consumers never see reqwest
// errors or JSON parse failures directly; the `From<larder_api::Error>`
// impl translates transport-layer errors into these variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Transport failures ───────────────────────────────────────────
    #[error("Cannot connect to item server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to item server timed out")]
    Timeout,

    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Item not found on server: {message}")]
    NotFound { message: String },

    #[error("Request rejected by server (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid response from server: {message}")]
    InvalidResponse { message: String },

    // ── Contract violations ──────────────────────────────────────────
    #[error("No item is focused for editing; request an edit before calling {operation}")]
    NoEditTarget { operation: &'static str },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` if the remote call itself failed (network error,
    /// non-2xx status, unreadable body).
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. }
                | Self::Timeout
                | Self::Authentication { .. }
                | Self::NotFound { .. }
                | Self::Rejected { .. }
                | Self::InvalidResponse { .. }
        )
    }

    /// Returns `true` for programmer errors such as updating with no focus.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::NoEditTarget { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<larder_api::Error> for CoreError {
    fn from(err: larder_api::Error) -> Self {
        match err {
            larder_api::Error::Authentication { message } => CoreError::Authentication { message },
            larder_api::Error::InvalidApiKey => CoreError::Authentication {
                message: "Invalid API key".into(),
            },
            larder_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if let Some(status) = e.status().map(|s| s.as_u16()) {
                    if status == 404 {
                        CoreError::NotFound {
                            message: e.url().map(|u| u.path().to_string()).unwrap_or_default(),
                        }
                    } else {
                        CoreError::Rejected {
                            status,
                            message: e.to_string(),
                        }
                    }
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                }
            }
            larder_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            larder_api::Error::ClientBuild(message) => CoreError::Config { message },
            larder_api::Error::Http { status: 404, message } => CoreError::NotFound { message },
            larder_api::Error::Http { status, message } => CoreError::Rejected { status, message },
            larder_api::Error::Deserialization { message, body: _ } => {
                CoreError::InvalidResponse { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_404_maps_to_not_found() {
        let err = CoreError::from(larder_api::Error::Http {
            status: 404,
            message: "Not Found".into(),
        });
        assert!(matches!(err, CoreError::NotFound { .. }));
        assert!(err.is_transport_failure());
    }

    #[test]
    fn http_500_maps_to_rejected() {
        let err = CoreError::from(larder_api::Error::Http {
            status: 500,
            message: "boom".into(),
        });
        match err {
            CoreError::Rejected { status, ref message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            ref other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn bad_body_maps_to_invalid_response() {
        let err = CoreError::from(larder_api::Error::Deserialization {
            message: "missing field `id`".into(),
            body: "{}".into(),
        });
        assert!(matches!(err, CoreError::InvalidResponse { .. }));
    }

    #[test]
    fn no_edit_target_is_a_contract_violation() {
        let err = CoreError::NoEditTarget { operation: "update" };
        assert!(err.is_contract_violation());
        assert!(!err.is_transport_failure());
        assert!(err.to_string().contains("update"));
    }

    #[test]
    fn client_build_is_config_error() {
        let err = CoreError::from(larder_api::Error::ClientBuild("no tls backend".into()));
        assert!(matches!(err, CoreError::Config { .. }));
        assert!(!err.is_transport_failure());
    }
}
