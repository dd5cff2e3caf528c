// Shared transport configuration for building reqwest::Client instances.
//
// Keeps timeout and user-agent handling in one place so every client
// constructor goes through the same builder logic.

use std::time::Duration;

use reqwest::header::HeaderMap;

use crate::error::Error;

const USER_AGENT: &str = concat!("larder/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
///
/// `timeout` is `None` by default: a slow server delays the request
/// indefinitely rather than failing it.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    pub timeout: Option<Duration>,
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        self.build_client_with_headers(HeaderMap::new())
    }

    /// Build a `reqwest::Client` with additional default headers.
    ///
    /// Used by the items client to inject the `X-API-KEY` header.
    pub fn build_client_with_headers(&self, headers: HeaderMap) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))
    }

    /// Set a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_timeout() {
        assert!(TransportConfig::default().timeout.is_none());
    }

    #[test]
    fn builds_with_and_without_timeout() {
        assert!(TransportConfig::default().build_client().is_ok());
        let cfg = TransportConfig::default().with_timeout(Duration::from_secs(5));
        assert_eq!(cfg.timeout, Some(Duration::from_secs(5)));
        assert!(cfg.build_client().is_ok());
    }
}
