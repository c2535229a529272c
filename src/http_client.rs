//! HTTP client for driving the system under test
//!
//! Thin wrapper over a blocking reqwest client. Every benchmark request is a
//! plain GET; the body is drained before the call returns so measured latency
//! covers full response receipt, not just the status line.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::error::{CotejarError, Result};

/// Outcome of a single GET against the system under test
#[derive(Debug, Clone, Copy)]
pub struct FetchOutcome {
    /// HTTP status returned by the endpoint
    pub status: StatusCode,
    /// Response body size in bytes
    pub body_bytes: usize,
}

impl FetchOutcome {
    /// Whether the endpoint answered with a 2xx status
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Blocking HTTP client for benchmark traffic
///
/// Cheap to share across worker threads; the underlying connection pool is
/// reference-counted.
#[derive(Debug)]
pub struct EndpointClient {
    client: Client,
}

impl Default for EndpointClient {
    fn default() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }
}

impl EndpointClient {
    /// Create a client with a custom per-request timeout
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Issue one GET and drain the response body
    ///
    /// A non-success status is NOT an error here; the caller classifies it.
    ///
    /// # Errors
    /// Returns `ConnectionError` on any transport-level failure (connection
    /// refused, timeout, I/O error mid-response).
    pub fn get(&self, url: &str) -> Result<FetchOutcome> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| CotejarError::ConnectionError(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let body = response.bytes().map_err(|e| {
            CotejarError::ConnectionError(format!("Failed to read response body: {e}"))
        })?;

        Ok(FetchOutcome {
            status,
            body_bytes: body.len(),
        })
    }

    /// Reachability probe for an endpoint
    ///
    /// Distinguishes "unreachable" (an error) from "reachable but unhappy"
    /// (`Ok(false)`).
    ///
    /// # Errors
    /// Returns `ConnectionError` if the endpoint cannot be reached at all.
    pub fn health_check(&self, url: &str) -> Result<bool> {
        Ok(self.get(url)?.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockEndpoint, MockRoute};

    #[test]
    fn test_get_success() {
        let mock = MockEndpoint::spawn(vec![MockRoute::ok("/data")], vec![]);
        let client = EndpointClient::default();

        let outcome = client.get(&format!("{}/data", mock.url())).unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.status.as_u16(), 200);
        assert!(outcome.body_bytes > 0);
    }

    #[test]
    fn test_get_non_success_status_is_not_an_error() {
        let mock = MockEndpoint::spawn(vec![MockRoute::with_status("/broken", 500)], vec![]);
        let client = EndpointClient::default();

        let outcome = client.get(&format!("{}/broken", mock.url())).unwrap();
        assert!(!outcome.is_success());
        assert_eq!(outcome.status.as_u16(), 500);
    }

    #[test]
    fn test_get_transport_failure() {
        // First accepted request is dropped without a response.
        let mock = MockEndpoint::spawn(vec![MockRoute::ok("/data")], vec![1]);
        let client = EndpointClient::default();

        let result = client.get(&format!("{}/data", mock.url()));
        assert!(matches!(result, Err(CotejarError::ConnectionError(_))));
    }

    #[test]
    fn test_health_check_reachable() {
        let mock = MockEndpoint::spawn(vec![MockRoute::ok("/api/processors/stream")], vec![]);
        let client = EndpointClient::default();

        let healthy = client
            .health_check(&format!("{}/api/processors/stream", mock.url()))
            .unwrap();
        assert!(healthy);
    }

    #[test]
    fn test_health_check_unreachable() {
        let client = EndpointClient::with_timeout(Duration::from_millis(500));
        // Bind then immediately drop a listener so the port is closed.
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };

        let result = client.health_check(&format!("http://{addr}/"));
        assert!(matches!(result, Err(CotejarError::ConnectionError(_))));
    }
}
