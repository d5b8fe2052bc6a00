//! HTTP transport used by the client.
//!
//! The decoding layer only needs "GET this URL, give me status and body".
//! [`Transport`] is that seam; [`HttpTransport`] implements it on top of
//! reqwest's blocking client. Timeouts live here, retries live nowhere.

use std::time::Duration;

use tracing::debug;

use crate::error::ClientError;

/// Status code and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status_code: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Something that can perform a GET request.
pub trait Transport {
    fn get(&self, url: &str) -> Result<RawResponse, ClientError>;
}

/// [`Transport`] backed by `reqwest::blocking::Client`.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl HttpTransport {
    /// Create a transport with a per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<RawResponse, ClientError> {
        let response = self.client.get(url).send()?;
        let status_code = response.status().as_u16();
        let body = response.text()?;

        debug!(url, status_code, bytes = body.len(), "GET completed");

        Ok(RawResponse { status_code, body })
    }
}
