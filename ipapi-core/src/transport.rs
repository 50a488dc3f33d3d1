use crate::error::{IpApiError, Result};
use std::time::Duration;
use tracing::debug;

/**
 * Performs the GET request of a lookup and returns the raw body.
 *
 * Implementations report a request that could not be completed as
 * `IpApiError::Transport` and a body that could not be read as
 * `IpApiError::Read`.
 */
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/**
 * Blocking transport backed by reqwest
 */
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    // Create a transport with the client's default settings
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .gzip(true)
            .build()
            .map_err(|e| IpApiError::Transport(Box::new(e)))?;

        Ok(Self { client })
    }

    // Create a transport that gives up after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .gzip(true)
            .timeout(timeout)
            .build()
            .map_err(|e| IpApiError::Transport(Box::new(e)))?;

        Ok(Self { client })
    }
}

impl From<reqwest::blocking::Client> for ReqwestTransport {
    fn from(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| IpApiError::Transport(Box::new(e)))?;

        // Status is not checked: errors are reported in the body
        debug!("Response status: {}", response.status());

        let bytes = response
            .bytes()
            .map_err(|e| IpApiError::Read(Box::new(e)))?;

        debug!("Response body read ({} bytes)", bytes.len());
        Ok(bytes.to_vec())
    }
}
