use crate::decoder::decode_response;
use crate::error::{IpApiError, Result};
use crate::record::LocationRecord;
use crate::transport::{ReqwestTransport, Transport};
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::debug;

/// Origin of the geolocation service.
pub const DEFAULT_BASE_URL: &str = "https://ipapi.co";

/// Output format used when none is given.
pub const DEFAULT_FORMAT: &str = "json";

/**
 * Client for the ipapi.co geolocation service.
 * Holds no state between calls; clones share the same transport.
 */
#[derive(Clone)]
pub struct IpApiClient {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl fmt::Debug for IpApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IpApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl IpApiClient {
    // Create a client using a blocking reqwest transport
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(ReqwestTransport::new()?))
    }

    // Create a client on top of a caller-supplied transport
    pub fn with_transport<T>(transport: T) -> Self
    where
        T: Transport + 'static,
    {
        Self {
            transport: Arc::new(transport),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    // Point the client at another origin
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /**
     * Look up the location of an IP address
     * @param ip - IPv4 or IPv6 address in textual form
     * @param format - output format token, "json" when None or empty
     * @returns The decoded record or the stage at which the lookup failed
     */
    pub fn lookup(&self, ip: &str, format: Option<&str>) -> Result<LocationRecord> {
        ip.parse::<IpAddr>()
            .map_err(|_| IpApiError::InvalidInput(ip.to_string()))?;

        self.execute(Some(ip), resolve_format(format))
    }

    // Same as lookup, for an address that is already parsed
    pub fn lookup_addr(&self, ip: IpAddr, format: Option<&str>) -> Result<LocationRecord> {
        self.execute(Some(&ip.to_string()), resolve_format(format))
    }

    /**
     * Look up the location of the caller's own public address
     * @param format - output format token, "json" when None or empty
     */
    pub fn lookup_self(&self, format: Option<&str>) -> Result<LocationRecord> {
        self.execute(None, resolve_format(format))
    }

    fn execute(&self, ip: Option<&str>, format: &str) -> Result<LocationRecord> {
        let url = request_url(&self.base_url, ip, format);
        debug!("Looking up location: {}", url);

        let body = self.transport.get(&url)?;
        decode_response(&body)
    }
}

/**
 * Resolve the optional format parameter; the value is never validated
 */
pub fn resolve_format(format: Option<&str>) -> &str {
    match format {
        Some(f) if !f.is_empty() => f,
        _ => DEFAULT_FORMAT,
    }
}

/**
 * Build `<base>/<ip>/<format>`, or `<base>/<format>` when no IP is given
 */
pub fn request_url(base_url: &str, ip: Option<&str>, format: &str) -> String {
    match ip {
        Some(ip) => format!("{}/{}/{}", base_url, ip, format),
        None => format!("{}/{}", base_url, format),
    }
}
