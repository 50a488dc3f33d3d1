pub mod client;
pub mod decoder;
pub mod error;
pub mod record;
pub mod transport;

use std::net::IpAddr;
use std::sync::OnceLock;

pub use client::{IpApiClient, DEFAULT_BASE_URL, DEFAULT_FORMAT};
pub use error::{BoxError, IpApiError, Result, Stage};
pub use record::LocationRecord;
pub use transport::{ReqwestTransport, Transport};

// Shared client behind the free functions, built on first use
static DEFAULT_CLIENT: OnceLock<IpApiClient> = OnceLock::new();

fn default_client() -> Result<&'static IpApiClient> {
    if let Some(client) = DEFAULT_CLIENT.get() {
        return Ok(client);
    }

    let client = IpApiClient::new()?;
    Ok(DEFAULT_CLIENT.get_or_init(|| client))
}

/**
 * Look up the location of an IP address with the shared client
 * @param ip - IP address to look up (IPv4 or IPv6)
 * @param format - output format, "json" when None or empty
 * @returns Location record for the address
 */
pub fn get_ip_location(ip: &str, format: Option<&str>) -> Result<LocationRecord> {
    ip.parse::<IpAddr>()
        .map_err(|_| IpApiError::InvalidInput(ip.to_string()))?;

    default_client()?.lookup(ip, format)
}

/**
 * Look up the location of the caller's public IP address with the shared client
 * @param format - output format, "json" when None or empty
 * @returns Location record for the detected address
 */
pub fn get_client_location(format: Option<&str>) -> Result<LocationRecord> {
    default_client()?.lookup_self(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_ip_fails_before_any_request() {
        let err = get_ip_location("some fake ip", None).unwrap_err();
        assert_eq!(err.stage(), Stage::Input);

        let err = get_ip_location("", Some("json")).unwrap_err();
        assert_eq!(err.stage(), Stage::Input);
    }
}
