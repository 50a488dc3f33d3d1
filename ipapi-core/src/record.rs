use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/**
 * Geolocation data returned by the service for a single IP address.
 * Fields missing from the response (or sent as null) keep their zero value.
 */
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub ip: String,
    // CIDR the address belongs to
    #[serde(deserialize_with = "null_as_default")]
    pub network: String,
    #[serde(rename = "version", deserialize_with = "null_as_default")]
    pub ip_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(deserialize_with = "null_as_default")]
    pub region_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country_code_iso3: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country_capital: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country_tld: String,
    #[serde(deserialize_with = "null_as_default")]
    pub continent_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub in_eu: bool,
    #[serde(rename = "postal", deserialize_with = "null_as_default")]
    pub postal_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub latitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub longitude: f64,
    // IANA zone name, e.g. "Europe/Berlin"
    #[serde(deserialize_with = "null_as_default")]
    pub timezone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub utc_offset: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country_calling_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub currency_name: String,
    // Comma-joined language codes, kept as sent
    #[serde(deserialize_with = "null_as_default")]
    pub languages: String,
    // km²
    #[serde(deserialize_with = "null_as_default")]
    pub country_area: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub country_population: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub asn: String,
    #[serde(deserialize_with = "null_as_default")]
    pub org: String,
}

/**
 * Error payload of the service. Only used to extract `reason`.
 */
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ServiceErrorRecord {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub ip: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub error: bool,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub reason: String,
}

// null decodes like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Anything but a JSON string becomes ""
fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}
