use crate::error::{IpApiError, Result};
use crate::record::{LocationRecord, ServiceErrorRecord};
use serde_json::{Map, Value};
use tracing::debug;

/**
 * Decode a response body into a LocationRecord.
 *
 * The service answers HTTP 200 for both successful lookups and its own
 * rejections, so the body is first parsed into a generic map and checked
 * for `"error": true` before being decoded into the matching shape.
 */
pub fn decode_response(body: &[u8]) -> Result<LocationRecord> {
    let raw: Map<String, Value> = serde_json::from_slice(body)?;

    if is_error_shape(&raw) {
        debug!("Response classified as service error");
        let payload: ServiceErrorRecord = serde_json::from_value(Value::Object(raw))?;
        return Err(IpApiError::Service {
            reason: payload.reason,
            ip: payload.ip,
        });
    }

    debug!("Response classified as location record");
    let record: LocationRecord = serde_json::from_slice(body)?;
    Ok(record)
}

// Only a literal boolean true marks the error shape
fn is_error_shape(raw: &Map<String, Value>) -> bool {
    matches!(raw.get("error"), Some(Value::Bool(true)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;
    use serde_json::json;

    fn body(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn test_error_shape_surfaces_reason() {
        let err = decode_response(&body(json!({
            "ip": "192.34.176.174",
            "error": true,
            "reason": "some reason",
        })))
        .unwrap_err();

        match err {
            IpApiError::Service { reason, ip } => {
                assert_eq!(reason, "some reason");
                assert_eq!(ip, "192.34.176.174");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_shape_without_reason_has_empty_message() {
        let err = decode_response(&body(json!({ "error": true }))).unwrap_err();
        assert_eq!(err.stage(), Stage::Service);
        assert_eq!(err.to_string(), "");
    }

    #[test]
    fn test_success_shape_is_decoded() {
        let record = decode_response(&body(json!({
            "ip": "192.34.176.174",
            "city": "Frankfurt am Main",
            "in_eu": true,
            "latitude": 50.1153,
            "longitude": 8.6823,
        })))
        .unwrap();

        assert_eq!(record.ip, "192.34.176.174");
        assert_eq!(record.city, "Frankfurt am Main");
        assert!(record.in_eu);
        assert_eq!(record.latitude, 50.1153);
    }

    #[test]
    fn test_non_true_error_values_are_success_candidates() {
        for flag in [json!(false), json!("true"), json!(1), Value::Null] {
            let record = decode_response(&body(json!({ "ip": "8.8.8.8", "error": flag })))
                .unwrap();
            assert_eq!(record.ip, "8.8.8.8");
        }
    }

    #[test]
    fn test_missing_error_key_with_bad_fields_is_decode_error() {
        let err = decode_response(&body(json!({ "ip": "8.8.8.8", "latitude": "north" })))
            .unwrap_err();
        assert_eq!(err.stage(), Stage::Decode);
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let err = decode_response(b"<html>Too many requests</html>").unwrap_err();
        assert_eq!(err.stage(), Stage::Decode);

        let err = decode_response(b"[1, 2, 3]").unwrap_err();
        assert_eq!(err.stage(), Stage::Decode);
    }
}
