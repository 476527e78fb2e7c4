//! Geolocation API response types.
//!
//! Every field is optional at the serde level so that a partial response can
//! be reported as malformed instead of failing to decode.

use serde::Deserialize;

use crate::config::API_STATUS_SUCCESS;
use crate::error_handling::LookupError;
use crate::history::Record;

/// Object carrying a display name (`country`, `city`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Named {
    /// Display name
    pub name: Option<String>,
}

/// Autonomous system details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Asn {
    /// Organisation owning the AS (used as the ISP)
    pub organisation: Option<String>,
}

/// Time details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeInfo {
    /// IANA timezone name
    pub timezone: Option<String>,
}

/// Coordinates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees
    pub longitude: Option<f64>,
}

/// Body of `GET /ip/check?format=json&ip=...`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    /// `"success"` on a successful lookup
    pub status: Option<String>,
    /// Address the result refers to
    pub ip: Option<String>,
    /// Country
    pub country: Option<Named>,
    /// City
    pub city: Option<Named>,
    /// Autonomous system
    pub asn: Option<Asn>,
    /// Time details
    pub time: Option<TimeInfo>,
    /// Coordinates
    pub location: Option<Location>,
}

impl ApiResponse {
    /// Builds a record from a successful response.
    ///
    /// # Errors
    ///
    /// - `LookupError::NotFound` if `status` is not `"success"` or `ip` is
    ///   missing or empty
    /// - `LookupError::Malformed` if the coordinates are missing
    pub fn into_record(self, id: u64, requested_ip: &str) -> Result<Record, LookupError> {
        let status = self.status.unwrap_or_default();
        let ip = self.ip.filter(|ip| !ip.trim().is_empty());
        let ip = match ip {
            Some(ip) if status == API_STATUS_SUCCESS => ip,
            _ => {
                return Err(LookupError::NotFound {
                    ip: requested_ip.to_string(),
                    status,
                })
            }
        };

        let location = self.location.unwrap_or_default();
        let latitude = location
            .latitude
            .ok_or(LookupError::Malformed("location.latitude"))?;
        let longitude = location
            .longitude
            .ok_or(LookupError::Malformed("location.longitude"))?;

        Ok(Record {
            id,
            ip,
            country: self.country.and_then(|c| c.name).unwrap_or_default(),
            city: self.city.and_then(|c| c.name).unwrap_or_default(),
            isp: self.asn.and_then(|a| a.organisation).unwrap_or_default(),
            timezone: self.time.and_then(|t| t.timezone).unwrap_or_default(),
            latitude,
            longitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOGLE_DNS: &str = r#"{
        "status": "success",
        "ip": "8.8.8.8",
        "type": "IPv4",
        "country": {"name": "United States", "code": "US"},
        "city": {"name": "Mountain View", "population": 74066},
        "asn": {"number": 15169, "organisation": "Google LLC"},
        "time": {"timezone": "America/Los_Angeles", "gtm_offset": -25200},
        "location": {"latitude": 37.4056, "longitude": -122.0775}
    }"#;

    #[test]
    fn test_full_response_becomes_record() {
        let response: ApiResponse = serde_json::from_str(GOOGLE_DNS).unwrap();
        let record = response.into_record(42, "8.8.8.8").unwrap();
        assert_eq!(record.id, 42);
        assert_eq!(record.ip, "8.8.8.8");
        assert_eq!(record.country, "United States");
        assert_eq!(record.city, "Mountain View");
        assert_eq!(record.isp, "Google LLC");
        assert_eq!(record.timezone, "America/Los_Angeles");
        assert_eq!(record.latitude, 37.4056);
        assert_eq!(record.longitude, -122.0775);
    }

    #[test]
    fn test_failed_status_is_not_found() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"status": "failed", "message": "invalid ip"}"#).unwrap();
        match response.into_record(1, "300.1.1.1") {
            Err(LookupError::NotFound { ip, status }) => {
                assert_eq!(ip, "300.1.1.1");
                assert_eq!(status, "failed");
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_success_without_ip_is_not_found() {
        let response: ApiResponse = serde_json::from_str(r#"{"status": "success"}"#).unwrap();
        assert!(matches!(
            response.into_record(1, "1.2.3.4"),
            Err(LookupError::NotFound { .. })
        ));
    }

    #[test]
    fn test_missing_coordinates_is_malformed() {
        let response: ApiResponse = serde_json::from_str(
            r#"{"status": "success", "ip": "1.2.3.4", "location": {"latitude": 1.0}}"#,
        )
        .unwrap();
        assert!(matches!(
            response.into_record(1, "1.2.3.4"),
            Err(LookupError::Malformed("location.longitude"))
        ));
    }

    #[test]
    fn test_missing_names_become_empty() {
        let response: ApiResponse = serde_json::from_str(
            r#"{"status": "success", "ip": "1.2.3.4", "city": {"name": null},
                "location": {"latitude": 1.5, "longitude": 2.5}}"#,
        )
        .unwrap();
        let record = response.into_record(1, "1.2.3.4").unwrap();
        assert_eq!(record.city, "");
        assert_eq!(record.country, "");
        assert_eq!(record.isp, "");
        assert_eq!(record.timezone, "");
    }
}
