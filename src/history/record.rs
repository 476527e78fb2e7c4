//! Lookup record type.

use serde::{Deserialize, Deserializer, Serialize};

/// One persisted IP-lookup result.
///
/// Records are created on a successful lookup and never updated in place.
/// The legacy field names written by the browser version of the tool
/// (`pais`, `ciudad`, `lat`, `lon`) are accepted when reading, and missing
/// or `null` text fields read as empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Creation timestamp in milliseconds since the Unix epoch; unique per history
    pub id: u64,
    /// Address as reported by the API
    pub ip: String,
    /// Country name
    #[serde(alias = "pais", default, deserialize_with = "null_as_empty")]
    pub country: String,
    /// City name
    #[serde(alias = "ciudad", default, deserialize_with = "null_as_empty")]
    pub city: String,
    /// Organisation owning the autonomous system
    #[serde(default, deserialize_with = "null_as_empty")]
    pub isp: String,
    /// IANA timezone name
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timezone: String,
    /// Latitude in decimal degrees
    #[serde(alias = "lat")]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[serde(alias = "lon")]
    pub longitude: f64,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Record {
    /// Returns true if `needle` occurs in the ip, country, city, ISP or timezone.
    ///
    /// `needle` must already be lowercased; the fields are compared lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        [
            &self.ip,
            &self.country,
            &self.city,
            &self.isp,
            &self.timezone,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }

    /// Short "city, country" label, skipping whichever part is empty.
    pub fn place(&self) -> String {
        match (self.city.is_empty(), self.country.is_empty()) {
            (false, false) => format!("{}, {}", self.city, self.country),
            (false, true) => self.city.clone(),
            (true, false) => self.country.clone(),
            (true, true) => String::new(),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample(id: u64, ip: &str, country: &str, city: &str) -> Record {
    Record {
        id,
        ip: ip.to_string(),
        country: country.to_string(),
        city: city.to_string(),
        isp: "Example Networks".to_string(),
        timezone: "Europe/Madrid".to_string(),
        latitude: 40.4168,
        longitude: -3.7038,
    }
}
