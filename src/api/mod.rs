//! Client for the RapidAPI IP geolocation service.
//!
//! One `GET /ip/check?format=json&ip=<ip>` per lookup. The API key and host
//! travel as default headers on the underlying `reqwest::Client` (see
//! `initialization::init_client`). There is no retry; a failed call is
//! terminal for that lookup.

mod types;

pub use types::{ApiResponse, Asn, Location, Named, TimeInfo};

use log::debug;

use crate::config::LOOKUP_PATH;
use crate::error_handling::LookupError;

/// Geolocation API client.
#[derive(Debug, Clone)]
pub struct GeoClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeoClient {
    /// Wraps an HTTP client already carrying the API headers.
    ///
    /// A trailing slash on `base_url` is ignored.
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Full URL of the lookup endpoint (without query).
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, LOOKUP_PATH)
    }

    /// Fetches geolocation data for `ip`.
    ///
    /// # Errors
    ///
    /// - `LookupError::Request` if the request cannot be sent or the body read
    /// - `LookupError::Status` for non-2xx responses
    /// - `LookupError::Decode` if the body is not JSON
    pub async fn fetch(&self, ip: &str) -> Result<ApiResponse, LookupError> {
        let url = self.endpoint();
        debug!("GET {} ip={}", url, ip);

        let response = self
            .http
            .get(&url)
            .query(&[("format", "json"), ("ip", ip)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<ApiResponse>(&body)?;
        debug!("API status for {}: {:?}", ip, parsed.status);
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    fn client_for(server: &Server) -> GeoClient {
        GeoClient::new(reqwest::Client::new(), &server.url_str("/"))
    }

    #[tokio::test]
    async fn test_fetch_sends_ip_as_query() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/ip/check"),
                request::query(url_decoded(contains(("format", "json")))),
                request::query(url_decoded(contains(("ip", "1.1.1.1"))))
            ])
            .respond_with(json_encoded(serde_json::json!({
                "status": "success",
                "ip": "1.1.1.1",
                "location": {"latitude": -33.86, "longitude": 151.2}
            }))),
        );

        let response = client_for(&server).fetch("1.1.1.1").await.unwrap();
        assert_eq!(response.status.as_deref(), Some("success"));
        assert_eq!(response.ip.as_deref(), Some("1.1.1.1"));
    }

    #[tokio::test]
    async fn test_fetch_http_error_status() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/ip/check"))
                .respond_with(status_code(403)),
        );

        let err = client_for(&server).fetch("1.1.1.1").await.unwrap_err();
        assert!(matches!(err, LookupError::Status(s) if s.as_u16() == 403));
    }

    #[tokio::test]
    async fn test_fetch_non_json_body() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/ip/check"))
                .respond_with(status_code(200).body("<html>rate limited</html>")),
        );

        let err = client_for(&server).fetch("1.1.1.1").await.unwrap_err();
        assert!(matches!(err, LookupError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Nothing listens on port 9 (discard) in the test environment
        let client = GeoClient::new(reqwest::Client::new(), "http://127.0.0.1:9");
        let err = client.fetch("1.1.1.1").await.unwrap_err();
        assert!(matches!(err, LookupError::Request(_)));
    }

    #[test]
    fn test_endpoint_ignores_trailing_slash() {
        let client = GeoClient::new(reqwest::Client::new(), "https://api.example.com/");
        assert_eq!(client.endpoint(), "https://api.example.com/ip/check");
    }
}
