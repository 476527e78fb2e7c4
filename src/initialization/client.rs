//! HTTP client initialization.
//!
//! This module builds the `reqwest::Client` used for geolocation lookups.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::ClientBuilder;

use crate::config::{Config, HEADER_RAPIDAPI_HOST, HEADER_RAPIDAPI_KEY};
use crate::error_handling::InitializationError;

/// Initializes the HTTP client for the geolocation API.
///
/// Creates a `reqwest::Client` configured with:
/// - Timeout from the configuration
/// - `x-rapidapi-host` and (when set) `x-rapidapi-key` as default headers
/// - A crate-specific User-Agent
///
/// # Arguments
///
/// * `config` - Configuration containing API host, key, and timeout
///
/// # Errors
///
/// Returns `InitializationError::HeaderValueError` if the host or key contain
/// characters not allowed in header values, or `HttpClientError` if client
/// creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, InitializationError> {
    let mut headers = HeaderMap::new();

    let host = HeaderValue::from_str(&config.api_host)
        .map_err(|_| InitializationError::HeaderValueError(HEADER_RAPIDAPI_HOST))?;
    headers.insert(HEADER_RAPIDAPI_HOST, host);

    if let Some(key) = &config.api_key {
        let mut key = HeaderValue::from_str(key)
            .map_err(|_| InitializationError::HeaderValueError(HEADER_RAPIDAPI_KEY))?;
        key.set_sensitive(true);
        headers.insert(HEADER_RAPIDAPI_KEY, key);
    }

    let client = ClientBuilder::new()
        .timeout(config.timeout())
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GeoClient;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    #[tokio::test]
    async fn test_client_sends_rapidapi_headers() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/ip/check"),
                request::headers(contains(("x-rapidapi-host", "geo.test"))),
                request::headers(contains(("x-rapidapi-key", "k3y")))
            ])
            .respond_with(json_encoded(serde_json::json!({"status": "failed"}))),
        );

        let config = Config {
            api_host: "geo.test".to_string(),
            api_key: Some("k3y".to_string()),
            ..Default::default()
        };
        let http = init_client(&config).unwrap();
        let response = GeoClient::new(http, &server.url_str("/"))
            .fetch("1.1.1.1")
            .await
            .unwrap();
        assert_eq!(response.status.as_deref(), Some("failed"));
    }

    #[test]
    fn test_client_rejects_invalid_header_value() {
        let config = Config {
            api_key: Some("bad\nkey".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            init_client(&config),
            Err(InitializationError::HeaderValueError(HEADER_RAPIDAPI_KEY))
        ));
    }
}
