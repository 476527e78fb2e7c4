// Shared test helpers for a fake geolocation API and app setup.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use httptest::{matchers::*, responders::*, Expectation, Server};
use ipscope::storage::Storage;
use ipscope::{App, GeoClient};

/// Storage slot used by the tests.
#[allow(dead_code)] // Used by other test files
pub const KEY: &str = "ipscope_registros";

/// A successful API body for `ip`.
#[allow(dead_code)] // Used by other test files
pub fn success_body(ip: &str, country: &str, city: &str, isp: &str, timezone: &str) -> serde_json::Value {
    serde_json::json!({
        "status": "success",
        "ip": ip,
        "type": "IPv4",
        "country": {"name": country, "code": "XX"},
        "city": {"name": city},
        "asn": {"number": 64500, "organisation": isp},
        "time": {"timezone": timezone},
        "location": {"latitude": 10.5, "longitude": -20.25}
    })
}

/// Expects exactly one lookup for `ip`, answered with `body`.
#[allow(dead_code)] // Used by other test files
pub fn expect_lookup(server: &Server, ip: &'static str, body: serde_json::Value) {
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/ip/check"),
            request::query(url_decoded(contains(("ip", ip))))
        ])
        .respond_with(json_encoded(body)),
    );
}

/// App talking to `server` and persisting into `storage`.
#[allow(dead_code)] // Used by other test files
pub fn app_for<S: Storage>(server: &Server, storage: S) -> App<S> {
    let client = GeoClient::new(reqwest::Client::new(), &server.url_str("/"));
    App::new(client, storage, KEY)
}
