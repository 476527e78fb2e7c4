//! Configuration constants.
//!
//! This module defines the constants used as defaults throughout the application:
//! the geolocation API endpoint, storage location, and map defaults.

/// Host of the RapidAPI geolocation service.
///
/// Sent as the `x-rapidapi-host` header on every request.
pub const DEFAULT_API_HOST: &str = "ip-geo-location.p.rapidapi.com";

/// Base URL of the geolocation API (no trailing slash).
pub const DEFAULT_API_URL: &str = "https://ip-geo-location.p.rapidapi.com";

/// Path of the lookup endpoint, relative to the API base URL.
pub const LOOKUP_PATH: &str = "/ip/check";

/// Environment variable holding the RapidAPI key.
pub const API_KEY_ENV: &str = "IPSCOPE_API_KEY";

/// Header carrying the RapidAPI key.
pub const HEADER_RAPIDAPI_KEY: &str = "x-rapidapi-key";

/// Header carrying the RapidAPI host.
pub const HEADER_RAPIDAPI_HOST: &str = "x-rapidapi-host";

/// Value of the API `status` field for a successful lookup.
pub const API_STATUS_SUCCESS: &str = "success";

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Directory holding the storage slots.
pub const DEFAULT_STORE_DIR: &str = ".ipscope";

/// Storage slot under which the whole record list is serialized.
///
/// Matches the key used by the original browser page so exported
/// local storage can be dropped into the store directory as is.
pub const STORAGE_KEY: &str = "ipscope_registros";

/// Initial map centre (latitude, longitude) before anything is selected.
pub const MAP_INITIAL_CENTER: (f64, f64) = (20.0, 0.0);

/// Initial map zoom level.
pub const MAP_INITIAL_ZOOM: u8 = 2;

/// Zoom level used when flying to a looked-up location.
pub const MAP_FOCUS_ZOOM: u8 = 8;

/// OpenStreetMap base URL used to build map links.
pub const OSM_BASE_URL: &str = "https://www.openstreetmap.org/";

/// Number of decimals shown for coordinates in the history table.
pub const COORDINATE_PRECISION: usize = 4;
