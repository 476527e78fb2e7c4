//! Tests to ensure error messages are actionable and consistent
//!
//! Configuration errors name the offending field and the expected value;
//! lookup errors map onto the three generic user-facing messages.

use ipscope::{Config, LookupError, LookupErrorKind};

#[test]
fn test_config_validation_errors_are_descriptive() {
    let mut config = Config::default();

    config.timeout_seconds = 0;
    let err = config.validate().expect_err("Zero timeout should fail validation");
    assert_eq!(err.field, "timeout_seconds");
    assert!(err.message.contains("greater than 0"));

    config = Config::default();
    config.api_url = "not a url".to_string();
    let err = config.validate().expect_err("Garbage URL should fail validation");
    assert_eq!(err.field, "api_url");
    assert!(err.message.contains("not a valid URL"));

    config = Config::default();
    config.api_host = "   ".to_string();
    let err = config.validate().expect_err("Blank host should fail validation");
    assert_eq!(err.field, "api_host");
    assert!(err.message.contains("rapidapi.com"), "Error should show an example host");

    config = Config::default();
    config.storage_key = String::new();
    let err = config.validate().expect_err("Empty storage key should fail validation");
    assert_eq!(err.field, "storage_key");
    assert!(err.to_string().starts_with("invalid storage_key"));
}

#[test]
fn test_lookup_error_messages() {
    assert_eq!(
        LookupError::EmptyInput.user_message(),
        "Please enter an IP address."
    );
    assert_eq!(
        LookupError::Malformed("location.latitude").user_message(),
        "Invalid or unknown IP address."
    );
    assert_eq!(
        LookupErrorKind::ApiUnavailable.to_string(),
        "Could not query the geolocation API. Please try again."
    );
}

#[test]
fn test_technical_detail_stays_in_display() {
    let err = LookupError::NotFound {
        ip: "10.0.0.999".to_string(),
        status: "failed".to_string(),
    };
    let detail = err.to_string();
    assert!(detail.contains("10.0.0.999"));
    assert!(detail.contains("failed"));
    assert!(!err.user_message().contains("10.0.0.999"));
}
