use super::*;
use std::error::Error;

#[test]
fn test_network_error_connection_refused() {
    let err = NxsError::network("connection refused");

    assert!(matches!(err, NxsError::Network { .. }));
    assert!(err.to_string().contains("connection refused"));
    assert!(err.source().is_none());
}

#[test]
fn test_network_error_with_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let err = NxsError::network_with_source("failed to connect", io_err);

    assert!(err.to_string().contains("failed to connect"));
    assert!(err.source().is_some());
}

#[test]
fn test_protocol_error_carries_status() {
    let err = NxsError::protocol("HTTP 401: unauthorized", Some(401));

    assert!(matches!(err, NxsError::Protocol { .. }));
    assert_eq!(err.status_code(), Some(401));
    assert!(err.to_string().contains("401"));
}

#[test]
fn test_protocol_error_decode_failure_has_no_status() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err = NxsError::protocol_with_source("Failed to decode search response", json_err);

    assert_eq!(err.status_code(), None);
    assert!(err.source().is_some());
    assert!(err.to_string().contains("decode"));
}

#[test]
fn test_status_code_only_for_protocol_errors() {
    assert_eq!(NxsError::network("timeout").status_code(), None);
    assert_eq!(NxsError::validation("empty").status_code(), None);
}

#[test]
fn test_validation_error_display() {
    let err = NxsError::validation("Server URL cannot be empty");
    assert_eq!(
        err.to_string(),
        "Validation error: Server URL cannot be empty"
    );
}

#[test]
fn test_errors_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NxsError>();
}
