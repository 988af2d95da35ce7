//! Tests for error types

use task_recurrence::core::{CodecError, ConfigError, StoreError};

#[test]
fn test_transport_error() {
    let err = StoreError::Transport("connection refused".to_string());
    assert_eq!(format!("{}", err), "transport error: connection refused");
}

#[test]
fn test_status_error_keeps_body() {
    let err = StoreError::Status {
        status: 400,
        body: r#"{"code":"validation_error"}"#.to_string(),
    };
    assert_eq!(
        format!("{}", err),
        r#"store returned status 400: {"code":"validation_error"}"#
    );
}

#[test]
fn test_decode_error() {
    let err = StoreError::Decode("expected value at line 1".to_string());
    assert_eq!(format!("{}", err), "decode error: expected value at line 1");
}

#[test]
fn test_missing_var_error() {
    let err = ConfigError::MissingVar("NOTION_API_TOKEN".to_string());
    assert_eq!(format!("{}", err), "missing required setting NOTION_API_TOKEN");
}

#[test]
fn test_invalid_setting_error() {
    let err = ConfigError::Invalid("daily_cap must be greater than 0".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid setting: daily_cap must be greater than 0"
    );
}

#[test]
fn test_codec_shape_error() {
    let err = CodecError::Shape {
        property: "Done".to_string(),
        expected: "checkbox",
    };
    assert_eq!(format!("{}", err), "property `Done` is not a valid checkbox");
}

#[test]
fn test_app_result_wraps_store_error() {
    fn fails() -> task_recurrence::core::AppResult<()> {
        Err(StoreError::Transport("down".into()))?
    }
    let err = fails().unwrap_err();
    assert!(err.downcast_ref::<StoreError>().is_some());
}
