//! Tests for the domain error payload and trace capture.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
#[case(Error::invalid_request("x"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("x"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("x"), ErrorCode::Forbidden)]
#[case(Error::not_found("x"), ErrorCode::NotFound)]
#[case(Error::conflict("x"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("x"), ErrorCode::ServiceUnavailable)]
#[case(Error::storage("x"), ErrorCode::StorageError)]
#[case(Error::internal("x"), ErrorCode::InternalError)]
fn convenience_constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_camel_case_envelope(expected_trace_id: String) {
    let error = Error::invalid_request("Query is required")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "field": "query" }));

    let value = serde_json::to_value(&error).expect("error serialises");
    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "Query is required",
            "traceId": expected_trace_id,
            "details": { "field": "query" },
        })
    );
}

#[rstest]
fn omits_absent_optional_fields(base_error: Error) {
    let value = serde_json::to_value(&base_error).expect("error serialises");
    assert!(value.get("traceId").is_none());
    assert!(value.get("details").is_none());
}
