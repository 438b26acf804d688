//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn render(error: &Error) -> (HttpResponse<()>, serde_json::Value) {
    let response = ResponseError::error_response(error);
    let (response, body) = response.into_parts();
    let bytes = to_bytes(body).await.expect("reading response body succeeds");
    let json = serde_json::from_slice(&bytes).expect("error body is JSON");
    (response, json)
}

#[rstest]
#[actix_web::test]
async fn error_response_carries_trace_id_header_and_body() {
    let error = Error::conflict("Conflicto: El RUT ya existe en el sistema")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"field": "rut", "value": "11-1"}));

    let (response, body) = render(&error).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace-id header is set")
        .to_str()
        .expect("header is ascii");
    assert_eq!(header, TRACE_ID);
    assert_eq!(
        body,
        json!({
            "code": "conflict",
            "message": "Conflicto: El RUT ya existe en el sistema",
            "traceId": TRACE_ID,
            "details": {"field": "rut", "value": "11-1"},
        })
    );
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_rendered_verbatim() {
    let error = Error::internal("Error inesperado: relation \"clientes\" does not exist");

    let (response, body) = render(&error).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["message"],
        "Error inesperado: relation \"clientes\" does not exist"
    );
}

#[rstest]
#[actix_web::test]
async fn trace_id_header_is_omitted_outside_a_request() {
    let (response, body) = render(&Error::not_found("No encontrado")).await;

    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
    assert!(body.get("traceId").is_none());
}
