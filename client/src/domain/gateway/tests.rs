//! Tests for request construction and outcome classification.

use std::sync::Arc;

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::ports::{MockRegistryTransport, TransportError};

fn respond(status: u16, body: &str) -> TransportResponse {
    TransportResponse {
        status,
        body: body.as_bytes().to_vec(),
    }
}

fn gateway_returning(
    result: Result<TransportResponse, TransportError>,
) -> (RequestGateway, Arc<std::sync::Mutex<Vec<TransportRequest>>>) {
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);
    let mut transport = MockRegistryTransport::new();
    transport.expect_send().times(1).return_once(move |request| {
        recorder.lock().expect("request log lock").push(request);
        result
    });
    (RequestGateway::new(Arc::new(transport)), seen)
}

fn credentials() -> Credentials {
    Credentials::from_form("ada@example.com", "hunter2").expect("valid credentials")
}

#[tokio::test]
async fn login_posts_json_credentials_with_content_type() {
    let (gateway, seen) = gateway_returning(Ok(respond(200, r#"{"bearerToken":"abc"}"#)));

    let outcome = gateway.login(&credentials()).await.expect("response parsed");

    let session = match outcome {
        Outcome::Success(session) => session,
        Outcome::Failure { status, message } => panic!("unexpected failure {status}: {message}"),
    };
    assert_eq!(session.bearer_token(), Some("abc"));

    let requests = seen.lock().expect("request log lock");
    let request = requests.first().expect("one request sent");
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.path, "login");
    assert_eq!(request.header("content-type"), Some(JSON_CONTENT_TYPE));
    let body: Value =
        serde_json::from_slice(request.body.as_deref().expect("login carries a body"))
            .expect("body is JSON");
    assert_eq!(
        body,
        json!({ "email": "ada@example.com", "password": "hunter2" })
    );
}

#[rstest]
#[case("hunter2")]
#[case("\u{1}\u{2}\u{1f}\"\\")]
#[case("p\u{e9}ss w\u{f6}rd")]
fn login_body_fits_its_reserved_buffer(#[case] password: &str) {
    let creds = Credentials::from_form("ada@example.com", password).expect("valid credentials");

    let body = login_body(&creds).expect("body encodes");

    let reserved = (creds.email().len() + password.len()) * MAX_ESCAPED_BYTES_PER_BYTE
        + LOGIN_BODY_FRAMING;
    assert!(body.len() <= reserved);
    let decoded: Value = serde_json::from_slice(&body).expect("body is JSON");
    assert_eq!(
        decoded,
        json!({ "email": "ada@example.com", "password": password })
    );
}

#[tokio::test]
async fn models_is_a_bodyless_get_without_content_type() {
    let (gateway, seen) = gateway_returning(Ok(respond(200, "[]")));

    let outcome = gateway
        .fetch_models(&SessionContext::anonymous())
        .await
        .expect("response parsed");
    assert_eq!(outcome, Outcome::Success(Vec::new()));

    let requests = seen.lock().expect("request log lock");
    let request = requests.first().expect("one request sent");
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.path, "models");
    assert!(request.body.is_none());
    assert_eq!(request.header("Content-Type"), None);
    assert_eq!(request.header(AUTHORIZATION_HEADER), None);
}

#[tokio::test]
async fn models_forwards_the_session_bearer_token() {
    let (gateway, seen) = gateway_returning(Ok(respond(200, "[]")));
    let session =
        Session::try_from_value(json!({ "bearerToken": "bearer abc" })).expect("object payload");

    gateway
        .fetch_models(&SessionContext::from_loaded(Some(session)))
        .await
        .expect("response parsed");

    let requests = seen.lock().expect("request log lock");
    let request = requests.first().expect("one request sent");
    assert_eq!(request.header(AUTHORIZATION_HEADER), Some("bearer abc"));
}

#[rstest]
#[case::message_field(401, r#"{"message":"bad password"}"#, "bad password")]
#[case::detail_field(404, r#"{"detail":"Package not found"}"#, "Package not found")]
#[case::message_wins(400, r#"{"message":"first","detail":"second"}"#, "first")]
#[case::no_reason(500, r#"{"error":true}"#, UNKNOWN_ERROR_MESSAGE)]
#[case::non_string_reason(422, r#"{"message":{"field":"email"}}"#, UNKNOWN_ERROR_MESSAGE)]
#[case::array_body(503, "[]", UNKNOWN_ERROR_MESSAGE)]
#[tokio::test]
async fn non_success_statuses_become_failures(
    #[case] status: u16,
    #[case] body: &str,
    #[case] expected: &str,
) {
    let (gateway, _) = gateway_returning(Ok(respond(status, body)));

    let outcome = gateway
        .call(Endpoint::Models, None, None)
        .await
        .expect("response parsed");

    assert_eq!(
        outcome,
        Outcome::Failure {
            status,
            message: expected.to_owned()
        }
    );
}

#[tokio::test]
async fn success_shaped_body_on_error_status_is_still_a_failure() {
    let (gateway, _) = gateway_returning(Ok(respond(403, r#"{"bearerToken":"abc"}"#)));

    let outcome = gateway.login(&credentials()).await.expect("response parsed");

    assert_eq!(
        outcome,
        Outcome::Failure {
            status: 403,
            message: UNKNOWN_ERROR_MESSAGE.to_owned()
        }
    );
}

#[rstest]
#[case::unreachable(TransportError::unreachable("connection refused"))]
#[case::timeout(TransportError::timeout("30s elapsed"))]
#[case::io(TransportError::io("connection reset"))]
#[tokio::test]
async fn transport_faults_become_network_errors(#[case] fault: TransportError) {
    let (gateway, _) = gateway_returning(Err(fault));

    let error = gateway
        .login(&credentials())
        .await
        .expect_err("transport fault");

    assert!(matches!(error, GatewayError::Network { .. }));
}

#[rstest]
#[case::html_success(200, "<html>oops</html>")]
#[case::empty_failure(401, "")]
#[case::truncated(200, r#"{"bearerToken":"#)]
#[tokio::test]
async fn unparseable_bodies_are_malformed_whatever_the_status(
    #[case] status: u16,
    #[case] body: &str,
) {
    let (gateway, _) = gateway_returning(Ok(respond(status, body)));

    let error = gateway
        .call(Endpoint::Login, None, None)
        .await
        .expect_err("body must not parse");

    assert!(matches!(error, GatewayError::MalformedResponse { .. }));
}

#[tokio::test]
async fn non_object_session_is_malformed() {
    let (gateway, _) = gateway_returning(Ok(respond(200, r#""just-a-token""#)));

    let error = gateway
        .login(&credentials())
        .await
        .expect_err("string session must be rejected");

    assert!(matches!(error, GatewayError::MalformedResponse { .. }));
}

#[tokio::test]
async fn catalog_shape_mismatch_is_malformed() {
    let (gateway, _) = gateway_returning(Ok(respond(
        200,
        r#"[{"name":"bert","category":"model","description":"encoder"}]"#,
    )));

    let error = gateway
        .fetch_models(&SessionContext::anonymous())
        .await
        .expect_err("missing rating must be rejected");

    assert!(matches!(error, GatewayError::MalformedResponse { .. }));
}
