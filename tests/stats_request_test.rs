use employee_stats::{run, ErrorCategory, Outcome, RequestSettings};
use httpmock::prelude::*;
use serde_json::Value;
use std::time::Duration;

const STATS_PATH: &str = "/api/employee/stats";

fn lines(outcome: &Outcome) -> Vec<String> {
    outcome.to_text().lines().map(str::to_string).collect()
}

/// An address nothing listens on: bind an ephemeral port, then release it.
fn refused_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, STATS_PATH)
}

#[tokio::test]
async fn test_success_prints_pretty_json() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path(STATS_PATH)
            .header("authorization", "Bearer test-token");
        then.status(200)
            .header("Content-Type", "application/json")
            .body(r#"{"count": 5}"#);
    });

    let settings = RequestSettings::new(server.url(STATS_PATH)).with_token("test-token");
    let outcome = run(settings).await;

    api_mock.assert();
    assert!(outcome.is_success());
    assert_eq!(outcome.to_text(), "API Response (JSON):\n{\n  \"count\": 5\n}\n");
}

#[tokio::test]
async fn test_not_found_prints_status_and_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(STATS_PATH);
        then.status(404).body("Not Found");
    });

    let outcome = run(RequestSettings::new(server.url(STATS_PATH)).with_token("t")).await;

    let printed = lines(&outcome);
    assert_eq!(printed.len(), 3);
    assert!(printed[0].starts_with("Error making request: "));
    assert!(printed[0].contains("404"));
    assert_eq!(printed[1], "HTTP Status Code: 404");
    assert_eq!(printed[2], "Response Content: Not Found");
}

#[tokio::test]
async fn test_connection_refused_prints_error_only() {
    let outcome = run(RequestSettings::new(refused_endpoint()).with_token("t")).await;

    match &outcome {
        Outcome::Failure(e) => {
            assert_eq!(e.category(), ErrorCategory::Request);
            assert!(e.response().is_none());
        }
        Outcome::Success(_) => panic!("expected a transport failure"),
    }

    let printed = lines(&outcome);
    assert_eq!(printed.len(), 1);
    assert!(printed[0].starts_with("Error making request: "));
}

#[tokio::test]
async fn test_malformed_body_prints_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(STATS_PATH);
        then.status(200).body("not-json");
    });

    let outcome = run(RequestSettings::new(server.url(STATS_PATH)).with_token("t")).await;

    let printed = lines(&outcome);
    assert_eq!(printed.len(), 3);
    assert!(printed[0].starts_with("Error decoding JSON: "));
    assert_eq!(printed[1], "HTTP Status Code: 200");
    assert_eq!(printed[2], "Response Content: not-json");
}

#[tokio::test]
async fn test_empty_success_body_is_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(STATS_PATH);
        then.status(200);
    });

    let outcome = run(RequestSettings::new(server.url(STATS_PATH))).await;

    let printed = lines(&outcome);
    assert!(printed[0].starts_with("Error decoding JSON: "));
    assert_eq!(printed[1], "HTTP Status Code: 200");
    assert_eq!(printed[2], "Response Content: ");
}

#[tokio::test]
async fn test_printed_json_round_trips_with_key_order() {
    let body = r#"{"code":200,"message":"成功","data":{"total":12,"deptCount":3,"averageSalary":9100.25,"activeCount":11,"deptDistribution":[{"name":"研发部","value":7},{"name":"市场部","value":5}],"genderDistribution":[],"salaryDistribution":[{"range":"5k-10k","count":8}]}}"#;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(STATS_PATH);
        then.status(200).body(body);
    });

    let outcome = run(RequestSettings::new(server.url(STATS_PATH)).with_token("t")).await;
    let text = outcome.to_text();
    let printed_json = text
        .strip_prefix("API Response (JSON):\n")
        .expect("success heading");

    let original: Value = serde_json::from_str(body).unwrap();
    let reparsed: Value = serde_json::from_str(printed_json).unwrap();
    assert_eq!(original, reparsed);

    let original_keys: Vec<&String> = original["data"].as_object().unwrap().keys().collect();
    let printed_keys: Vec<&String> = reparsed["data"].as_object().unwrap().keys().collect();
    assert_eq!(original_keys, printed_keys);
    assert!(printed_json.contains("\n  \"code\": 200"));
}

#[tokio::test]
async fn test_extra_headers_are_sent() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path(STATS_PATH)
            .header("accept", "application/json")
            .header("x-client", "employee-stats")
            .header("authorization", "Bearer t");
        then.status(200).body("[]");
    });

    let settings = RequestSettings::new(server.url(STATS_PATH))
        .with_token("t")
        .with_header("Accept", "application/json")
        .with_header("X-Client", "employee-stats");
    let outcome = run(settings).await;

    api_mock.assert();
    assert_eq!(outcome.to_text(), "API Response (JSON):\n[]\n");
}

#[tokio::test]
async fn test_missing_token_sends_no_authorization_header() {
    let server = MockServer::start();
    let with_auth = server.mock(|when, then| {
        when.method(GET).path(STATS_PATH).header_exists("authorization");
        then.status(401).body("Unauthorized");
    });
    let without_auth = server.mock(|when, then| {
        when.method(GET).path(STATS_PATH);
        then.status(200).body(r#"{"ok":true}"#);
    });

    let outcome = run(RequestSettings::new(server.url(STATS_PATH))).await;

    with_auth.assert_hits(0);
    without_auth.assert();
    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_unauthorized_is_request_failure_with_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(STATS_PATH);
        then.status(401)
            .body(r#"{"code":401,"message":"Unauthorized"}"#);
    });

    let outcome = run(RequestSettings::new(server.url(STATS_PATH)).with_token("expired")).await;

    assert_eq!(outcome.exit_code(), 1);
    let printed = lines(&outcome);
    assert_eq!(printed[1], "HTTP Status Code: 401");
    assert_eq!(
        printed[2],
        r#"Response Content: {"code":401,"message":"Unauthorized"}"#
    );
}

#[tokio::test]
async fn test_timeout_prints_error_only() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(STATS_PATH);
        then.status(200)
            .delay(Duration::from_secs(3))
            .body(r#"{"count": 5}"#);
    });

    let settings = RequestSettings::new(server.url(STATS_PATH))
        .with_token("t")
        .with_timeout_seconds(1);
    let outcome = run(settings).await;

    match &outcome {
        Outcome::Failure(e) => {
            assert_eq!(e.category(), ErrorCategory::Request);
            assert!(e.response().is_none());
        }
        Outcome::Success(_) => panic!("expected the request to time out"),
    }

    let printed = lines(&outcome);
    assert_eq!(printed.len(), 1);
    assert!(printed[0].starts_with("Error making request: "));
}
