#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::test;
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Check a problem+json error response and return its parsed body.
pub async fn assert_problem_details(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
) -> Value {
    assert_eq!(resp.status().as_u16(), expected_status);

    let headers = resp.headers().clone();
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    match expected_status {
        401 => {
            assert_eq!(
                headers.get("WWW-Authenticate").and_then(|v| v.to_str().ok()),
                Some("Bearer")
            );
            assert!(headers.get("Retry-After").is_none());
        }
        503 => {
            assert!(headers.get("Retry-After").is_some());
            assert!(headers.get("WWW-Authenticate").is_none());
        }
        _ => {
            assert!(headers.get("WWW-Authenticate").is_none());
            assert!(headers.get("Retry-After").is_none());
        }
    }

    let body = test::read_body(resp).await;
    let problem: Value = serde_json::from_slice(&body).unwrap_or_else(|_| {
        panic!(
            "Failed to parse error body as ProblemDetails. Raw body: {}",
            String::from_utf8_lossy(&body)
        )
    });

    for key in ["type", "title", "status", "detail", "code"] {
        assert!(problem.get(key).is_some(), "{key} field should be present");
    }
    assert_eq!(problem["code"], expected_code);
    assert_eq!(problem["status"], expected_status);
    assert_eq!(
        problem["type"],
        format!("https://gamehub.dev/errors/{expected_code}")
    );
    problem
}
