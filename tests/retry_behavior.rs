//! Retry behavior as seen through the upstream client.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use roster_core::{
    DomainErrorKind, EmployeeUpstream, RetryExecutor, RetryPolicy, ScriptedHttpClient,
};
use roster_tests::support;

use support::RAY_ID;

#[tokio::test]
async fn server_errors_are_retried_until_success() {
    let client = ScriptedHttpClient::new()
        .respond(500, "")
        .respond(503, "")
        .respond(200, support::sample_directory());
    let upstream = support::upstream(&client, 3);

    let employees = upstream.list_all().await.expect("third attempt succeeds");

    assert_eq!(employees.len(), 3);
    assert_eq!(client.request_count(), 3);
}

#[tokio::test]
async fn exhausted_retries_surface_the_last_error() {
    let client = ScriptedHttpClient::new()
        .respond(500, "")
        .respond(502, "")
        .respond(429, "slow down");
    let upstream = support::upstream(&client, 3);

    let error = upstream.list_all().await.expect_err("exhausted");

    assert_eq!(error.kind(), DomainErrorKind::RateLimited);
    assert_eq!(error.message(), "rate limit exceeded");
    assert_eq!(client.request_count(), 3);
    assert_eq!(client.remaining(), 0);
}

#[tokio::test]
async fn rate_limits_are_retried() {
    let client = ScriptedHttpClient::new()
        .respond(429, "")
        .respond(200, support::sample_directory());
    let upstream = support::upstream(&client, 3);

    upstream.list_all().await.expect("recovers after 429");

    assert_eq!(client.request_count(), 2);
}

#[tokio::test]
async fn unavailable_error_keeps_the_upstream_cause() {
    let client = ScriptedHttpClient::new().respond(503, "maintenance");
    let upstream = support::upstream(&client, 1);

    let error = upstream.list_all().await.expect_err("unavailable");

    assert_eq!(error.kind(), DomainErrorKind::UpstreamUnavailable);
    let cause = error.cause().expect("cause is kept").to_string();
    assert!(cause.contains("503"), "cause={cause}");
}

#[tokio::test]
async fn client_errors_are_never_retried() {
    for (status, kind) in [
        (400, DomainErrorKind::InvalidInput),
        (404, DomainErrorKind::NotFound),
        (418, DomainErrorKind::Unknown),
    ] {
        let client = ScriptedHttpClient::new()
            .respond(status, "")
            .respond(200, support::sample_directory());
        let upstream = support::upstream(&client, 5);

        let error = upstream.get_by_id(RAY_ID).await.expect_err("non-transient");

        assert_eq!(error.kind(), kind, "status {status}");
        assert_eq!(client.request_count(), 1, "status {status}");
    }
}

#[tokio::test]
async fn no_retry_policy_makes_a_single_attempt() {
    let client = ScriptedHttpClient::new()
        .respond(500, "")
        .respond(200, support::sample_directory());
    let upstream = support::upstream(&client, 1)
        .with_retry_executor(RetryExecutor::new(RetryPolicy::no_retry()));

    let error = upstream.list_all().await.expect_err("single attempt");

    assert_eq!(error.kind(), DomainErrorKind::UpstreamUnavailable);
    assert_eq!(client.request_count(), 1);
}

#[tokio::test]
async fn observer_reports_each_failed_attempt() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let executor = RetryExecutor::new(RetryPolicy::fixed(Duration::ZERO, 3)).with_observer(
        move |operation, state| {
            let code = state.last_error.as_ref().map(|error| error.code());
            sink.lock()
                .expect("observer lock")
                .push((operation.to_owned(), state.attempt, code));
        },
    );
    let client = ScriptedHttpClient::new()
        .respond(502, "")
        .respond(429, "")
        .respond(200, support::sample_directory());
    let upstream = support::upstream(&client, 3).with_retry_executor(executor);

    upstream.list_all().await.expect("recovers");

    let seen = seen.lock().expect("observer lock").clone();
    assert_eq!(
        seen,
        vec![
            (String::from("list"), 1, Some("directory.upstream_unavailable")),
            (String::from("list"), 2, Some("directory.rate_limited")),
        ]
    );
}
