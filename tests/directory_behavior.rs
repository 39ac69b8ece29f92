//! Behavior-driven tests for the directory operations.
//!
//! Each test states the upstream situation, invokes one public operation, and checks
//! the caller-visible outcome together with the upstream traffic it caused.

use roster_core::{
    DomainErrorKind, EmployeeCreateRequest, HttpMethod, ScriptedHttpClient, DEFAULT_TOP_EARNERS,
};
use roster_tests::support;

use support::{record, success, RAY_ID};

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn when_searching_user_gets_case_insensitive_substring_matches() {
    // Given: a directory containing "John Doe", "Jane Ray" and "Ray"
    let client = ScriptedHttpClient::new().respond(200, support::sample_directory());
    let directory = support::directory(&client);

    // When: the user searches for "rAy"
    let matches = directory.search_by_name("rAy").await.expect("search succeeds");

    // Then: both Ray entries match, in upstream order
    let names: Vec<_> = matches.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Jane Ray", "Ray"]);
}

#[tokio::test]
async fn when_search_string_is_blank_no_upstream_call_is_made() {
    let client = ScriptedHttpClient::new();
    let directory = support::directory(&client);

    for blank in ["", "   ", "\t"] {
        let error = directory.search_by_name(blank).await.expect_err("blank is rejected");
        assert_eq!(error.kind(), DomainErrorKind::InvalidInput);
    }

    assert_eq!(client.request_count(), 0);
}

// =============================================================================
// Aggregates
// =============================================================================

#[tokio::test]
async fn highest_salary_is_the_maximum_observed() {
    let client = ScriptedHttpClient::new().respond(200, support::sample_directory());
    let directory = support::directory(&client);

    assert_eq!(directory.highest_salary().await.expect("computed"), 60_000);
}

#[tokio::test]
async fn highest_salary_of_empty_directory_is_zero() {
    let client = ScriptedHttpClient::new().respond(200, success("[]"));
    let directory = support::directory(&client);

    assert_eq!(directory.highest_salary().await.expect("computed"), 0);
}

#[tokio::test]
async fn aggregates_are_recomputed_on_every_call() {
    let client = ScriptedHttpClient::new()
        .respond(200, support::sample_directory())
        .respond(200, support::list(&[record(RAY_ID, "Ray", 90_000, 40, "CEO")]));
    let directory = support::directory(&client);

    assert_eq!(directory.highest_salary().await.expect("first"), 60_000);
    assert_eq!(directory.highest_salary().await.expect("second"), 90_000);
    assert_eq!(client.request_count(), 2);
}

#[tokio::test]
async fn transient_upstream_failures_are_absorbed_by_retry() {
    // Given: the upstream fails twice with 500 before answering
    let client = ScriptedHttpClient::new()
        .respond(500, "")
        .respond(500, "")
        .respond(200, support::sample_directory());
    let directory = support::directory(&client);

    // When: the highest salary is requested
    let highest = directory.highest_salary().await.expect("third attempt succeeds");

    // Then: the caller sees the result of the third attempt only
    assert_eq!(highest, 60_000);
    assert_eq!(client.request_count(), 3);
}

#[tokio::test]
async fn top_earners_are_sorted_and_limited() {
    let records: Vec<String> = (0..12)
        .map(|index| {
            record(
                &format!("00000000-0000-4000-8000-{index:012}"),
                &format!("Employee{index}"),
                1_000 * (index % 6),
                30,
                "Analyst",
            )
        })
        .collect();
    let client = ScriptedHttpClient::new().respond(200, support::list(&records));
    let directory = support::directory(&client);

    let names = directory
        .top_earning_names(DEFAULT_TOP_EARNERS)
        .await
        .expect("computed");

    assert_eq!(names.len(), 10);
    // salaries 5000 belong to indices 5 and 11, kept in upstream order
    assert_eq!(&names[..4], &["Employee5", "Employee11", "Employee4", "Employee10"]);
}

#[tokio::test]
async fn top_earners_of_small_directory_returns_everyone() {
    let client = ScriptedHttpClient::new().respond(200, support::sample_directory());
    let directory = support::directory(&client);

    let names = directory.top_earning_names(10).await.expect("computed");

    assert_eq!(names, vec!["Jane Ray", "Ray", "John Doe"]);
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn created_employee_matches_the_request() {
    let client = ScriptedHttpClient::new().respond(
        200,
        success(&record("2b1d6e0c-7a40-4d5e-a1c9-0f8e7d6c5b4a", "Alice", 45_000, 27, "Developer")),
    );
    let directory = support::directory(&client);

    let created = directory
        .create(&EmployeeCreateRequest::new("Alice", 45_000, 27, "Developer"))
        .await
        .expect("created");

    assert!(!created.id.is_empty());
    assert_eq!(created.name, "Alice");
    assert_eq!(created.salary, 45_000);
    assert_eq!(created.age, 27);
    assert_eq!(created.title, "Developer");
}

#[tokio::test]
async fn invalid_create_request_never_reaches_upstream() {
    let client = ScriptedHttpClient::new();
    let directory = support::directory(&client);

    let error = directory
        .create(&EmployeeCreateRequest::new("Alice", 45_000, 90, "Developer"))
        .await
        .expect_err("age out of range");

    assert_eq!(error.kind(), DomainErrorKind::InvalidInput);
    assert_eq!(error.message(), "age must be at most 75");
    assert_eq!(client.request_count(), 0);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn delete_resolves_name_then_deletes_by_id_and_name() {
    let client = ScriptedHttpClient::new()
        .respond(200, success(&record(RAY_ID, "Ray", 55_000, 40, "Founder")))
        .respond(200, success("true"));
    let directory = support::directory(&client);

    let name = directory.delete_by_id(RAY_ID).await.expect("deleted");

    assert_eq!(name, "Ray");
    let requests = client.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[1].method, HttpMethod::Delete);
    let body: serde_json::Value =
        serde_json::from_str(requests[1].body.as_deref().expect("body")).expect("json");
    assert_eq!(body["id"], RAY_ID);
    assert_eq!(body["name"], "Ray");
}

#[tokio::test]
async fn delete_answered_with_no_content_is_not_repeated() {
    let client = ScriptedHttpClient::new()
        .respond(200, success(&record(RAY_ID, "Ray", 55_000, 40, "Founder")))
        .respond(204, "")
        .respond(404, "");
    let directory = support::directory(&client);

    let name = directory.delete_by_id(RAY_ID).await.expect("deleted");

    assert_eq!(name, "Ray");
    assert_eq!(client.request_count(), 2);
    assert_eq!(client.remaining(), 1);
}

#[tokio::test]
async fn delete_of_missing_employee_is_not_found_without_delete_call() {
    let client = ScriptedHttpClient::new().respond(404, "");
    let directory = support::directory(&client);

    let error = directory.delete_by_id(RAY_ID).await.expect_err("missing");

    assert_eq!(error.kind(), DomainErrorKind::NotFound);
    assert_eq!(client.request_count(), 1);
}

#[tokio::test]
async fn employee_vanishing_between_lookup_and_delete_surfaces_not_found() {
    // Given: a third party removes the record after our lookup
    let client = ScriptedHttpClient::new()
        .respond(200, success(&record(RAY_ID, "Ray", 55_000, 40, "Founder")))
        .respond(404, "");
    let directory = support::directory(&client);

    let error = directory.delete_by_id(RAY_ID).await.expect_err("race");

    assert_eq!(error.kind(), DomainErrorKind::NotFound);
}

#[tokio::test]
async fn upstream_refusing_deletion_is_not_found() {
    let client = ScriptedHttpClient::new()
        .respond(200, success(&record(RAY_ID, "Ray", 55_000, 40, "Founder")))
        .respond(200, success("false"));
    let directory = support::directory(&client);

    let error = directory.delete_by_id(RAY_ID).await.expect_err("refused");

    assert_eq!(error.kind(), DomainErrorKind::NotFound);
    assert!(error.message().contains("Ray"));
}
