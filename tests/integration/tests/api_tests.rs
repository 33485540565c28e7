//! API Integration Tests
//!
//! The full router on a real socket, backed by in-memory repositories and
//! a scripted Discord. No external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use appeal_core::{AppealStatus, Snowflake, DEFAULT_QUESTIONS};
use appeal_service::testing::{FakeOAuthClient, TestHarness};
use integration_tests::{
    assert_json, assert_status, fixtures::*, location, set_cookies, test_config, test_config_with,
    TestServer,
};
use reqwest::{header, StatusCode};
use serde_json::json;
use tokio::task::JoinSet;

fn default_questions() -> Vec<String> {
    DEFAULT_QUESTIONS.map(String::from).to_vec()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_not_ready_when_storage_is_down() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.harness.appeals.set_failing(true);

    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::SERVICE_UNAVAILABLE)
        .await
        .unwrap();
}

// ============================================================================
// Status Tests
// ============================================================================

#[tokio::test]
async fn test_status_without_cookie() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/status").await.unwrap();
    assert!(set_cookies(&response).is_empty());
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();

    assert_eq!(body.error.title, "Huh");
    assert_eq!(body.error.description, "You're not supposed to be here.");
    assert!(body.user.is_none());
    assert_eq!(server.harness.provider.user_calls(), 0);
}

#[tokio::test]
async fn test_status_with_invalid_token_clears_cookie() {
    let server = TestServer::start().await.unwrap();

    let response = server.get_auth("/api/status", "expired").await.unwrap();
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("token=;"));
    assert!(cookies[0].contains("Max-Age=0"));

    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.title, "Error");
    assert_eq!(body.error.description, "Not authorized");
}

#[tokio::test]
async fn test_status_not_banned() {
    let server = TestServer::start().await.unwrap();
    let user = server.harness.user("tok", 1001, "innocent");

    let response = server.get_auth("/api/status", "tok").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body.error.title, "Nope.");
    assert_eq!(body.error.description, "You're not banned.");
    assert_eq!(body.user, Some(user));
}

#[tokio::test]
async fn test_status_eligible_gets_default_questions() {
    let server = TestServer::start().await.unwrap();
    let user = server.harness.banned_user("tok", 1002, "sorry");

    let response = server.get_auth("/api/status", "tok").await.unwrap();
    let body: StatusBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body.user, user);
    assert_eq!(body.questions, default_questions());
}

#[tokio::test]
async fn test_status_uses_configured_questions() {
    let server = TestServer::start().await.unwrap();
    server.harness.banned_user("tok", 1003, "sorry");
    server
        .harness
        .config
        .set_questions(vec!["What happened?".to_string()]);

    let response = server.get_auth("/api/status", "tok").await.unwrap();
    let body: StatusBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.questions, vec!["What happened?".to_string()]);
}

#[tokio::test]
async fn test_status_after_decision() {
    let server = TestServer::start().await.unwrap();
    let accepted = server.harness.banned_user("a", 1004, "again");
    let rejected = server.harness.banned_user("r", 1005, "denied");
    server.harness.seed_appeal(accepted.id, AppealStatus::Accepted);
    server.harness.seed_appeal(rejected.id, AppealStatus::Rejected);

    let response = server.get_auth("/api/status", "a").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.error.title, "Cannot re-appeal.");
    assert!(body.error.description.contains("banned again"));

    let response = server.get_auth("/api/status", "r").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.error.title, "Cannot re-appeal.");
    assert_eq!(body.error.description, "Your last appeal was rejected.");
}

#[tokio::test]
async fn test_status_while_in_review() {
    let server = TestServer::start().await.unwrap();
    let user = server.harness.banned_user("tok", 1006, "waiting");
    server.harness.seed_appeal(user.id, AppealStatus::Pending);

    let response = server.get_auth("/api/status", "tok").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.error.title, "Wait.");
    assert_eq!(body.user, Some(user));
}

#[tokio::test]
async fn test_status_is_read_only() {
    let server = TestServer::start().await.unwrap();
    server.harness.banned_user("tok", 1007, "sorry");

    for _ in 0..3 {
        let response = server.get_auth("/api/status", "tok").await.unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }
    assert!(server.harness.appeals.is_empty());
    assert_eq!(server.harness.appeals.writes(), 0);
}

#[tokio::test]
async fn test_status_repeats_identically_for_non_banned_user() {
    let server = TestServer::start().await.unwrap();
    server.harness.user("tok", 1008, "innocent");

    let first = server.get_auth("/api/status", "tok").await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first = first.bytes().await.unwrap();

    let second = server.get_auth("/api/status", "tok").await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    let second = second.bytes().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(server.harness.provider.ban_calls(), 2);
    assert_eq!(server.harness.appeals.lookups(), 0);
    assert_eq!(server.harness.appeals.writes(), 0);
}

// ============================================================================
// Submission Tests
// ============================================================================

#[tokio::test]
async fn test_submit_without_cookie_ignores_body() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/api/appeal", &json!({ "not": "an appeal" }))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.title, "Huh");
}

#[tokio::test]
async fn test_submit_success() {
    let server = TestServer::start().await.unwrap();
    let user = server.harness.banned_user("tok", 2001, "sorry");

    let response = server
        .post_auth(
            "/api/appeal",
            "tok",
            &submission(&default_questions(), GOOD_ANSWER),
        )
        .await
        .unwrap();
    let body: MessageBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message.title, "Success.");
    assert_eq!(body.message.description, "Your appeal has been submitted.");

    let appeal = server.harness.appeals.get(user.id).unwrap();
    assert_eq!(appeal.status, AppealStatus::Polling);
    assert_eq!(appeal.questions.len(), 3);
    assert_eq!(appeal.questions[0].question, DEFAULT_QUESTIONS[0]);
    assert_eq!(appeal.questions[0].answer, GOOD_ANSWER);
}

#[tokio::test]
async fn test_second_submission_is_in_progress() {
    let server = TestServer::start().await.unwrap();
    let user = server.harness.banned_user("tok", 2002, "sorry");
    let body = single_answer(GOOD_ANSWER);

    let first = server.post_auth("/api/appeal", "tok", &body).await.unwrap();
    assert_status(first, StatusCode::OK).await.unwrap();

    let second = server.post_auth("/api/appeal", "tok", &body).await.unwrap();
    let refusal: ErrorBody = assert_json(second, StatusCode::OK).await.unwrap();
    assert_eq!(refusal.error.title, "Wait.");
    assert_eq!(refusal.user.map(|u| u.id), Some(user.id));
    assert_eq!(server.harness.appeals.writes(), 1);
}

#[tokio::test]
async fn test_submit_validation_failures() {
    let server = TestServer::start().await.unwrap();
    server.harness.banned_user("tok", 2003, "sorry");

    let cases = [
        (r#"{"questions": "#, None),
        (r#"{"answers": []}"#, Some("questions not provided")),
        (
            r#"{"questions": [{"question": "Why?", "answer": "too short"}]}"#,
            Some("invalid question/answer"),
        ),
        (
            r#"{"questions": [{"question": 7, "answer": "long enough answer"}]}"#,
            Some("invalid question/answer"),
        ),
    ];

    for (body, expected) in cases {
        let response = server.post_raw_auth("/api/appeal", "tok", body).await.unwrap();
        let refusal: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
        assert_eq!(refusal.error.title, "Error");
        if let Some(expected) = expected {
            assert_eq!(refusal.error.description, expected, "body: {body}");
        }
    }

    assert!(server.harness.appeals.is_empty());
}

#[tokio::test]
async fn test_empty_questions_is_stored() {
    let server = TestServer::start().await.unwrap();
    let user = server.harness.banned_user("tok", 2004, "sorry");

    let response = server
        .post_raw_auth("/api/appeal", "tok", r#"{"questions": []}"#)
        .await
        .unwrap();
    let body: MessageBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message.title, "Success.");

    let appeal = server.harness.appeals.get(user.id).unwrap();
    assert_eq!(appeal.status, AppealStatus::Polling);
    assert!(appeal.questions.is_empty());
}

#[tokio::test]
async fn test_answer_length_boundaries() {
    let server = TestServer::start().await.unwrap();

    for (i, (len, accepted)) in [(9, false), (10, true), (500, true), (501, false)]
        .into_iter()
        .enumerate()
    {
        let token = format!("tok{i}");
        let user = server
            .harness
            .banned_user(&token, 2100 + i as i64, "bounds");
        let answer = "é".repeat(len);

        let response = server
            .post_auth("/api/appeal", &token, &single_answer(&answer))
            .await
            .unwrap();
        let expected = if accepted {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        };
        assert_eq!(response.status(), expected, "answer of {len} chars");
        assert_eq!(server.harness.appeals.get(user.id).is_some(), accepted);
    }
}

#[tokio::test]
async fn test_concurrent_submissions_store_one_appeal() {
    let server = TestServer::start().await.unwrap();
    let user = server.harness.banned_user("tok", 2004, "eager");
    let url = format!("{}/api/appeal", server.base_url());

    let mut tasks = JoinSet::new();
    for _ in 0..8 {
        let client = server.client.clone();
        let url = url.clone();
        tasks.spawn(async move {
            client
                .post(&url)
                .header(header::COOKIE, "token=tok")
                .json(&single_answer(GOOD_ANSWER))
                .send()
                .await
                .unwrap()
                .json::<serde_json::Value>()
                .await
                .unwrap()
        });
    }

    let mut successes = 0;
    while let Some(body) = tasks.join_next().await {
        let body = body.unwrap();
        if body.get("message").is_some() {
            successes += 1;
        } else {
            assert_eq!(body["error"]["title"], "Wait.");
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(server.harness.appeals.writes(), 1);
    assert!(server.harness.appeals.get(user.id).is_some());
}

#[tokio::test]
async fn test_storage_failure_is_generic_500() {
    let server = TestServer::start().await.unwrap();
    server.harness.banned_user("tok", 2005, "unlucky");
    server.harness.appeals.set_failing(true);

    let response = server
        .post_auth("/api/appeal", "tok", &single_answer(GOOD_ANSWER))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();
    assert_eq!(
        body.error.description,
        "Something went wrong. Please try again later."
    );
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_redirects_to_discord() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/login").await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response).as_deref(),
        Some(FakeOAuthClient::AUTHORIZE_URL)
    );
}

#[tokio::test]
async fn test_callback_without_code() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/discord").await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "No code provided");
}

#[tokio::test]
async fn test_callback_with_bad_code() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/discord?code=forged").await.unwrap();
    assert!(set_cookies(&response).is_empty());
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Authorization failed");
}

#[tokio::test]
async fn test_callback_sets_cookie() {
    let server = TestServer::start().await.unwrap();
    server.harness.provider.add_code("good", "access-abc", 604_800);

    let response = server.get("/discord?code=good").await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response).as_deref(), Some("/"));

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("token=access-abc"));
    assert!(cookies[0].contains("Max-Age=604800"));
    assert!(cookies[0].contains("Path=/"));
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let server = TestServer::start().await.unwrap();

    let response = server.get_auth("/logout", "anything").await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response).as_deref(), Some("/"));

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("token=;"));
    assert!(cookies[0].contains("Max-Age=0"));
}

#[tokio::test]
async fn test_login_to_submission() {
    let harness = TestHarness::new();
    let user = harness.banned_user("access-xyz", 3001, "reformed");
    harness.provider.add_code("code-1", "access-xyz", 3600);
    let server = TestServer::start_with(harness, test_config().unwrap())
        .await
        .unwrap();

    // Discord sends the browser back with a code
    let response = server.get("/discord?code=code-1").await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    let cookie = set_cookies(&response).remove(0);
    let token = cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("token="))
        .unwrap()
        .to_string();

    let response = server.get_auth("/api/status", &token).await.unwrap();
    let status: StatusBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status.user.id, user.id);

    let response = server
        .post_auth(
            "/api/appeal",
            &token,
            &submission(&status.questions, GOOD_ANSWER),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // A reviewer picks it up; the user still may not re-appeal
    server
        .harness
        .appeals
        .set_status(Snowflake::new(3001), AppealStatus::Pending);
    let response = server.get_auth("/api/status", &token).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.error.title, "Wait.");
}

// ============================================================================
// Static Files
// ============================================================================

#[tokio::test]
async fn test_static_dir_is_served_at_root() {
    let dir = std::env::temp_dir().join(format!("appeal-static-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<h1>Ban appeal</h1>").unwrap();

    let config = test_config_with(&[("STATIC_DIR", dir.to_str().unwrap())]).unwrap();
    let server = TestServer::start_with(TestHarness::new(), config)
        .await
        .unwrap();

    let response = server.get("/").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "<h1>Ban appeal</h1>");

    // API routes still win over the fallback
    let response = server.get("/api/status").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();

    std::fs::remove_dir_all(&dir).ok();
}
