//! Failure-path tests: missing credential and upstream generation errors.

mod common;

use anyhow::Result;
use common::TestApp;
use httpmock::prelude::*;
use serde_json::Value;
use serial_test::serial;
use studygen_test_utils::helpers::generate_test_pdf;

// Spawning without a credential removes GEMINI_API_KEY from the process
// environment, which the config loader in every other spawn also reads.
#[tokio::test]
#[serial]
async fn test_missing_credential_disables_generation_only() -> Result<()> {
    let app = TestApp::spawn_without_credential().await?;
    let session_id = app.create_session().await?;

    // Upload and extraction still work without a credential.
    let pdf = generate_test_pdf("Photosynthesis converts light to energy.")?;
    let upload = app.upload_pdf(&session_id, pdf).await?;
    assert!(upload.status().is_success());

    let snapshot: Value = app
        .client
        .get(format!("{}/sessions/{session_id}", app.address))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(snapshot["result"]["phase"], "document_loaded");

    // Any generation attempt is rejected as unavailable.
    let response = app
        .client
        .post(format!("{}/sessions/{session_id}/generate", app.address))
        .json(&serde_json::json!({ "mode": "structured_notes" }))
        .send()
        .await?;
    assert_eq!(response.status(), 503);
    let body: Value = response.json().await?;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("no API key is configured"));
    Ok(())
}

#[tokio::test]
#[serial]
async fn test_quota_failure_keeps_prior_result_and_history() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session_id = app.create_session().await?;

    let success_mock = app.mock_server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/mock-model:generateContent")
            .body_contains("ultra-concise revision sheet");
        then.status(200)
            .json_body(TestApp::gemini_response("the good notes"));
    });
    // Quiz requests hit the quota.
    app.mock_server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/mock-model:generateContent")
            .body_contains("5 difficult exam questions");
        then.status(429).body("RESOURCE_EXHAUSTED: quota exceeded");
    });

    let pdf = generate_test_pdf("A lesson about cells.")?;
    app.upload_pdf(&session_id, pdf).await?;

    let first = app
        .client
        .post(format!("{}/sessions/{session_id}/generate", app.address))
        .json(&serde_json::json!({ "mode": "fast_review" }))
        .send()
        .await?;
    assert!(first.status().is_success());
    success_mock.assert();

    let failed = app
        .client
        .post(format!("{}/sessions/{session_id}/generate", app.address))
        .json(&serde_json::json!({ "mode": "quiz" }))
        .send()
        .await?;
    assert_eq!(failed.status(), 429);
    let error_body: Value = failed.json().await?;
    assert!(error_body["error"].as_str().unwrap().contains("quota"));

    // The prior result is untouched and history was not appended.
    let snapshot: Value = app
        .client
        .get(format!("{}/sessions/{session_id}", app.address))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(snapshot["result"]["notes"]["text"], "the good notes");
    assert!(snapshot["result"]["quiz"].is_null());
    assert_eq!(snapshot["result"]["history_len"], 1);
    Ok(())
}

#[tokio::test]
#[serial]
async fn test_upstream_auth_failure_is_502() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session_id = app.create_session().await?;

    app.mock_server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/mock-model:generateContent");
        then.status(403).body("PERMISSION_DENIED");
    });

    let pdf = generate_test_pdf("A lesson.")?;
    app.upload_pdf(&session_id, pdf).await?;

    let response = app
        .client
        .post(format!("{}/sessions/{session_id}/generate", app.address))
        .json(&serde_json::json!({ "mode": "flashcards" }))
        .send()
        .await?;
    assert_eq!(response.status(), 502);
    Ok(())
}

#[tokio::test]
#[serial]
async fn test_unknown_mode_is_rejected() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session_id = app.create_session().await?;

    let response = app
        .client
        .post(format!("{}/sessions/{session_id}/generate", app.address))
        .json(&serde_json::json!({ "mode": "karaoke" }))
        .send()
        .await?;
    // Serde rejects the unknown enum variant before the handler runs.
    assert_eq!(response.status(), 422);
    Ok(())
}
