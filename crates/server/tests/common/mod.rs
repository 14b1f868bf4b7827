//! # Common Test Utilities
//!
//! Centralizes the test harness used across the `studygen-server` integration
//! tests: `TestApp` spawns a real server on a random port, configured from a
//! temporary `config.yml` whose provider points at an `httpmock::MockServer`
//! standing in for the upstream Gemini API.

#![allow(unused)]

use anyhow::Result;
use httpmock::MockServer;
use reqwest::Client;
use serde_json::Value;
use std::{fs::File, io::Write};
use studygen_server::{config, router::create_router, state::build_app_state};
use tempfile::{tempdir, TempDir};
use tokio::net::TcpListener;

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    _config_dir: TempDir,
}

impl TestApp {
    /// Spawns the server with a Gemini provider pointed at the mock server.
    ///
    /// The model name is pinned so startup performs no discovery call.
    pub async fn spawn() -> Result<Self> {
        let mock_server = MockServer::start();
        let config_content = format!(
            r#"
provider:
  provider: "gemini"
  api_url: "{}"
  api_key: "test-key"
  model_name: "mock-model"
"#,
            mock_server.url("/v1beta")
        );
        Self::spawn_with_config(config_content, mock_server).await
    }

    /// Spawns the server with no API credential: generation is disabled,
    /// everything else keeps working.
    pub async fn spawn_without_credential() -> Result<Self> {
        // The config loader falls back to GEMINI_API_KEY from the process
        // environment, which must not leak into this test.
        std::env::remove_var("GEMINI_API_KEY");
        let mock_server = MockServer::start();
        let config_content = r#"
provider:
  provider: "gemini"
"#
        .to_string();
        Self::spawn_with_config(config_content, mock_server).await
    }

    /// Spawns the server from the given `config.yml` content.
    pub async fn spawn_with_config(
        config_content: String,
        mock_server: MockServer,
    ) -> Result<Self> {
        let config_dir = tempdir()?;
        let config_path = config_dir.path().join("config.yml");
        let mut file = File::create(&config_path)?;
        file.write_all(config_content.as_bytes())?;

        let config = config::get_config(config_path.to_str())
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;
        let app_state = build_app_state(config).await?;
        let app = create_router(app_state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = format!("http://{}", listener.local_addr()?);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Server error during test: {e}");
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            _config_dir: config_dir,
        })
    }

    /// Creates a session and returns its id.
    pub async fn create_session(&self) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/sessions", self.address))
            .send()
            .await?;
        assert!(response.status().is_success());
        let body: Value = response.json().await?;
        Ok(body["result"]["session_id"]
            .as_str()
            .expect("session_id missing from response")
            .to_string())
    }

    /// Uploads PDF bytes to a session via multipart.
    pub async fn upload_pdf(&self, session_id: &str, pdf_bytes: Vec<u8>) -> Result<reqwest::Response> {
        let part = reqwest::multipart::Part::bytes(pdf_bytes)
            .file_name("lesson.pdf")
            .mime_str("application/pdf")?;
        let form = reqwest::multipart::Form::new().part("file", part);
        Ok(self
            .client
            .post(format!("{}/sessions/{session_id}/document", self.address))
            .multipart(form)
            .send()
            .await?)
    }

    /// The canned Gemini success body for a given generated text.
    pub fn gemini_response(text: &str) -> Value {
        serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": text } ] } }
            ]
        })
    }
}
