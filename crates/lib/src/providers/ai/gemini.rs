use crate::{
    errors::GenerationError,
    providers::ai::{error_for_status, AiProvider, ModelInfo},
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// The default Gemini API base URL when none is configured.
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// --- Gemini-specific request and response structures ---

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize, Debug)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Deserialize, Debug)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize, Debug)]
struct PartResponse {
    text: String,
}

#[derive(Deserialize, Debug)]
struct ModelListResponse {
    #[serde(default)]
    models: Vec<ListedModel>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ListedModel {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

// --- Gemini Provider implementation ---

/// A provider for interacting with the Google Gemini API.
#[derive(Clone, Debug)]
pub struct GeminiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    /// Creates a new `GeminiProvider`.
    ///
    /// The credential is trimmed of surrounding whitespace before use; a key
    /// pasted with a stray newline otherwise fails authentication with a
    /// misleading upstream message. A blank key is rejected here rather than
    /// at the first request.
    pub fn new(
        api_url: Option<String>,
        api_key: &str,
        model: String,
    ) -> Result<Self, GenerationError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(GenerationError::MissingApiKey);
        }
        let client = ReqwestClient::builder()
            .build()
            .map_err(GenerationError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url: api_url.unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string()),
            api_key: api_key.to_string(),
            model,
        })
    }

    /// The model identifier requests are issued against.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Replaces the model identifier, e.g. after startup discovery.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Fetches the models the service reports as available.
    ///
    /// Used only as a fallback discovery mechanism when no model name is
    /// configured; generation itself never depends on this call.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, GenerationError> {
        let url = format!("{}/models", self.api_url);
        let response = self
            .client
            .get(&url)
            .query(&[("key", &self.api_key)])
            .send()
            .await
            .map_err(GenerationError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, error_text));
        }

        let listing: ModelListResponse = response
            .json()
            .await
            .map_err(GenerationError::Deserialization)?;

        Ok(listing
            .models
            .into_iter()
            .map(|m| ModelInfo {
                name: m.name,
                supported_methods: m.supported_generation_methods,
            })
            .collect())
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    /// Generates study text using the Gemini API.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request_body = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let url = format!("{}/models/{}:generateContent", self.api_url, self.model);
        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&request_body)
            .send()
            .await
            .map_err(GenerationError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, error_text));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(GenerationError::Deserialization)?;

        gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or(GenerationError::EmptyResponse)
    }
}
