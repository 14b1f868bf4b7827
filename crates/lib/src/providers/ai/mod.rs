pub mod gemini;
pub mod local;

use crate::errors::GenerationError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use reqwest::StatusCode;
use std::fmt::Debug;

/// A trait for interacting with an AI provider.
///
/// This trait defines a common interface for generating study material from a
/// single prompt using different Large Language Models (e.g., Gemini, local
/// OpenAI-compatible servers).
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a text response for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

dyn_clone::clone_trait_object!(AiProvider);

/// One model as reported by the provider's model-listing endpoint.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// The reported name, possibly carrying a `models/` prefix.
    pub name: String,
    /// The generation methods the model supports, e.g. `generateContent`.
    pub supported_methods: Vec<String>,
}

impl ModelInfo {
    /// The model name with any `models/` prefix stripped.
    pub fn short_name(&self) -> &str {
        self.name.strip_prefix("models/").unwrap_or(&self.name)
    }

    /// Whether the model can serve text-generation requests.
    pub fn supports_generation(&self) -> bool {
        self.supported_methods.iter().any(|m| m == "generateContent")
    }
}

/// Picks a usable model identifier from the provider's reported model list.
///
/// The first preferred name that appears in `available` and supports text
/// generation wins; otherwise the first generation-capable model in
/// `available` is used. Fails with `NoUsableModel` when nothing qualifies.
/// This is a pure function so the fallback policy is testable without the
/// network call that produces `available`.
pub fn select_model(
    preferred: &[String],
    available: &[ModelInfo],
) -> Result<String, GenerationError> {
    for wanted in preferred {
        if let Some(model) = available
            .iter()
            .find(|m| m.short_name() == wanted.as_str() && m.supports_generation())
        {
            return Ok(model.short_name().to_string());
        }
    }
    available
        .iter()
        .find(|m| m.supports_generation())
        .map(|m| m.short_name().to_string())
        .ok_or(GenerationError::NoUsableModel)
}

/// Maps a non-success upstream status and its body to a typed failure.
///
/// Gemini reports an invalid API key as 400 INVALID_ARGUMENT rather than 401,
/// so a 400 whose body mentions the API key is treated as an auth failure.
pub(crate) fn error_for_status(status: StatusCode, body: String) -> GenerationError {
    match status.as_u16() {
        401 | 403 => GenerationError::Auth(body),
        400 if body.contains("API key") || body.contains("API_KEY") => GenerationError::Auth(body),
        404 => GenerationError::ModelNotFound(body),
        429 => GenerationError::QuotaExhausted(body),
        _ => GenerationError::Api(body),
    }
}
