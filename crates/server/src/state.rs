//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The `AppState` holds all shared resources: the
//! configuration, the resolved per-mode instructions, the instantiated AI
//! provider, and the in-memory session store.

use crate::config::AppConfig;
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};
use studygen::{
    prompts::default_instruction,
    providers::ai::{
        gemini::GeminiProvider, local::LocalAiProvider, select_model, AiProvider,
    },
    Mode, StudySession,
};
use tracing::{info, warn};
use uuid::Uuid;

/// The shared application state, accessible from all request handlers.
///
/// The session store is the only shared mutable resource; each user action is
/// a single handler invocation, and the lock is never held across a provider
/// round trip.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The resolved instruction for every mode, config overrides applied.
    pub instructions: Arc<HashMap<Mode, String>>,
    /// The instantiated AI provider, or `None` when no credential was found.
    /// A missing provider disables the generation feature only.
    pub ai_provider: Option<Arc<dyn AiProvider>>,
    /// The model identifier requests are issued against, for diagnostics.
    pub active_model: Option<String>,
    /// All live sessions, keyed by session id. Discarded with the process.
    pub sessions: Arc<RwLock<HashMap<Uuid, StudySession>>>,
}

/// Resolves the instruction for every mode: a `prompts` entry in the config
/// (keyed by the mode's snake_case name) wins over the built-in template.
fn resolve_instructions(config: &AppConfig) -> HashMap<Mode, String> {
    Mode::ALL
        .into_iter()
        .map(|mode| {
            let instruction = config
                .prompts
                .get(mode.as_str())
                .cloned()
                .unwrap_or_else(|| default_instruction(mode).to_string());
            (mode, instruction)
        })
        .collect()
}

/// Builds the shared application state from the configuration.
///
/// A missing or blank API credential is not fatal: the server starts with
/// `ai_provider = None` and every other feature (upload, extraction, history,
/// export of prior results) keeps working.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let instructions = resolve_instructions(&config);

    let (ai_provider, active_model): (Option<Arc<dyn AiProvider>>, Option<String>) =
        match config.provider.provider.as_str() {
            "gemini" => match &config.provider.api_key {
                Some(key) if !key.trim().is_empty() => {
                    let (provider, model) = build_gemini_provider(&config, key).await?;
                    (Some(Arc::new(provider)), Some(model))
                }
                _ => {
                    warn!("No Gemini API key configured; the generation feature is disabled.");
                    (None, None)
                }
            },
            "local" => {
                let api_url = config.provider.api_url.clone().ok_or_else(|| {
                    anyhow::anyhow!(
                        "api_url is required for the local provider. Set provider.api_url in config.yml."
                    )
                })?;
                let provider = LocalAiProvider::new(
                    api_url,
                    config.provider.api_key.clone(),
                    config.provider.model_name.clone(),
                )?;
                let model = config.provider.model_name.clone();
                (Some(Arc::new(provider)), model)
            }
            other => {
                return Err(anyhow::anyhow!("Unsupported AI provider type '{other}'"));
            }
        };

    if let Some(model) = &active_model {
        info!(model = %model, "AI provider ready");
    }

    Ok(AppState {
        config: Arc::new(config),
        instructions: Arc::new(instructions),
        ai_provider,
        active_model,
        sessions: Arc::new(RwLock::new(HashMap::new())),
    })
}

/// Instantiates the Gemini provider, discovering a model when none is pinned.
///
/// Discovery lists the service's models and feeds the pure `select_model`
/// policy. A failed listing call falls back to the first preferred name with
/// a warning; the listing is a discovery mechanism only and must never block
/// startup.
async fn build_gemini_provider(
    config: &AppConfig,
    api_key: &str,
) -> anyhow::Result<(GeminiProvider, String)> {
    if let Some(model) = &config.provider.model_name {
        let provider =
            GeminiProvider::new(config.provider.api_url.clone(), api_key, model.clone())?;
        return Ok((provider, model.clone()));
    }

    let preferred = &config.generation.preferred_models;
    let first_preferred = preferred
        .first()
        .cloned()
        .unwrap_or_else(|| "gemini-2.5-flash".to_string());

    let provider = GeminiProvider::new(
        config.provider.api_url.clone(),
        api_key,
        first_preferred.clone(),
    )?;

    let model = match provider.list_models().await {
        Ok(available) => select_model(preferred, &available)?,
        Err(e) => {
            warn!(
                error = %e,
                "Model listing failed; falling back to '{first_preferred}'."
            );
            first_preferred
        }
    };

    Ok((provider.with_model(model.clone()), model))
}
