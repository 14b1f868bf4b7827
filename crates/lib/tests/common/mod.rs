//! Shared helpers for the `studygen` library tests.

#![allow(unused)]

use async_trait::async_trait;
use std::sync::Arc;
use studygen::errors::GenerationError;
use studygen::providers::ai::AiProvider;

pub use studygen_test_utils::MockAiProvider;

/// An `AiProvider` that always fails with the supplied error builder.
#[derive(Clone)]
pub struct FailingAiProvider {
    error: Arc<dyn Fn() -> GenerationError + Send + Sync>,
}

impl std::fmt::Debug for FailingAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FailingAiProvider")
    }
}

impl FailingAiProvider {
    pub fn new(error: impl Fn() -> GenerationError + Send + Sync + 'static) -> Self {
        Self {
            error: Arc::new(error),
        }
    }
}

#[async_trait]
impl AiProvider for FailingAiProvider {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err((self.error)())
    }
}
