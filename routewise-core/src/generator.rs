//! The outbound text-generation capability.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

/// Given a prompt, return generated text or fail.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Why a generation attempt produced no text.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("text generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("text generation failed: {0}")]
    Provider(String),

    #[error("text generation is disabled")]
    Disabled,
}

/// A generator that always fails with [`GenerationError::Disabled`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGenerator;

#[async_trait]
impl TextGenerator for DisabledGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(GenerationError::Disabled.into())
    }
}
