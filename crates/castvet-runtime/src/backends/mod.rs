//! Generation backend abstractions.
//!
//! A backend turns a system prompt plus a JSON payload into a JSON
//! response. The simulator backend is always available and fully
//! deterministic; remote backends are feature-gated.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use thiserror::Error;

use castvet_core::ChatContext;

mod simulator;

#[cfg(feature = "openai")]
mod openai;

pub use simulator::SimulatorBackend;

#[cfg(feature = "openai")]
pub use openai::OpenAiBackend;

/// Errors from generation backends.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("response parse error: {0}")]
    Parse(String),

    #[error("backend not configured: {0}")]
    NotConfigured(String),

    #[error("response does not match the expected schema: {0}")]
    SchemaMismatch(String),
}

/// Backend abstraction allows swapping generation engines.
///
/// The orchestrator is the only caller; it treats any error as a signal
/// to fall back to the simulator for the same inputs.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate a structured response for one system prompt and payload.
    async fn generate(
        &self,
        system_prompt: &str,
        payload: &JsonValue,
    ) -> Result<JsonValue, BackendError>;

    /// Answer a free-form query against a chat context.
    async fn chat(&self, query: &str, context: &ChatContext) -> Result<String, BackendError>;

    /// Backend name for logs.
    fn name(&self) -> &str;
}
