//! OpenAI chat-completions backend.
//!
//! Feature-gated; the simulator backend remains the default. The API key
//! is held in a [`SecretString`] so it never leaks through `Debug` output
//! and is zeroed on drop.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::OnceLock;
use std::time::Duration;

use castvet_core::ChatContext;

use super::{BackendError, GenerationBackend};

/// Environment variable holding the OpenAI API key.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiBackend {
    api_key: SecretString,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for OpenAiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiBackend")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenAiBackend {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read `OPENAI_API_KEY` from the environment. The value is never
    /// logged.
    pub fn from_env() -> Result<Self, BackendError> {
        let key = std::env::var(OPENAI_API_KEY_ENV)
            .map_err(|_| BackendError::NotConfigured(format!("{OPENAI_API_KEY_ENV} is not set")))?;
        Ok(Self::new(key))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn client(&self) -> &reqwest::Client {
        static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
        CLIENT.get_or_init(|| {
            reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("failed to build HTTP client")
        })
    }

    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String, BackendError> {
        let response = self
            .client()
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body: OpenAiErrorBody = response
                .json()
                .await
                .map_err(|e| BackendError::Parse(e.to_string()))?;
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: body.error.message,
            });
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| BackendError::Parse("response contained no choices".to_string()))
    }

    fn request(&self, system_prompt: &str, user_content: String, json_mode: bool) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                Message {
                    role: "user",
                    content: user_content,
                },
            ],
            response_format: json_mode.then(|| ResponseFormat {
                format_type: "json_object",
            }),
            temperature: 0.7,
        }
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    temperature: f32,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct OpenAiErrorBody {
    error: OpenAiErrorDetail,
}

#[derive(Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

#[async_trait]
impl GenerationBackend for OpenAiBackend {
    async fn generate(
        &self,
        system_prompt: &str,
        payload: &JsonValue,
    ) -> Result<JsonValue, BackendError> {
        let user_content = format!(
            "Here is the data context:\n{}",
            serde_json::to_string_pretty(payload).map_err(|e| BackendError::Parse(e.to_string()))?
        );
        let request = self.request(system_prompt, user_content, true);
        let content = self.complete(&request).await?;
        serde_json::from_str(&content).map_err(|e| BackendError::Parse(e.to_string()))
    }

    async fn chat(&self, query: &str, context: &ChatContext) -> Result<String, BackendError> {
        let user_content = format!(
            "Context:\n{}\n\nQuestion: {query}",
            serde_json::to_string_pretty(context).map_err(|e| BackendError::Parse(e.to_string()))?
        );
        let request = self.request(
            "You answer questions about one influencer evaluation using only the provided context.",
            user_content,
            false,
        );
        self.complete(&request).await
    }

    fn name(&self) -> &str {
        "openai"
    }
}
