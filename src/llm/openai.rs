use std::time::Duration;

use async_openai::{config::OpenAIConfig, error::OpenAIError, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{json, Value};

use crate::config::Config;

use super::{LanguageModel, LlmError, PromptSegment, StructuredRequest, TextRequest};

impl From<OpenAIError> for LlmError {
    fn from(err: OpenAIError) -> Self {
        LlmError::Api(err.to_string())
    }
}

/// Chat-completions client for OpenAI-compatible endpoints. Requests and
/// responses go through the raw JSON (`byot`) interface so the structured
/// output schema can be passed through untouched.
pub struct OpenAiModel {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAiModel {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.openai_api_key.expose_secret())
            .with_api_base(config.openai_api_base.as_str());

        Self {
            client: Client::with_config(openai_config),
            model: config.openai_model.clone(),
            timeout: config.llm_timeout,
        }
    }

    async fn chat(&self, payload: Value) -> Result<Value, LlmError> {
        let chat = self.client.chat();
        let call = chat.create_byot(payload);
        let response: Value = match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result?,
            Err(_) => return Err(LlmError::Timeout(self.timeout)),
        };
        Ok(response)
    }

    fn structured_payload(&self, request: &StructuredRequest) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.instructions },
                { "role": "user", "content": content_parts(&request.content) },
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": request.schema_name,
                    "strict": true,
                    "schema": request.schema,
                },
            },
        })
    }

    fn text_payload(&self, request: &TextRequest) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        })
    }
}

fn content_parts(segments: &[PromptSegment]) -> Value {
    segments
        .iter()
        .map(|segment| match segment {
            PromptSegment::Text(text) => json!({ "type": "text", "text": text }),
            PromptSegment::ImageUrl(url) => json!({
                "type": "image_url",
                "image_url": { "url": url },
            }),
        })
        .collect()
}

fn first_message(response: &Value) -> Option<&Value> {
    response.get("choices")?.get(0)?.get("message")
}

fn message_content(response: &Value) -> Option<&str> {
    first_message(response)?.get("content")?.as_str()
}

fn message_refusal(response: &Value) -> Option<&str> {
    first_message(response)?.get("refusal")?.as_str()
}

#[async_trait]
impl LanguageModel for OpenAiModel {
    async fn complete_structured(
        &self,
        request: StructuredRequest,
    ) -> Result<Option<Value>, LlmError> {
        let response = self.chat(self.structured_payload(&request)).await?;

        if let Some(refusal) = message_refusal(&response) {
            log::warn!("Model refused structured request: {}", refusal);
            return Ok(None);
        }

        match message_content(&response) {
            Some(content) => serde_json::from_str(content)
                .map(Some)
                .map_err(|e| LlmError::Malformed(e.to_string())),
            None => Ok(None),
        }
    }

    async fn complete_text(&self, request: TextRequest) -> Result<Option<String>, LlmError> {
        let response = self.chat(self.text_payload(&request)).await?;
        Ok(message_content(&response).map(str::to_string))
    }
}
