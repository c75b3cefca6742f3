//! Language-model abstraction used by the generators.
//!
//! Generators only see [`LanguageModel`]; the OpenAI-compatible client lives in
//! [`openai`] and is the single place that knows the chat-completions wire format.

pub mod openai;

use std::time::Duration;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde_json::Value;
use thiserror::Error;

pub use openai::OpenAiModel;

/// One piece of multimodal user content, in prompt order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptSegment {
    Text(String),
    ImageUrl(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct StructuredRequest {
    pub instructions: String,
    pub content: Vec<PromptSegment>,
    pub schema_name: String,
    pub schema: Value,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("model request failed: {0}")]
    Api(String),

    #[error("model call timed out after {0:?}")]
    Timeout(Duration),

    #[error("model returned malformed output: {0}")]
    Malformed(String),
}

/// `Ok(None)` means the call completed but produced nothing usable
/// (no content, or a refusal).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete_structured(&self, request: StructuredRequest)
        -> Result<Option<Value>, LlmError>;

    async fn complete_text(&self, request: TextRequest) -> Result<Option<String>, LlmError>;
}

/// JSON schema for `T` in the shape strict structured outputs accept:
/// no `$schema` marker and no `format` annotations.
pub fn response_schema<T: JsonSchema>() -> Value {
    let schema = schemars::schema_for!(T);
    let mut value = serde_json::to_value(&schema).unwrap_or(Value::Null);
    if let Some(object) = value.as_object_mut() {
        object.remove("$schema");
    }
    strip_format_keywords(&mut value);
    value
}

fn strip_format_keywords(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.get("format").is_some_and(Value::is_string) {
                map.remove("format");
            }
            map.values_mut().for_each(strip_format_keywords);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_format_keywords),
        _ => {}
    }
}
