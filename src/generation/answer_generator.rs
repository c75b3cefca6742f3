use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;

use crate::config::GenerationSettings;
use crate::constants::prompts::{answer_system_prompt, ANSWER_SCHEMA_NAME};
use crate::generation::prompt_builder::build_answer_prompt;
use crate::generation::retry::{retry_bounded, AttemptError, Generation};
use crate::llm::{response_schema, LanguageModel, StructuredRequest};
use crate::models::domain::{CorrectAnswers, Question};

/// Index base the answer prompt asks the model to use (option A is 0).
const MODEL_INDEX_BASE: i64 = 0;

/// Shape the model is constrained to return.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AnswerFormat {
    /// Zero-based indexes of the correct options (option A is 0)
    pub correct_indexes: Vec<i64>,
    /// One explanation per option, in option order, stating whether the option is correct or incorrect and why
    pub explanations: Vec<String>,
}

/// Converts model-side indexes to zero-based choice indexes.
pub fn normalize_indexes(raw: &[i64], base: i64) -> Result<Vec<usize>, String> {
    raw.iter()
        .map(|&idx| {
            usize::try_from(idx - base)
                .map_err(|_| format!("index {} is below the prompt's base {}", idx, base))
        })
        .collect()
}

pub struct AnswerGenerator {
    model: Arc<dyn LanguageModel>,
    max_attempts: u32,
}

impl AnswerGenerator {
    pub fn new(model: Arc<dyn LanguageModel>, settings: &GenerationSettings) -> Self {
        Self {
            model,
            max_attempts: settings.attempt_budget(),
        }
    }

    pub fn request_for(&self, question: &Question, course_name: Option<&str>) -> StructuredRequest {
        StructuredRequest {
            instructions: answer_system_prompt(course_name),
            content: build_answer_prompt(question),
            schema_name: ANSWER_SCHEMA_NAME.to_string(),
            schema: response_schema::<AnswerFormat>(),
        }
    }

    /// Generates the correct options and per-option explanations for
    /// `question`. Model failures are retried; they never escape as errors.
    pub async fn generate(
        &self,
        question: &Question,
        course_name: Option<&str>,
    ) -> Generation<CorrectAnswers> {
        let request = self.request_for(question, course_name);
        let label = format!("answer generation for {}", question.id);

        retry_bounded(&label, self.max_attempts, |_| {
            self.attempt(&request, question)
        })
        .await
    }

    async fn attempt(
        &self,
        request: &StructuredRequest,
        question: &Question,
    ) -> Result<CorrectAnswers, AttemptError> {
        let value = self
            .model
            .complete_structured(request.clone())
            .await?
            .ok_or(AttemptError::Empty)?;

        let parsed: AnswerFormat = serde_json::from_value(value)
            .map_err(|e| AttemptError::Invalid(e.to_string()))?;

        let answers = CorrectAnswers {
            correct_indexes: normalize_indexes(&parsed.correct_indexes, MODEL_INDEX_BASE)
                .map_err(AttemptError::Invalid)?,
            explanations: parsed.explanations,
        };

        answers
            .validate(
                question.choices.len(),
                question.required_answer_count() as usize,
            )
            .map_err(AttemptError::Invalid)?;

        Ok(answers)
    }
}
