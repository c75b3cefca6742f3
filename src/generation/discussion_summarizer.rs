use std::sync::Arc;

use crate::config::GenerationSettings;
use crate::constants::prompts::{
    discussion_summary_prompt, NOT_SPECIFIED_ANSWER, NO_DISCUSSIONS_SUMMARY, SUMMARY_SYSTEM_PROMPT,
};
use crate::generation::retry::{retry_bounded, AttemptError, Generation};
use crate::llm::{LanguageModel, TextRequest};
use crate::models::domain::Discussion;

pub fn build_summary_prompt(discussions: &[Discussion]) -> String {
    let content = discussions
        .iter()
        .enumerate()
        .map(|(idx, discussion)| {
            format!(
                "Discussion {}:\n- Comment: {}\n- Upvotes: {}\n- Selected Answer: {}",
                idx + 1,
                discussion.comment,
                discussion.upvoted_num,
                discussion
                    .selected_answer
                    .as_deref()
                    .unwrap_or(NOT_SPECIFIED_ANSWER)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    discussion_summary_prompt(&content)
}

pub struct DiscussionSummarizer {
    model: Arc<dyn LanguageModel>,
    settings: GenerationSettings,
}

impl DiscussionSummarizer {
    pub fn new(model: Arc<dyn LanguageModel>, settings: &GenerationSettings) -> Self {
        Self {
            model,
            settings: settings.clone(),
        }
    }

    /// Summarizes `discussions` in roughly 200 characters. An empty list
    /// yields a fixed sentence without calling the model.
    pub async fn summarize(&self, discussions: &[Discussion]) -> Generation<String> {
        if discussions.is_empty() {
            return Generation::Success(NO_DISCUSSIONS_SUMMARY.to_string());
        }

        let request = TextRequest {
            system: SUMMARY_SYSTEM_PROMPT.to_string(),
            user: build_summary_prompt(discussions),
            max_tokens: self.settings.summary_max_tokens,
            temperature: self.settings.summary_temperature,
        };

        retry_bounded("discussion summary", self.settings.attempt_budget(), |_| {
            self.attempt(&request)
        })
        .await
    }

    async fn attempt(&self, request: &TextRequest) -> Result<String, AttemptError> {
        let content = self.model.complete_text(request.clone()).await?;

        content
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(AttemptError::Empty)
    }
}
