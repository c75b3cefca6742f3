use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::domain::{Progress, ProgressOrder};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_progress_indexes"))]
pub struct UpsertProgressRequest {
    pub is_correct: bool,

    #[validate(length(min = 1, message = "choiceSentences must not be empty"))]
    pub choice_sentences: Vec<String>,

    #[serde(default)]
    pub choice_imgs: Vec<Option<String>>,

    #[serde(default)]
    pub choice_translations: Option<Vec<String>>,

    #[validate(length(min = 1, message = "selectedIdxes must not be empty"))]
    pub selected_idxes: Vec<usize>,

    #[validate(length(min = 1, message = "correctIdxes must not be empty"))]
    pub correct_idxes: Vec<usize>,
}

fn validate_progress_indexes(request: &UpsertProgressRequest) -> Result<(), ValidationError> {
    let choice_count = request.choice_sentences.len();
    let in_range = request
        .selected_idxes
        .iter()
        .chain(&request.correct_idxes)
        .all(|&idx| idx < choice_count);

    if in_range {
        Ok(())
    } else {
        Err(ValidationError::new("index_out_of_range")
            .with_message("selectedIdxes and correctIdxes must index choiceSentences".into()))
    }
}

impl UpsertProgressRequest {
    pub fn into_progress(self, user_id: &str, test_id: &str, question_number: u32) -> Progress {
        Progress {
            id: Progress::key(user_id, test_id, question_number),
            user_id: user_id.to_string(),
            test_id: test_id.to_string(),
            question_number,
            is_correct: self.is_correct,
            choice_sentences: self.choice_sentences,
            choice_imgs: self.choice_imgs,
            choice_translations: self.choice_translations,
            selected_idxes: self.selected_idxes,
            correct_idxes: self.correct_idxes,
            updated_at: Some(chrono::Utc::now()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProgressOrderRequest {
    pub order: Vec<Option<u32>>,
}

impl CreateProgressOrderRequest {
    pub fn into_order(self, user_id: &str, test_id: &str) -> ProgressOrder {
        ProgressOrder::new(user_id, test_id, self.order)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertFavoriteRequest {
    pub is_favorite: bool,
}
