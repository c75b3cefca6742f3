use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{user_question_key, user_test_key};

/// A user's latest attempt at one question.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub id: String,
    pub user_id: String,
    pub test_id: String,
    pub question_number: u32,
    pub is_correct: bool,
    pub choice_sentences: Vec<String>,
    pub choice_imgs: Vec<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choice_translations: Option<Vec<String>>,
    pub selected_idxes: Vec<usize>,
    pub correct_idxes: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Order in which a user works through a test's questions. Stored once per
/// user and test; `None` entries are kept as sent.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressOrder {
    pub id: String,
    pub user_id: String,
    pub test_id: String,
    pub order: Vec<Option<u32>>,
}

impl ProgressOrder {
    pub fn new(user_id: &str, test_id: &str, order: Vec<Option<u32>>) -> Self {
        ProgressOrder {
            id: user_test_key(user_id, test_id),
            user_id: user_id.to_string(),
            test_id: test_id.to_string(),
            order,
        }
    }
}

impl Progress {
    pub fn key(user_id: &str, test_id: &str, question_number: u32) -> String {
        user_question_key(user_id, test_id, question_number)
    }
}
