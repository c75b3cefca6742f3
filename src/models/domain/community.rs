use serde::{Deserialize, Serialize};

use super::question_key;

/// Persisted community summary, keyed by `"{testId}_{questionNumber}"`.
/// `votes` is absent when no discussion selected an answer.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: String,
    pub test_id: String,
    pub question_number: u32,
    pub discussions_summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<Vec<String>>,
}

impl Community {
    pub fn new(
        test_id: &str,
        question_number: u32,
        discussions_summary: String,
        votes: Option<Vec<String>>,
    ) -> Self {
        Community {
            id: question_key(test_id, question_number),
            test_id: test_id.to_string(),
            question_number,
            discussions_summary,
            votes,
        }
    }
}
