use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::question_key;

/// Validated output of the answer generator. `correct_indexes` are zero-based
/// indexes into the question's choices.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CorrectAnswers {
    pub correct_indexes: Vec<usize>,
    pub explanations: Vec<String>,
}

impl CorrectAnswers {
    /// Checks the invariants a generated answer must satisfy for a question
    /// with `choice_count` choices and `answer_num` correct options.
    pub fn validate(&self, choice_count: usize, answer_num: usize) -> Result<(), String> {
        if self.explanations.len() != choice_count {
            return Err(format!(
                "expected {} explanations, got {}",
                choice_count,
                self.explanations.len()
            ));
        }

        if self.correct_indexes.len() != answer_num {
            return Err(format!(
                "expected {} correct indexes, got {}",
                answer_num,
                self.correct_indexes.len()
            ));
        }

        if let Some(idx) = self.correct_indexes.iter().find(|&&idx| idx >= choice_count) {
            return Err(format!(
                "correct index {} is out of range for {} choices",
                idx, choice_count
            ));
        }

        let unique: HashSet<_> = self.correct_indexes.iter().collect();
        if unique.len() != self.correct_indexes.len() {
            return Err("correct indexes contain duplicates".to_string());
        }

        Ok(())
    }
}

/// Persisted answer, keyed by `"{testId}_{questionNumber}"`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: String,
    pub test_id: String,
    pub question_number: u32,
    pub correct_idxes: Vec<usize>,
    pub explanations: Vec<String>,
}

impl Answer {
    pub fn new(test_id: &str, question_number: u32, answers: CorrectAnswers) -> Self {
        Answer {
            id: question_key(test_id, question_number),
            test_id: test_id.to_string(),
            question_number,
            correct_idxes: answers.correct_indexes,
            explanations: answers.explanations,
        }
    }
}
