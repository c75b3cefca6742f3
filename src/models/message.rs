//! Units of work handed from the request path to the write-back consumer.
//!
//! Each message embeds the source content the result was generated from, so
//! the consumer can tell whether the question changed in the meantime.

use serde::{Deserialize, Serialize};

use crate::models::domain::{Answer, Community, CorrectAnswers, Discussion, Question};

/// Behaviour the write-back consumer needs from any queued generation result.
pub trait GeneratedMessage {
    type Record;

    fn test_id(&self) -> &str;

    fn question_number(&self) -> u32;

    /// True when the content this message was generated from is identical
    /// to the current question record.
    fn matches_source(&self, question: &Question) -> bool;

    fn into_record(self) -> Self::Record;
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerMessage {
    pub test_id: String,
    pub question_number: u32,
    pub subjects: Vec<String>,
    pub choices: Vec<Option<String>>,
    pub correct_idxes: Vec<usize>,
    pub explanations: Vec<String>,
}

impl AnswerMessage {
    pub fn new(question: &Question, answers: &CorrectAnswers) -> Self {
        AnswerMessage {
            test_id: question.test_id.clone(),
            question_number: question.number,
            subjects: question.subjects.clone(),
            choices: question.choices.clone(),
            correct_idxes: answers.correct_indexes.clone(),
            explanations: answers.explanations.clone(),
        }
    }

    pub fn correct_answers(&self) -> CorrectAnswers {
        CorrectAnswers {
            correct_indexes: self.correct_idxes.clone(),
            explanations: self.explanations.clone(),
        }
    }
}

impl GeneratedMessage for AnswerMessage {
    type Record = Answer;

    fn test_id(&self) -> &str {
        &self.test_id
    }

    fn question_number(&self) -> u32 {
        self.question_number
    }

    fn matches_source(&self, question: &Question) -> bool {
        self.subjects == question.subjects && self.choices == question.choices
    }

    fn into_record(self) -> Answer {
        Answer::new(
            &self.test_id,
            self.question_number,
            CorrectAnswers {
                correct_indexes: self.correct_idxes,
                explanations: self.explanations,
            },
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityMessage {
    pub test_id: String,
    pub question_number: u32,
    pub discussions: Vec<Discussion>,
    pub discussions_summary: String,
    #[serde(default)]
    pub votes: Option<Vec<String>>,
}

impl CommunityMessage {
    pub fn new(question: &Question, discussions_summary: String, votes: Option<Vec<String>>) -> Self {
        CommunityMessage {
            test_id: question.test_id.clone(),
            question_number: question.number,
            discussions: question.discussions().to_vec(),
            discussions_summary,
            votes,
        }
    }
}

impl GeneratedMessage for CommunityMessage {
    type Record = Community;

    fn test_id(&self) -> &str {
        &self.test_id
    }

    fn question_number(&self) -> u32 {
        self.question_number
    }

    fn matches_source(&self, question: &Question) -> bool {
        self.discussions.as_slice() == question.discussions()
    }

    fn into_record(self) -> Community {
        Community::new(
            &self.test_id,
            self.question_number,
            self.discussions_summary,
            self.votes,
        )
    }
}
