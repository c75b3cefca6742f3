use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Answer, Community, CorrectAnswers, Favorite, Progress, Test};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestSummaryDto {
    pub id: String,
    pub test_name: String,
}

/// Tests keyed by course name.
pub type TestsByCourse = BTreeMap<String, Vec<TestSummaryDto>>;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestDto {
    pub id: String,
    pub course_name: String,
    pub test_name: String,
    pub length: u32,
}

impl From<Test> for TestDto {
    fn from(test: Test) -> Self {
        TestDto {
            id: test.id,
            course_name: test.course_name,
            test_name: test.test_name,
            length: test.length,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDto {
    pub sentence: String,
    pub is_indicated_img: bool,
    pub is_escaped_translation: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceDto {
    pub sentence: Option<String>,
    pub img: Option<String>,
    pub is_escaped_translation: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub subjects: Vec<SubjectDto>,
    pub choices: Vec<ChoiceDto>,
    pub is_multiplied: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDto {
    pub is_existed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_idxes: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanations: Option<Vec<String>>,
}

impl AnswerDto {
    pub fn missing() -> Self {
        AnswerDto {
            is_existed: false,
            correct_idxes: None,
            explanations: None,
        }
    }
}

impl From<Answer> for AnswerDto {
    fn from(answer: Answer) -> Self {
        AnswerDto {
            is_existed: true,
            correct_idxes: Some(answer.correct_idxes),
            explanations: Some(answer.explanations),
        }
    }
}

impl From<CorrectAnswers> for AnswerDto {
    fn from(answers: CorrectAnswers) -> Self {
        AnswerDto {
            is_existed: true,
            correct_idxes: Some(answers.correct_indexes),
            explanations: Some(answers.explanations),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommunityDto {
    pub is_existed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discussions_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<Vec<String>>,
}

impl CommunityDto {
    pub fn missing() -> Self {
        CommunityDto {
            is_existed: false,
            discussions_summary: None,
            votes: None,
        }
    }

    pub fn existing(discussions_summary: String, votes: Option<Vec<String>>) -> Self {
        CommunityDto {
            is_existed: true,
            discussions_summary: Some(discussions_summary),
            votes,
        }
    }
}

impl From<Community> for CommunityDto {
    fn from(community: Community) -> Self {
        CommunityDto::existing(community.discussions_summary, community.votes)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDto {
    pub question_number: u32,
    pub is_correct: bool,
    pub choice_sentences: Vec<String>,
    pub choice_imgs: Vec<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice_translations: Option<Vec<String>>,
    pub selected_idxes: Vec<usize>,
    pub correct_idxes: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Progress> for ProgressDto {
    fn from(progress: Progress) -> Self {
        ProgressDto {
            question_number: progress.question_number,
            is_correct: progress.is_correct,
            choice_sentences: progress.choice_sentences,
            choice_imgs: progress.choice_imgs,
            choice_translations: progress.choice_translations,
            selected_idxes: progress.selected_idxes,
            correct_idxes: progress.correct_idxes,
            updated_at: progress.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteDto {
    pub question_number: u32,
    pub is_favorite: bool,
}

impl From<Favorite> for FavoriteDto {
    fn from(favorite: Favorite) -> Self {
        FavoriteDto {
            question_number: favorite.question_number,
            is_favorite: favorite.is_favorite,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatusDto {
    pub is_favorite: bool,
}
