use serde::{Deserialize, Serialize};

use super::question_key;

/// A community comment attached to a question.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub upvoted_num: i64,
    #[serde(default)]
    pub selected_answer: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EscapeTranslatedIdxes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<usize>>,
}

/// An exam item. Subjects hold either sentences or image URLs; the indexes in
/// `indicate_subject_img_idxes` mark which entries are images. A choice is
/// `None` when it consists only of its trailing image.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub test_id: String,
    pub number: u32,
    pub subjects: Vec<String>,
    pub choices: Vec<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_num: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicate_subject_img_idxes: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicate_choice_imgs: Option<Vec<Option<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escape_translated_idxes: Option<EscapeTranslatedIdxes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discussions: Option<Vec<Discussion>>,
}

impl Question {
    pub fn new(
        test_id: &str,
        number: u32,
        subjects: Vec<String>,
        choices: Vec<Option<String>>,
        answer_num: u32,
    ) -> Self {
        Question {
            id: question_key(test_id, number),
            test_id: test_id.to_string(),
            number,
            subjects,
            choices,
            answer_num: Some(answer_num),
            indicate_subject_img_idxes: None,
            indicate_choice_imgs: None,
            escape_translated_idxes: None,
            discussions: None,
        }
    }

    /// Number of options the model must mark correct. Questions imported
    /// without `answerNum` are treated as single-answer.
    pub fn required_answer_count(&self) -> u32 {
        self.answer_num.unwrap_or(1)
    }

    pub fn is_subject_image(&self, idx: usize) -> bool {
        self.indicate_subject_img_idxes
            .as_ref()
            .is_some_and(|idxes| idxes.contains(&idx))
    }

    pub fn choice_image(&self, idx: usize) -> Option<&str> {
        self.indicate_choice_imgs
            .as_ref()
            .and_then(|imgs| imgs.get(idx))
            .and_then(|img| img.as_deref())
    }

    pub fn is_subject_escaped(&self, idx: usize) -> bool {
        self.escape_translated_idxes
            .as_ref()
            .and_then(|e| e.subjects.as_ref())
            .is_some_and(|idxes| idxes.contains(&idx))
    }

    pub fn is_choice_escaped(&self, idx: usize) -> bool {
        self.escape_translated_idxes
            .as_ref()
            .and_then(|e| e.choices.as_ref())
            .is_some_and(|idxes| idxes.contains(&idx))
    }

    pub fn discussions(&self) -> &[Discussion] {
        self.discussions.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_question() -> Question {
        let mut question = Question::new(
            "aws-saa",
            1,
            vec!["Which service?".to_string(), "https://img/1.png".to_string()],
            vec![Some("EC2".to_string()), None],
            1,
        );
        question.indicate_subject_img_idxes = Some(vec![1]);
        question.indicate_choice_imgs = Some(vec![None, Some("https://img/c2.png".to_string())]);
        question.escape_translated_idxes = Some(EscapeTranslatedIdxes {
            subjects: None,
            choices: Some(vec![0]),
        });
        question
    }

    #[test]
    fn question_id_uses_test_and_number() {
        assert_eq!(sample_question().id, "aws-saa_1");
    }

    #[test]
    fn image_and_escape_lookups() {
        let question = sample_question();

        assert!(!question.is_subject_image(0));
        assert!(question.is_subject_image(1));
        assert_eq!(question.choice_image(0), None);
        assert_eq!(question.choice_image(1), Some("https://img/c2.png"));
        assert_eq!(question.choice_image(5), None);
        assert!(question.is_choice_escaped(0));
        assert!(!question.is_subject_escaped(0));
    }

    #[test]
    fn deserializes_camel_case_document_with_missing_optionals() {
        let json = r#"{
            "id": "t_2",
            "testId": "t",
            "number": 2,
            "subjects": ["Q"],
            "choices": ["a", null],
            "discussions": [{"comment": "A for sure", "upvotedNum": 3, "selectedAnswer": "A"}]
        }"#;

        let question: Question = serde_json::from_str(json).expect("question should parse");

        assert_eq!(question.choices, vec![Some("a".to_string()), None]);
        assert_eq!(question.answer_num, None);
        assert_eq!(question.required_answer_count(), 1);
        assert_eq!(question.discussions().len(), 1);
        assert_eq!(question.discussions()[0].selected_answer.as_deref(), Some("A"));
    }

    #[test]
    fn discussion_defaults_missing_fields() {
        let discussion: Discussion =
            serde_json::from_str(r#"{"comment": "hmm"}"#).expect("discussion should parse");

        assert_eq!(discussion.upvoted_num, 0);
        assert_eq!(discussion.selected_answer, None);
    }
}
