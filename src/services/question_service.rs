use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    generation::vote_tally::{implies_multiple_answers, tally_votes},
    models::{
        domain::Question,
        dto::response::{ChoiceDto, QuestionDto, SubjectDto},
    },
    repositories::QuestionRepository,
};

pub struct QuestionService {
    repository: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_question(&self, test_id: &str, question_number: u32) -> AppResult<QuestionDto> {
        let question = self
            .repository
            .find(test_id, question_number)
            .await?
            .ok_or_else(|| question_not_found(test_id, question_number))?;

        Ok(to_dto(&question))
    }
}

pub(crate) fn question_not_found(test_id: &str, question_number: u32) -> AppError {
    AppError::NotFound(format!(
        "Question {} of test '{}' not found",
        question_number, test_id
    ))
}

/// Explicit `answerNum` wins; otherwise the community votes decide.
fn is_multiplied(question: &Question) -> bool {
    match question.answer_num {
        Some(answer_num) => answer_num > 1,
        None => tally_votes(question.discussions())
            .is_some_and(|votes| implies_multiple_answers(&votes)),
    }
}

fn to_dto(question: &Question) -> QuestionDto {
    let subjects = question
        .subjects
        .iter()
        .enumerate()
        .map(|(idx, sentence)| SubjectDto {
            sentence: sentence.clone(),
            is_indicated_img: question.is_subject_image(idx),
            is_escaped_translation: question.is_subject_escaped(idx),
        })
        .collect();

    let choices = question
        .choices
        .iter()
        .enumerate()
        .map(|(idx, sentence)| ChoiceDto {
            sentence: sentence.clone(),
            img: question.choice_image(idx).map(str::to_string),
            is_escaped_translation: question.is_choice_escaped(idx),
        })
        .collect();

    QuestionDto {
        subjects,
        choices,
        is_multiplied: is_multiplied(question),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Discussion;
    use crate::test_utils::{fixtures, InMemoryQuestionRepository};

    fn vote(label: &str) -> Discussion {
        Discussion {
            comment: String::new(),
            upvoted_num: 0,
            selected_answer: Some(label.to_string()),
        }
    }

    #[test]
    fn test_is_multiplied_prefers_answer_num() {
        let mut question = fixtures::text_question("t", 1);
        question.answer_num = Some(2);
        assert!(is_multiplied(&question));

        question.answer_num = Some(1);
        question.discussions = Some(vec![vote("AB")]);
        assert!(!is_multiplied(&question));
    }

    #[test]
    fn test_is_multiplied_falls_back_to_votes() {
        let mut question = fixtures::text_question("t", 1);
        question.answer_num = None;
        question.discussions = Some(vec![vote("AC"), vote("AC"), vote("B")]);
        assert!(is_multiplied(&question));

        question.discussions = Some(vec![vote("A")]);
        assert!(!is_multiplied(&question));

        question.discussions = None;
        assert!(!is_multiplied(&question));
    }

    #[tokio::test]
    async fn test_get_question_maps_images_and_escapes() {
        let repository = Arc::new(InMemoryQuestionRepository::new());
        let mut question = fixtures::text_question("aws", 2);
        question.subjects.push("https://img/q.png".to_string());
        question.indicate_subject_img_idxes = Some(vec![1]);
        question.indicate_choice_imgs = Some(vec![None, Some("https://img/b.png".to_string()), None]);
        repository.insert(question).await;

        let dto = QuestionService::new(repository).get_question("aws", 2).await.unwrap();

        assert!(!dto.subjects[0].is_indicated_img);
        assert!(dto.subjects[1].is_indicated_img);
        assert_eq!(dto.choices[1].img.as_deref(), Some("https://img/b.png"));
        assert_eq!(dto.choices[0].img, None);
        assert!(!dto.is_multiplied);
    }

    #[tokio::test]
    async fn test_get_missing_question_is_not_found() {
        let service = QuestionService::new(Arc::new(InMemoryQuestionRepository::new()));

        let result = service.get_question("aws", 9).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
