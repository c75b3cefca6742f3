use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    generation::{AnswerGenerator, Generation},
    models::{dto::response::AnswerDto, message::AnswerMessage},
    queue::MessagePublisher,
    repositories::{AnswerRepository, QuestionRepository, TestRepository},
    services::question_service::question_not_found,
};

/// Serves stored answers and generates missing ones. Generated answers are
/// only ever persisted through the write-back queue.
pub struct AnswerService {
    questions: Arc<dyn QuestionRepository>,
    answers: Arc<dyn AnswerRepository>,
    tests: Arc<dyn TestRepository>,
    generator: AnswerGenerator,
    publisher: MessagePublisher,
}

impl AnswerService {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        answers: Arc<dyn AnswerRepository>,
        tests: Arc<dyn TestRepository>,
        generator: AnswerGenerator,
        publisher: MessagePublisher,
    ) -> Self {
        Self {
            questions,
            answers,
            tests,
            generator,
            publisher,
        }
    }

    pub async fn get_answer(&self, test_id: &str, question_number: u32) -> AppResult<AnswerDto> {
        let answer = self.answers.find(test_id, question_number).await?;
        Ok(answer.map_or_else(AnswerDto::missing, AnswerDto::from))
    }

    pub async fn generate_answer(
        &self,
        test_id: &str,
        question_number: u32,
    ) -> AppResult<AnswerDto> {
        if let Some(answer) = self.answers.find(test_id, question_number).await? {
            return Ok(answer.into());
        }

        let question = self
            .questions
            .find(test_id, question_number)
            .await?
            .ok_or_else(|| question_not_found(test_id, question_number))?;

        let course_name = self
            .tests
            .find_by_id(test_id)
            .await?
            .map(|test| test.course_name);

        let answers = match self.generator.generate(&question, course_name.as_deref()).await {
            Generation::Success(answers) => answers,
            Generation::Exhausted { attempts } => {
                return Err(AppError::GenerationFailed(format!(
                    "no valid answer for {} after {} attempts",
                    question.id, attempts
                )));
            }
        };

        let message = AnswerMessage::new(&question, &answers);
        if let Err(e) = self.publisher.publish_answer(&message).await {
            log::error!("Failed to enqueue answer for {}: {}", question.id, e);
        }

        Ok(answers.into())
    }
}
