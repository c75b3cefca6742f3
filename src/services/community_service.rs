use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    generation::{vote_tally::tally_votes, DiscussionSummarizer, Generation},
    models::{dto::response::CommunityDto, message::CommunityMessage},
    queue::MessagePublisher,
    repositories::{CommunityRepository, QuestionRepository},
    services::question_service::question_not_found,
};

pub struct CommunityService {
    questions: Arc<dyn QuestionRepository>,
    communities: Arc<dyn CommunityRepository>,
    summarizer: DiscussionSummarizer,
    publisher: MessagePublisher,
}

impl CommunityService {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        communities: Arc<dyn CommunityRepository>,
        summarizer: DiscussionSummarizer,
        publisher: MessagePublisher,
    ) -> Self {
        Self {
            questions,
            communities,
            summarizer,
            publisher,
        }
    }

    pub async fn get_community(
        &self,
        test_id: &str,
        question_number: u32,
    ) -> AppResult<CommunityDto> {
        let community = self.communities.find(test_id, question_number).await?;
        Ok(community.map_or_else(CommunityDto::missing, CommunityDto::from))
    }

    pub async fn generate_community(
        &self,
        test_id: &str,
        question_number: u32,
    ) -> AppResult<CommunityDto> {
        if let Some(community) = self.communities.find(test_id, question_number).await? {
            return Ok(community.into());
        }

        let question = self
            .questions
            .find(test_id, question_number)
            .await?
            .ok_or_else(|| question_not_found(test_id, question_number))?;

        let discussions = question.discussions();
        if discussions.is_empty() {
            return Ok(CommunityDto::missing());
        }

        let summary = match self.summarizer.summarize(discussions).await {
            Generation::Success(summary) => summary,
            Generation::Exhausted { attempts } => {
                return Err(AppError::GenerationFailed(format!(
                    "no discussion summary for {} after {} attempts",
                    question.id, attempts
                )));
            }
        };
        let votes = tally_votes(discussions);

        let message = CommunityMessage::new(&question, summary.clone(), votes.clone());
        if let Err(e) = self.publisher.publish_community(&message).await {
            log::error!("Failed to enqueue community summary for {}: {}", question.id, e);
        }

        Ok(CommunityDto::existing(summary, votes))
    }
}
