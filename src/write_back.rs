//! Verify-then-commit consumer for generated answers and community summaries.
//!
//! A message is committed only if the question it was generated from is
//! still identical to the stored question. Anything else is dropped without
//! an error, so stale or duplicate deliveries never poison the queue.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    errors::AppResult,
    models::message::{AnswerMessage, CommunityMessage, GeneratedMessage},
    queue::MessageHandler,
    repositories::{AnswerRepository, CommunityRepository, QuestionRepository},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    QuestionMissing,
    SourceChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteBackOutcome {
    Committed,
    Discarded(DiscardReason),
}

pub struct WriteBackConsumer {
    questions: Arc<dyn QuestionRepository>,
    answers: Arc<dyn AnswerRepository>,
    communities: Arc<dyn CommunityRepository>,
}

impl WriteBackConsumer {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        answers: Arc<dyn AnswerRepository>,
        communities: Arc<dyn CommunityRepository>,
    ) -> Self {
        Self {
            questions,
            answers,
            communities,
        }
    }

    pub async fn handle_answer(&self, message: AnswerMessage) -> AppResult<WriteBackOutcome> {
        if let Some(reason) = self.check_source("answer", &message).await? {
            return Ok(WriteBackOutcome::Discarded(reason));
        }

        let answer = self.answers.upsert(message.into_record()).await?;
        log::info!("Committed answer {}", answer.id);
        Ok(WriteBackOutcome::Committed)
    }

    pub async fn handle_community(
        &self,
        message: CommunityMessage,
    ) -> AppResult<WriteBackOutcome> {
        if let Some(reason) = self.check_source("community", &message).await? {
            return Ok(WriteBackOutcome::Discarded(reason));
        }

        let community = self.communities.upsert(message.into_record()).await?;
        log::info!("Committed community summary {}", community.id);
        Ok(WriteBackOutcome::Committed)
    }

    /// Re-reads the question and returns why the message must be dropped, if
    /// it must.
    async fn check_source<M>(&self, kind: &str, message: &M) -> AppResult<Option<DiscardReason>>
    where
        M: GeneratedMessage + Sync,
    {
        let question = self
            .questions
            .find(message.test_id(), message.question_number())
            .await?;

        let reason = match question {
            None => Some(DiscardReason::QuestionMissing),
            Some(ref question) if !message.matches_source(question) => {
                Some(DiscardReason::SourceChanged)
            }
            Some(_) => None,
        };

        if let Some(reason) = reason {
            log::warn!(
                "Discarding {} for {}_{}: {:?}",
                kind,
                message.test_id(),
                message.question_number(),
                reason
            );
        }

        Ok(reason)
    }
}

#[async_trait]
impl MessageHandler<AnswerMessage> for WriteBackConsumer {
    async fn handle(&self, message: AnswerMessage) -> AppResult<()> {
        self.handle_answer(message).await.map(|_| ())
    }
}

#[async_trait]
impl MessageHandler<CommunityMessage> for WriteBackConsumer {
    async fn handle(&self, message: CommunityMessage) -> AppResult<()> {
        self.handle_community(message).await.map(|_| ())
    }
}
