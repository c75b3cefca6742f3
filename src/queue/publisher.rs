use std::sync::Arc;

use serde::Serialize;

use super::MessageQueue;
use crate::{
    config::QueueSettings,
    errors::AppResult,
    models::message::{AnswerMessage, CommunityMessage},
};

/// Typed outbound side of the write-back queues.
#[derive(Clone)]
pub struct MessagePublisher {
    queue: Arc<dyn MessageQueue>,
    answer_queue: String,
    community_queue: String,
}

impl MessagePublisher {
    pub fn new(queue: Arc<dyn MessageQueue>, settings: &QueueSettings) -> Self {
        Self {
            queue,
            answer_queue: settings.answer_queue_name.clone(),
            community_queue: settings.community_queue_name.clone(),
        }
    }

    pub async fn publish_answer(&self, message: &AnswerMessage) -> AppResult<()> {
        self.publish(&self.answer_queue, message).await
    }

    pub async fn publish_community(&self, message: &CommunityMessage) -> AppResult<()> {
        self.publish(&self.community_queue, message).await
    }

    async fn publish<M: Serialize + Sync>(&self, queue: &str, message: &M) -> AppResult<()> {
        let body = serde_json::to_string(message)?;
        self.queue.send(queue, body).await?;
        log::debug!("Published message to queue '{}'", queue);
        Ok(())
    }
}
