//! At-least-once message transport between the request path and the
//! write-back consumer.

pub mod mongo;
pub mod publisher;
pub mod worker;

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::AppResult;

pub use mongo::MongoMessageQueue;
pub use publisher::MessagePublisher;
pub use worker::{MessageHandler, QueueWorker};

/// A claimed message. It stays invisible to other receivers until its
/// visibility timeout lapses or it is deleted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueMessage {
    pub id: String,
    pub body: String,
    /// Number of times the message has been received, including this one.
    pub dequeue_count: u32,
}

#[async_trait]
pub trait MessageQueue: Send + Sync {
    async fn send(&self, queue: &str, body: String) -> AppResult<()>;

    /// Claims one visible message of `queue`, if any.
    async fn receive(
        &self,
        queue: &str,
        visibility_timeout: Duration,
    ) -> AppResult<Option<QueueMessage>>;

    async fn delete(&self, queue: &str, message_id: &str) -> AppResult<()>;
}
