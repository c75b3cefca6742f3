use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::{sync::RwLock, task::JoinHandle};

use super::{MessageQueue, QueueMessage};
use crate::{config::QueueSettings, errors::AppResult};

/// Consumer of one decoded message type. An `Err` leaves the message on the
/// queue for redelivery.
#[async_trait]
pub trait MessageHandler<M: Send + 'static>: Send + Sync {
    async fn handle(&self, message: M) -> AppResult<()>;
}

/// What a single poll did with the message it claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Idle,
    Handled,
    Undecodable,
    Retrying,
    Poisoned,
}

/// Background poller for one named queue.
pub struct QueueWorker<M> {
    queue_name: String,
    queue: Arc<dyn MessageQueue>,
    handler: Arc<dyn MessageHandler<M>>,
    settings: QueueSettings,
    worker_handle: Arc<RwLock<Option<JoinHandle<()>>>>,
}

impl<M> Clone for QueueWorker<M> {
    fn clone(&self) -> Self {
        Self {
            queue_name: self.queue_name.clone(),
            queue: self.queue.clone(),
            handler: self.handler.clone(),
            settings: self.settings.clone(),
            worker_handle: self.worker_handle.clone(),
        }
    }
}

impl<M> QueueWorker<M>
where
    M: DeserializeOwned + Send + 'static,
{
    pub fn new(
        queue_name: impl Into<String>,
        queue: Arc<dyn MessageQueue>,
        handler: Arc<dyn MessageHandler<M>>,
        settings: &QueueSettings,
    ) -> Self {
        Self {
            queue_name: queue_name.into(),
            queue,
            handler,
            settings: settings.clone(),
            worker_handle: Arc::new(RwLock::new(None)),
        }
    }

    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    /// Claims at most one message and processes it.
    pub async fn poll_once(&self) -> AppResult<PollOutcome> {
        let Some(message) = self
            .queue
            .receive(&self.queue_name, self.settings.visibility_timeout)
            .await?
        else {
            return Ok(PollOutcome::Idle);
        };

        self.process(message).await
    }

    async fn process(&self, message: QueueMessage) -> AppResult<PollOutcome> {
        let decoded: M = match serde_json::from_str(&message.body) {
            Ok(decoded) => decoded,
            Err(e) => {
                log::warn!(
                    "Discarding undecodable message {} on '{}': {}",
                    message.id,
                    self.queue_name,
                    e
                );
                self.queue.delete(&self.queue_name, &message.id).await?;
                return Ok(PollOutcome::Undecodable);
            }
        };

        match self.handler.handle(decoded).await {
            Ok(()) => {
                self.queue.delete(&self.queue_name, &message.id).await?;
                Ok(PollOutcome::Handled)
            }
            Err(e) if message.dequeue_count >= self.settings.max_dequeue_count => {
                log::error!(
                    "Dropping poison message {} on '{}' after {} deliveries: {}",
                    message.id,
                    self.queue_name,
                    message.dequeue_count,
                    e
                );
                self.queue.delete(&self.queue_name, &message.id).await?;
                Ok(PollOutcome::Poisoned)
            }
            Err(e) => {
                log::warn!(
                    "Message {} on '{}' failed (delivery {}), will retry: {}",
                    message.id,
                    self.queue_name,
                    message.dequeue_count,
                    e
                );
                Ok(PollOutcome::Retrying)
            }
        }
    }

    /// Starts polling in a background task. Calling it again replaces the
    /// running task.
    pub async fn start(&self) {
        let worker = self.clone();

        let join_handle = tokio::spawn(async move {
            log::info!("Queue worker for '{}' started", worker.queue_name);
            loop {
                match worker.poll_once().await {
                    Ok(PollOutcome::Idle) => {
                        tokio::time::sleep(worker.settings.poll_interval).await;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        log::error!("Queue worker for '{}' failed to poll: {}", worker.queue_name, e);
                        tokio::time::sleep(worker.settings.poll_interval).await;
                    }
                }
            }
        });

        let mut handle = self.worker_handle.write().await;
        if let Some(previous) = handle.replace(join_handle) {
            previous.abort();
        }
    }

    pub async fn stop(&self) {
        let mut handle = self.worker_handle.write().await;
        if let Some(join_handle) = handle.take() {
            join_handle.abort();
            log::info!("Queue worker for '{}' stopped", self.queue_name);
        }
    }

    pub async fn is_running(&self) -> bool {
        self.worker_handle
            .read()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}
