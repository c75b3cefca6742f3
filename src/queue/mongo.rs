use std::time::Duration;

use async_trait::async_trait;
use mongodb::{
    bson::{doc, DateTime},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{MessageQueue, QueueMessage};
use crate::{
    db::{Database, QUEUE_MESSAGES_COLLECTION},
    errors::{AppError, AppResult},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredMessage {
    id: String,
    queue: String,
    body: String,
    dequeue_count: i64,
    visible_at: DateTime,
    inserted_at: DateTime,
}

impl From<StoredMessage> for QueueMessage {
    fn from(stored: StoredMessage) -> Self {
        QueueMessage {
            id: stored.id,
            body: stored.body,
            dequeue_count: u32::try_from(stored.dequeue_count).unwrap_or(u32::MAX),
        }
    }
}

fn after(now: DateTime, delay: Duration) -> DateTime {
    let millis = i64::try_from(delay.as_millis()).unwrap_or(i64::MAX);
    DateTime::from_millis(now.timestamp_millis().saturating_add(millis))
}

/// Queue backed by a MongoDB collection. Receiving pushes `visibleAt` into
/// the future; an undeleted message reappears once that moment passes.
pub struct MongoMessageQueue {
    collection: Collection<StoredMessage>,
}

impl MongoMessageQueue {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(QUEUE_MESSAGES_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for queue_messages collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let visibility_index = IndexModel::builder()
            .keys(doc! { "queue": 1, "visibleAt": 1 })
            .options(
                IndexOptions::builder()
                    .name("queue_visible_at".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(visibility_index).await?;

        log::info!("Successfully created indexes for queue_messages collection");
        Ok(())
    }
}

#[async_trait]
impl MessageQueue for MongoMessageQueue {
    async fn send(&self, queue: &str, body: String) -> AppResult<()> {
        let now = DateTime::now();
        let message = StoredMessage {
            id: Uuid::new_v4().to_string(),
            queue: queue.to_string(),
            body,
            dequeue_count: 0,
            visible_at: now,
            inserted_at: now,
        };

        self.collection
            .insert_one(&message)
            .await
            .map_err(|e| AppError::QueueError(e.to_string()))?;
        Ok(())
    }

    async fn receive(
        &self,
        queue: &str,
        visibility_timeout: Duration,
    ) -> AppResult<Option<QueueMessage>> {
        let now = DateTime::now();

        let claimed = self
            .collection
            .find_one_and_update(
                doc! { "queue": queue, "visibleAt": { "$lte": now } },
                doc! {
                    "$set": { "visibleAt": after(now, visibility_timeout) },
                    "$inc": { "dequeueCount": 1 }
                },
            )
            .sort(doc! { "visibleAt": 1 })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| AppError::QueueError(e.to_string()))?;

        Ok(claimed.map(QueueMessage::from))
    }

    async fn delete(&self, queue: &str, message_id: &str) -> AppResult<()> {
        self.collection
            .delete_one(doc! { "queue": queue, "id": message_id })
            .await
            .map_err(|e| AppError::QueueError(e.to_string()))?;
        Ok(())
    }
}
