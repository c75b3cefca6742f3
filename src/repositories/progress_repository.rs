use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, PROGRESSES_COLLECTION, PROGRESS_ORDERS_COLLECTION},
    errors::AppResult,
    models::domain::{Progress, ProgressOrder},
};

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn upsert(&self, progress: Progress) -> AppResult<Progress>;
    /// Progress records of `user_id` for `test_id`, ordered by question number.
    async fn list_by_user_and_test(&self, user_id: &str, test_id: &str)
        -> AppResult<Vec<Progress>>;
    /// Returns the number of deleted records. The stored question order goes
    /// with them.
    async fn delete_by_user_and_test(&self, user_id: &str, test_id: &str) -> AppResult<u64>;
    async fn find_order(&self, user_id: &str, test_id: &str) -> AppResult<Option<ProgressOrder>>;
    async fn insert_order(&self, order: ProgressOrder) -> AppResult<ProgressOrder>;
}

pub struct MongoProgressRepository {
    collection: Collection<Progress>,
    orders: Collection<ProgressOrder>,
}

impl MongoProgressRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.get_collection(PROGRESSES_COLLECTION),
            orders: db.get_collection(PROGRESS_ORDERS_COLLECTION),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for progresses collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let user_test_index = IndexModel::builder()
            .keys(doc! { "userId": 1, "testId": 1, "questionNumber": 1 })
            .options(
                IndexOptions::builder()
                    .name("user_test_question".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_test_index).await?;

        let order_id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        self.orders.create_index(order_id_index).await?;

        log::info!("Successfully created indexes for progresses collection");
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for MongoProgressRepository {
    async fn upsert(&self, progress: Progress) -> AppResult<Progress> {
        self.collection
            .replace_one(doc! { "id": &progress.id }, &progress)
            .upsert(true)
            .await?;
        Ok(progress)
    }

    async fn list_by_user_and_test(
        &self,
        user_id: &str,
        test_id: &str,
    ) -> AppResult<Vec<Progress>> {
        let progresses = self
            .collection
            .find(doc! { "userId": user_id, "testId": test_id })
            .sort(doc! { "questionNumber": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(progresses)
    }

    async fn delete_by_user_and_test(&self, user_id: &str, test_id: &str) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "userId": user_id, "testId": test_id })
            .await?;
        self.orders
            .delete_one(doc! { "userId": user_id, "testId": test_id })
            .await?;
        Ok(result.deleted_count)
    }

    async fn find_order(&self, user_id: &str, test_id: &str) -> AppResult<Option<ProgressOrder>> {
        let order = self
            .orders
            .find_one(doc! { "userId": user_id, "testId": test_id })
            .await?;
        Ok(order)
    }

    async fn insert_order(&self, order: ProgressOrder) -> AppResult<ProgressOrder> {
        self.orders.insert_one(&order).await?;
        Ok(order)
    }
}
