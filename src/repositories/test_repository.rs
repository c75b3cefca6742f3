use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    db::{Database, TESTS_COLLECTION},
    errors::AppResult,
    models::domain::Test,
};

#[async_trait]
pub trait TestRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Test>>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Test>>;
}

pub struct MongoTestRepository {
    collection: Collection<Test>,
}

impl MongoTestRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(TESTS_COLLECTION);
        Self { collection }
    }
}

#[async_trait]
impl TestRepository for MongoTestRepository {
    async fn list(&self) -> AppResult<Vec<Test>> {
        let tests = self
            .collection
            .find(doc! {})
            .sort(doc! { "courseName": 1, "testName": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(tests)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Test>> {
        let test = self.collection.find_one(doc! { "id": id }).await?;
        Ok(test)
    }
}
