use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, QUESTIONS_COLLECTION},
    errors::AppResult,
    models::domain::Question,
};

/// Read-only access to imported questions. Questions are written by the
/// import tooling, never by this service.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn find(&self, test_id: &str, number: u32) -> AppResult<Option<Question>>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(QUESTIONS_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");

        let test_number_index = IndexModel::builder()
            .keys(doc! { "testId": 1, "number": 1 })
            .options(
                IndexOptions::builder()
                    .name("test_number".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(test_number_index).await?;

        log::info!("Successfully created indexes for questions collection");
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn find(&self, test_id: &str, number: u32) -> AppResult<Option<Question>> {
        let question = self
            .collection
            .find_one(doc! { "testId": test_id, "number": i64::from(number) })
            .await?;
        Ok(question)
    }
}
