use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, ANSWERS_COLLECTION},
    errors::AppResult,
    models::domain::{question_key, Answer},
};

#[async_trait]
pub trait AnswerRepository: Send + Sync {
    async fn find(&self, test_id: &str, question_number: u32) -> AppResult<Option<Answer>>;
    /// Inserts or replaces the record with the same id.
    async fn upsert(&self, answer: Answer) -> AppResult<Answer>;
}

pub struct MongoAnswerRepository {
    collection: Collection<Answer>,
}

impl MongoAnswerRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(ANSWERS_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for answers collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;

        log::info!("Successfully created indexes for answers collection");
        Ok(())
    }
}

#[async_trait]
impl AnswerRepository for MongoAnswerRepository {
    async fn find(&self, test_id: &str, question_number: u32) -> AppResult<Option<Answer>> {
        let answer = self
            .collection
            .find_one(doc! { "id": question_key(test_id, question_number) })
            .await?;
        Ok(answer)
    }

    async fn upsert(&self, answer: Answer) -> AppResult<Answer> {
        self.collection
            .replace_one(doc! { "id": &answer.id }, &answer)
            .upsert(true)
            .await?;
        Ok(answer)
    }
}
