use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, COMMUNITIES_COLLECTION},
    errors::AppResult,
    models::domain::{question_key, Community},
};

#[async_trait]
pub trait CommunityRepository: Send + Sync {
    async fn find(&self, test_id: &str, question_number: u32) -> AppResult<Option<Community>>;
    /// Inserts or replaces the record with the same id.
    async fn upsert(&self, community: Community) -> AppResult<Community>;
}

pub struct MongoCommunityRepository {
    collection: Collection<Community>,
}

impl MongoCommunityRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(COMMUNITIES_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for communities collection");

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

        log::info!("Successfully created indexes for communities collection");
        Ok(())
    }
}

#[async_trait]
impl CommunityRepository for MongoCommunityRepository {
    async fn find(&self, test_id: &str, question_number: u32) -> AppResult<Option<Community>> {
        let community = self
            .collection
            .find_one(doc! { "id": question_key(test_id, question_number) })
            .await?;
        Ok(community)
    }

    async fn upsert(&self, community: Community) -> AppResult<Community> {
        self.collection
            .replace_one(doc! { "id": &community.id }, &community)
            .upsert(true)
            .await?;
        Ok(community)
    }
}
