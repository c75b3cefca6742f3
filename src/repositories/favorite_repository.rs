use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, FAVORITES_COLLECTION},
    errors::AppResult,
    models::domain::{user_question_key, Favorite},
};

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn upsert(&self, favorite: Favorite) -> AppResult<Favorite>;
    async fn find(
        &self,
        user_id: &str,
        test_id: &str,
        question_number: u32,
    ) -> AppResult<Option<Favorite>>;
    async fn list_by_user_and_test(&self, user_id: &str, test_id: &str)
        -> AppResult<Vec<Favorite>>;
}

pub struct MongoFavoriteRepository {
    collection: Collection<Favorite>,
}

impl MongoFavoriteRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(FAVORITES_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for favorites collection");

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

        log::info!("Successfully created indexes for favorites collection");
        Ok(())
    }
}

#[async_trait]
impl FavoriteRepository for MongoFavoriteRepository {
    async fn upsert(&self, favorite: Favorite) -> AppResult<Favorite> {
        self.collection
            .replace_one(doc! { "id": &favorite.id }, &favorite)
            .upsert(true)
            .await?;
        Ok(favorite)
    }

    async fn find(
        &self,
        user_id: &str,
        test_id: &str,
        question_number: u32,
    ) -> AppResult<Option<Favorite>> {
        let favorite = self
            .collection
            .find_one(doc! { "id": user_question_key(user_id, test_id, question_number) })
            .await?;
        Ok(favorite)
    }

    async fn list_by_user_and_test(
        &self,
        user_id: &str,
        test_id: &str,
    ) -> AppResult<Vec<Favorite>> {
        let favorites = self
            .collection
            .find(doc! { "userId": user_id, "testId": test_id })
            .sort(doc! { "questionNumber": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(favorites)
    }
}
