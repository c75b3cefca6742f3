use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::{
        domain::Favorite,
        dto::response::{FavoriteDto, FavoriteStatusDto},
    },
    repositories::FavoriteRepository,
};

pub struct FavoriteService {
    repository: Arc<dyn FavoriteRepository>,
}

impl FavoriteService {
    pub fn new(repository: Arc<dyn FavoriteRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_favorites(&self, user_id: &str, test_id: &str) -> AppResult<Vec<FavoriteDto>> {
        let favorites = self
            .repository
            .list_by_user_and_test(user_id, test_id)
            .await?;
        Ok(favorites.into_iter().map(FavoriteDto::from).collect())
    }

    /// A question the user never marked is simply not a favorite.
    pub async fn get_favorite(
        &self,
        user_id: &str,
        test_id: &str,
        question_number: u32,
    ) -> AppResult<FavoriteStatusDto> {
        let favorite = self
            .repository
            .find(user_id, test_id, question_number)
            .await?;
        Ok(FavoriteStatusDto {
            is_favorite: favorite.is_some_and(|f| f.is_favorite),
        })
    }

    pub async fn set_favorite(
        &self,
        user_id: &str,
        test_id: &str,
        question_number: u32,
        is_favorite: bool,
    ) -> AppResult<()> {
        self.repository
            .upsert(Favorite::new(user_id, test_id, question_number, is_favorite))
            .await?;
        Ok(())
    }
}
