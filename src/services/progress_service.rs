use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::dto::{
        request::{CreateProgressOrderRequest, UpsertProgressRequest},
        response::ProgressDto,
    },
    repositories::ProgressRepository,
};

pub struct ProgressService {
    repository: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    pub fn new(repository: Arc<dyn ProgressRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_progresses(&self, user_id: &str, test_id: &str) -> AppResult<Vec<ProgressDto>> {
        let progresses = self
            .repository
            .list_by_user_and_test(user_id, test_id)
            .await?;
        Ok(progresses.into_iter().map(ProgressDto::from).collect())
    }

    pub async fn upsert_progress(
        &self,
        user_id: &str,
        test_id: &str,
        question_number: u32,
        request: UpsertProgressRequest,
    ) -> AppResult<()> {
        request.validate()?;

        self.repository
            .upsert(request.into_progress(user_id, test_id, question_number))
            .await?;
        Ok(())
    }

    /// Stores the question order for a user's run through a test. An order is
    /// written once; a second one is rejected until progresses are deleted.
    pub async fn create_order(
        &self,
        user_id: &str,
        test_id: &str,
        request: CreateProgressOrderRequest,
    ) -> AppResult<()> {
        if self.repository.find_order(user_id, test_id).await?.is_some() {
            return Err(AppError::ValidationError(
                "Progresses Order Already exists".to_string(),
            ));
        }

        self.repository
            .insert_order(request.into_order(user_id, test_id))
            .await?;
        Ok(())
    }

    pub async fn delete_progresses(&self, user_id: &str, test_id: &str) -> AppResult<u64> {
        let deleted = self
            .repository
            .delete_by_user_and_test(user_id, test_id)
            .await?;
        log::info!(
            "Deleted {} progress records of user {} for test {}",
            deleted,
            user_id,
            test_id
        );
        Ok(deleted)
    }
}
