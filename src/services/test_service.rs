use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::dto::response::{TestDto, TestSummaryDto, TestsByCourse},
    repositories::TestRepository,
};

pub struct TestService {
    repository: Arc<dyn TestRepository>,
}

impl TestService {
    pub fn new(repository: Arc<dyn TestRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_by_course(&self) -> AppResult<TestsByCourse> {
        let mut grouped = TestsByCourse::new();
        for test in self.repository.list().await? {
            grouped
                .entry(test.course_name)
                .or_default()
                .push(TestSummaryDto {
                    id: test.id,
                    test_name: test.test_name,
                });
        }

        for tests in grouped.values_mut() {
            tests.sort_by(|a, b| a.test_name.cmp(&b.test_name));
        }

        Ok(grouped)
    }

    pub async fn get_test(&self, test_id: &str) -> AppResult<TestDto> {
        let test = self
            .repository
            .find_by_id(test_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Test with id '{}' not found", test_id)))?;

        Ok(test.into())
    }
}
