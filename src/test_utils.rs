//! In-memory stand-ins for the MongoDB repositories and queue.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use tokio::{sync::RwLock, time::Instant};

use crate::{
    app_state::{AppState, Repositories},
    config::Config,
    errors::AppResult,
    llm::LanguageModel,
    models::domain::{question_key, user_question_key, Answer, Community, Favorite, Progress, ProgressOrder, Question, Test},
    queue::{MessageQueue, QueueMessage},
    repositories::{
        AnswerRepository, CommunityRepository, FavoriteRepository, ProgressRepository,
        QuestionRepository, TestRepository,
    },
};

#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: Arc<RwLock<HashMap<String, Question>>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, question: Question) {
        self.questions
            .write()
            .await
            .insert(question_key(&question.test_id, question.number), question);
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn find(&self, test_id: &str, number: u32) -> AppResult<Option<Question>> {
        let questions = self.questions.read().await;
        Ok(questions.get(&question_key(test_id, number)).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryAnswerRepository {
    answers: Arc<RwLock<HashMap<String, Answer>>>,
    upserts: Arc<RwLock<u32>>,
}

impl InMemoryAnswerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upsert_count(&self) -> u32 {
        *self.upserts.read().await
    }

    pub async fn len(&self) -> usize {
        self.answers.read().await.len()
    }
}

#[async_trait]
impl AnswerRepository for InMemoryAnswerRepository {
    async fn find(&self, test_id: &str, question_number: u32) -> AppResult<Option<Answer>> {
        let answers = self.answers.read().await;
        Ok(answers.get(&question_key(test_id, question_number)).cloned())
    }

    async fn upsert(&self, answer: Answer) -> AppResult<Answer> {
        self.answers
            .write()
            .await
            .insert(answer.id.clone(), answer.clone());
        *self.upserts.write().await += 1;
        Ok(answer)
    }
}

#[derive(Default)]
pub struct InMemoryCommunityRepository {
    communities: Arc<RwLock<HashMap<String, Community>>>,
    upserts: Arc<RwLock<u32>>,
}

impl InMemoryCommunityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upsert_count(&self) -> u32 {
        *self.upserts.read().await
    }
}

#[async_trait]
impl CommunityRepository for InMemoryCommunityRepository {
    async fn find(&self, test_id: &str, question_number: u32) -> AppResult<Option<Community>> {
        let communities = self.communities.read().await;
        Ok(communities
            .get(&question_key(test_id, question_number))
            .cloned())
    }

    async fn upsert(&self, community: Community) -> AppResult<Community> {
        self.communities
            .write()
            .await
            .insert(community.id.clone(), community.clone());
        *self.upserts.write().await += 1;
        Ok(community)
    }
}

#[derive(Default)]
pub struct InMemoryTestRepository {
    tests: Arc<RwLock<HashMap<String, Test>>>,
}

impl InMemoryTestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, test: Test) {
        self.tests.write().await.insert(test.id.clone(), test);
    }
}

#[async_trait]
impl TestRepository for InMemoryTestRepository {
    async fn list(&self) -> AppResult<Vec<Test>> {
        let tests = self.tests.read().await;
        let mut items: Vec<_> = tests.values().cloned().collect();
        items.sort_by(|a, b| {
            a.course_name
                .cmp(&b.course_name)
                .then_with(|| a.test_name.cmp(&b.test_name))
        });
        Ok(items)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Test>> {
        Ok(self.tests.read().await.get(id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryProgressRepository {
    progresses: Arc<RwLock<HashMap<String, Progress>>>,
    orders: Arc<RwLock<HashMap<String, ProgressOrder>>>,
}

impl InMemoryProgressRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryProgressRepository {
    async fn upsert(&self, progress: Progress) -> AppResult<Progress> {
        self.progresses
            .write()
            .await
            .insert(progress.id.clone(), progress.clone());
        Ok(progress)
    }

    async fn list_by_user_and_test(
        &self,
        user_id: &str,
        test_id: &str,
    ) -> AppResult<Vec<Progress>> {
        let progresses = self.progresses.read().await;
        let mut items: Vec<_> = progresses
            .values()
            .filter(|p| p.user_id == user_id && p.test_id == test_id)
            .cloned()
            .collect();
        items.sort_by_key(|p| p.question_number);
        Ok(items)
    }

    async fn delete_by_user_and_test(&self, user_id: &str, test_id: &str) -> AppResult<u64> {
        let mut progresses = self.progresses.write().await;
        let before = progresses.len();
        progresses.retain(|_, p| !(p.user_id == user_id && p.test_id == test_id));
        self.orders
            .write()
            .await
            .retain(|_, o| !(o.user_id == user_id && o.test_id == test_id));
        Ok((before - progresses.len()) as u64)
    }

    async fn find_order(&self, user_id: &str, test_id: &str) -> AppResult<Option<ProgressOrder>> {
        Ok(self
            .orders
            .read()
            .await
            .values()
            .find(|o| o.user_id == user_id && o.test_id == test_id)
            .cloned())
    }

    async fn insert_order(&self, order: ProgressOrder) -> AppResult<ProgressOrder> {
        self.orders
            .write()
            .await
            .insert(order.id.clone(), order.clone());
        Ok(order)
    }
}

#[derive(Default)]
pub struct InMemoryFavoriteRepository {
    favorites: Arc<RwLock<HashMap<String, Favorite>>>,
}

impl InMemoryFavoriteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavoriteRepository {
    async fn upsert(&self, favorite: Favorite) -> AppResult<Favorite> {
        self.favorites
            .write()
            .await
            .insert(favorite.id.clone(), favorite.clone());
        Ok(favorite)
    }

    async fn find(
        &self,
        user_id: &str,
        test_id: &str,
        question_number: u32,
    ) -> AppResult<Option<Favorite>> {
        let favorites = self.favorites.read().await;
        Ok(favorites
            .get(&user_question_key(user_id, test_id, question_number))
            .cloned())
    }

    async fn list_by_user_and_test(
        &self,
        user_id: &str,
        test_id: &str,
    ) -> AppResult<Vec<Favorite>> {
        let favorites = self.favorites.read().await;
        let mut items: Vec<_> = favorites
            .values()
            .filter(|f| f.user_id == user_id && f.test_id == test_id)
            .cloned()
            .collect();
        items.sort_by_key(|f| f.question_number);
        Ok(items)
    }
}

struct PendingMessage {
    message: QueueMessage,
    visible_at: Instant,
}

/// Queue with the same visibility semantics as the MongoDB queue.
#[derive(Default)]
pub struct InMemoryMessageQueue {
    queues: Arc<RwLock<HashMap<String, VecDeque<PendingMessage>>>>,
    next_id: Arc<RwLock<u64>>,
}

impl InMemoryMessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self, queue: &str) -> usize {
        self.queues.read().await.get(queue).map_or(0, VecDeque::len)
    }

    /// Bodies of every message on `queue`, visible or not.
    pub async fn bodies(&self, queue: &str) -> Vec<String> {
        self.queues
            .read()
            .await
            .get(queue)
            .map(|messages| messages.iter().map(|p| p.message.body.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MessageQueue for InMemoryMessageQueue {
    async fn send(&self, queue: &str, body: String) -> AppResult<()> {
        let id = {
            let mut next_id = self.next_id.write().await;
            *next_id += 1;
            format!("msg-{}", *next_id)
        };

        self.queues
            .write()
            .await
            .entry(queue.to_string())
            .or_default()
            .push_back(PendingMessage {
                message: QueueMessage {
                    id,
                    body,
                    dequeue_count: 0,
                },
                visible_at: Instant::now(),
            });
        Ok(())
    }

    async fn receive(
        &self,
        queue: &str,
        visibility_timeout: Duration,
    ) -> AppResult<Option<QueueMessage>> {
        let now = Instant::now();
        let mut queues = self.queues.write().await;

        let Some(pending) = queues
            .get_mut(queue)
            .and_then(|messages| messages.iter_mut().find(|p| p.visible_at <= now))
        else {
            return Ok(None);
        };

        pending.visible_at = now + visibility_timeout;
        pending.message.dequeue_count += 1;
        Ok(Some(pending.message.clone()))
    }

    async fn delete(&self, queue: &str, message_id: &str) -> AppResult<()> {
        if let Some(messages) = self.queues.write().await.get_mut(queue) {
            messages.retain(|p| p.message.id != message_id);
        }
        Ok(())
    }
}

/// Every in-memory store, kept around so tests can inspect what the
/// application wrote.
#[derive(Default)]
pub struct InMemoryStores {
    pub questions: Arc<InMemoryQuestionRepository>,
    pub answers: Arc<InMemoryAnswerRepository>,
    pub communities: Arc<InMemoryCommunityRepository>,
    pub tests: Arc<InMemoryTestRepository>,
    pub progresses: Arc<InMemoryProgressRepository>,
    pub favorites: Arc<InMemoryFavoriteRepository>,
    pub queue: Arc<InMemoryMessageQueue>,
}

impl InMemoryStores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn app_state(&self, model: impl LanguageModel + 'static) -> AppState {
        let repositories = Repositories {
            questions: self.questions.clone(),
            answers: self.answers.clone(),
            communities: self.communities.clone(),
            tests: self.tests.clone(),
            progresses: self.progresses.clone(),
            favorites: self.favorites.clone(),
        };

        AppState::from_parts(
            Config::test_config(),
            repositories,
            Arc::new(model),
            self.queue.clone(),
        )
    }
}

#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{Discussion, Question, Test};

    pub fn text_question(test_id: &str, number: u32) -> Question {
        Question::new(
            test_id,
            number,
            vec!["Which service stores objects?".to_string()],
            vec![
                Some("Amazon S3".to_string()),
                Some("Amazon EC2".to_string()),
                Some("Amazon VPC".to_string()),
            ],
            1,
        )
    }

    pub fn discussed_question(test_id: &str, number: u32) -> Question {
        let mut question = text_question(test_id, number);
        question.discussions = Some(vec![
            Discussion {
                comment: "S3 is object storage".to_string(),
                upvoted_num: 10,
                selected_answer: Some("A".to_string()),
            },
            Discussion {
                comment: "A for sure".to_string(),
                upvoted_num: 2,
                selected_answer: Some("A".to_string()),
            },
            Discussion {
                comment: "I think B".to_string(),
                upvoted_num: 0,
                selected_answer: Some("B".to_string()),
            },
        ]);
        question
    }

    pub fn test(id: &str, course_name: &str, test_name: &str) -> Test {
        Test {
            id: id.to_string(),
            course_name: course_name.to_string(),
            test_name: test_name.to_string(),
            length: 65,
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queue_hides_claimed_messages_until_timeout() {
        let queue = InMemoryMessageQueue::new();
        queue.send("q", "a".to_string()).await.unwrap();

        let first = queue
            .receive("q", Duration::from_secs(60))
            .await
            .unwrap()
            .expect("message visible");
        assert_eq!(first.dequeue_count, 1);
        assert!(queue
            .receive("q", Duration::from_secs(60))
            .await
            .unwrap()
            .is_none());

        queue.delete("q", &first.id).await.unwrap();
        assert_eq!(queue.len("q").await, 0);
    }

    #[tokio::test]
    async fn queue_redelivers_after_zero_timeout() {
        let queue = InMemoryMessageQueue::new();
        queue.send("q", "a".to_string()).await.unwrap();

        queue.receive("q", Duration::ZERO).await.unwrap();
        let second = queue
            .receive("q", Duration::ZERO)
            .await
            .unwrap()
            .expect("message visible again");

        assert_eq!(second.dequeue_count, 2);
    }

    #[tokio::test]
    async fn progress_delete_only_touches_user_and_test() {
        let repo = InMemoryProgressRepository::new();
        for (user, test) in [("u1", "t1"), ("u1", "t2"), ("u2", "t1")] {
            repo.upsert(Progress {
                id: Progress::key(user, test, 1),
                user_id: user.to_string(),
                test_id: test.to_string(),
                question_number: 1,
                is_correct: true,
                choice_sentences: vec![],
                choice_imgs: vec![],
                choice_translations: None,
                selected_idxes: vec![0],
                correct_idxes: vec![0],
                updated_at: None,
            })
            .await
            .unwrap();
        }

        assert_eq!(repo.delete_by_user_and_test("u1", "t1").await.unwrap(), 1);
        assert!(repo.list_by_user_and_test("u1", "t1").await.unwrap().is_empty());
        assert_eq!(repo.list_by_user_and_test("u1", "t2").await.unwrap().len(), 1);
        assert_eq!(repo.list_by_user_and_test("u2", "t1").await.unwrap().len(), 1);
    }
}
