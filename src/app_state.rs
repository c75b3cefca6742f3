use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    generation::{AnswerGenerator, DiscussionSummarizer},
    llm::{LanguageModel, OpenAiModel},
    models::message::{AnswerMessage, CommunityMessage},
    queue::{MessagePublisher, MessageQueue, MongoMessageQueue, QueueWorker},
    repositories::{
        AnswerRepository, CommunityRepository, FavoriteRepository, MongoAnswerRepository,
        MongoCommunityRepository, MongoFavoriteRepository, MongoProgressRepository,
        MongoQuestionRepository, MongoTestRepository, ProgressRepository, QuestionRepository,
        TestRepository,
    },
    services::{
        AnswerService, CommunityService, FavoriteService, ProgressService, QuestionService,
        TestService,
    },
    write_back::WriteBackConsumer,
};

/// Storage handles the services are built from.
#[derive(Clone)]
pub struct Repositories {
    pub questions: Arc<dyn QuestionRepository>,
    pub answers: Arc<dyn AnswerRepository>,
    pub communities: Arc<dyn CommunityRepository>,
    pub tests: Arc<dyn TestRepository>,
    pub progresses: Arc<dyn ProgressRepository>,
    pub favorites: Arc<dyn FavoriteRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub test_service: Arc<TestService>,
    pub question_service: Arc<QuestionService>,
    pub answer_service: Arc<AnswerService>,
    pub community_service: Arc<CommunityService>,
    pub progress_service: Arc<ProgressService>,
    pub favorite_service: Arc<FavoriteService>,
    pub answer_worker: QueueWorker<AnswerMessage>,
    pub community_worker: QueueWorker<CommunityMessage>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let questions = Arc::new(MongoQuestionRepository::new(&db));
        questions.ensure_indexes().await?;
        let answers = Arc::new(MongoAnswerRepository::new(&db));
        answers.ensure_indexes().await?;
        let communities = Arc::new(MongoCommunityRepository::new(&db));
        communities.ensure_indexes().await?;
        let progresses = Arc::new(MongoProgressRepository::new(&db));
        progresses.ensure_indexes().await?;
        let favorites = Arc::new(MongoFavoriteRepository::new(&db));
        favorites.ensure_indexes().await?;
        let tests = Arc::new(MongoTestRepository::new(&db));

        let queue = Arc::new(MongoMessageQueue::new(&db));
        queue.ensure_indexes().await?;

        let model = Arc::new(OpenAiModel::new(&config));

        let repositories = Repositories {
            questions,
            answers,
            communities,
            tests,
            progresses,
            favorites,
        };

        Ok(Self::from_parts(config, repositories, model, queue))
    }

    /// Wires services and queue workers from already constructed parts.
    pub fn from_parts(
        config: Config,
        repositories: Repositories,
        model: Arc<dyn LanguageModel>,
        queue: Arc<dyn MessageQueue>,
    ) -> Self {
        let publisher = MessagePublisher::new(queue.clone(), &config.queue);

        let answer_service = AnswerService::new(
            repositories.questions.clone(),
            repositories.answers.clone(),
            repositories.tests.clone(),
            AnswerGenerator::new(model.clone(), &config.generation),
            publisher.clone(),
        );
        let community_service = CommunityService::new(
            repositories.questions.clone(),
            repositories.communities.clone(),
            DiscussionSummarizer::new(model, &config.generation),
            publisher,
        );

        let consumer = Arc::new(WriteBackConsumer::new(
            repositories.questions.clone(),
            repositories.answers.clone(),
            repositories.communities.clone(),
        ));
        let answer_worker = QueueWorker::<AnswerMessage>::new(
            config.queue.answer_queue_name.clone(),
            queue.clone(),
            consumer.clone(),
            &config.queue,
        );
        let community_worker = QueueWorker::<CommunityMessage>::new(
            config.queue.community_queue_name.clone(),
            queue,
            consumer,
            &config.queue,
        );

        Self {
            test_service: Arc::new(TestService::new(repositories.tests)),
            question_service: Arc::new(QuestionService::new(repositories.questions)),
            answer_service: Arc::new(answer_service),
            community_service: Arc::new(community_service),
            progress_service: Arc::new(ProgressService::new(repositories.progresses)),
            favorite_service: Arc::new(FavoriteService::new(repositories.favorites)),
            answer_worker,
            community_worker,
            config: Arc::new(config),
        }
    }

    pub async fn start_workers(&self) {
        self.answer_worker.start().await;
        self.community_worker.start().await;
    }

    pub async fn stop_workers(&self) {
        self.answer_worker.stop().await;
        self.community_worker.stop().await;
    }
}
