pub mod answer_repository;
pub mod community_repository;
pub mod favorite_repository;
pub mod progress_repository;
pub mod question_repository;
pub mod test_repository;

pub use answer_repository::{AnswerRepository, MongoAnswerRepository};
pub use community_repository::{CommunityRepository, MongoCommunityRepository};
pub use favorite_repository::{FavoriteRepository, MongoFavoriteRepository};
pub use progress_repository::{MongoProgressRepository, ProgressRepository};
pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use test_repository::{MongoTestRepository, TestRepository};
