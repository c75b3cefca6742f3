pub mod answer_service;
pub mod community_service;
pub mod favorite_service;
pub mod progress_service;
pub mod question_service;
pub mod test_service;

pub use answer_service::AnswerService;
pub use community_service::CommunityService;
pub use favorite_service::FavoriteService;
pub use progress_service::ProgressService;
pub use question_service::QuestionService;
pub use test_service::TestService;
