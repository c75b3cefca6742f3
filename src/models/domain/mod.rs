pub mod answer;
pub mod community;
pub mod favorite;
pub mod progress;
pub mod question;

pub use answer::{Answer, CorrectAnswers};
pub use community::Community;
pub use favorite::Favorite;
pub use progress::{Progress, ProgressOrder};
pub use question::{Discussion, EscapeTranslatedIdxes, Question};
pub use test::Test;

/// Document id shared by every per-question record: `"{testId}_{questionNumber}"`.
pub fn question_key(test_id: &str, question_number: u32) -> String {
    format!("{}_{}", test_id, question_number)
}

/// Document id for per-user, per-test records.
pub fn user_test_key(user_id: &str, test_id: &str) -> String {
    format!("{}_{}", user_id, test_id)
}

/// Document id for per-user, per-question records.
pub fn user_question_key(user_id: &str, test_id: &str, question_number: u32) -> String {
    format!("{}_{}_{}", user_id, test_id, question_number)
}
