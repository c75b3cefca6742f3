//! Answer and community-summary generation: vote tallying, prompt assembly,
//! and the bounded retry loops around the language model.

pub mod answer_generator;
pub mod discussion_summarizer;
pub mod prompt_builder;
pub mod retry;
pub mod vote_tally;

pub use answer_generator::AnswerGenerator;
pub use discussion_summarizer::DiscussionSummarizer;
pub use retry::Generation;
