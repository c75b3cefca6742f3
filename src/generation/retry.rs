use std::future::Future;

use thiserror::Error;

use crate::llm::LlmError;

/// Result of a bounded generation loop. `Exhausted` is a normal outcome, not
/// an error: the caller decides how to surface it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Generation<T> {
    Success(T),
    Exhausted { attempts: u32 },
}

impl<T> Generation<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Generation::Success(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Generation::Success(value) => Some(value),
            Generation::Exhausted { .. } => None,
        }
    }
}

/// Why a single attempt did not produce a usable result.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Model(#[from] LlmError),

    #[error("model returned no content")]
    Empty,

    #[error("model output rejected: {0}")]
    Invalid(String),
}

/// Runs `attempt` sequentially until it succeeds or `max_attempts` have been
/// made. Attempts are numbered from 1.
pub async fn retry_bounded<T, F, Fut>(label: &str, max_attempts: u32, mut attempt: F) -> Generation<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
{
    for number in 1..=max_attempts {
        log::info!("{}: attempt {}/{}", label, number, max_attempts);

        match attempt(number).await {
            Ok(value) => return Generation::Success(value),
            Err(err) => log::warn!(
                "{}: attempt {}/{} failed: {}",
                label,
                number,
                max_attempts,
                err
            ),
        }
    }

    log::error!("{}: gave up after {} attempts", label, max_attempts);
    Generation::Exhausted {
        attempts: max_attempts,
    }
}
