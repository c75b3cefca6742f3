pub mod answer_handler;
pub mod community_handler;
pub mod favorite_handler;
pub mod health_handler;
pub mod progress_handler;
pub mod test_handler;

use actix_web::{web, HttpRequest};

use crate::errors::{AppError, AppResult};

pub const USER_ID_HEADER: &str = "X-User-Id";

/// Registers every route of the API.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_handler::health_check)
        .service(test_handler::list_tests)
        .service(test_handler::get_test)
        .service(test_handler::get_question)
        .service(answer_handler::get_answer)
        .service(answer_handler::generate_answer)
        .service(community_handler::get_community)
        .service(community_handler::generate_community)
        .service(progress_handler::list_progresses)
        .service(progress_handler::create_progress_order)
        .service(progress_handler::upsert_progress)
        .service(progress_handler::delete_progresses)
        .service(favorite_handler::list_favorites)
        .service(favorite_handler::get_favorite)
        .service(favorite_handler::set_favorite);
}

/// Question numbers in paths must be plain digits.
pub fn parse_question_number(raw: &str) -> AppResult<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::ValidationError(format!(
            "Invalid questionNumber: {}",
            raw
        )));
    }

    raw.parse()
        .map_err(|_| AppError::ValidationError(format!("Invalid questionNumber: {}", raw)))
}

pub fn user_id_from(req: &HttpRequest) -> AppResult<String> {
    req.headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::ValidationError(format!("{} header is Empty", USER_ID_HEADER)))
}
