use actix_web::{get, post, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, handlers::parse_question_number};

#[get("/api/tests/{test_id}/answers/{question_number}")]
pub async fn get_answer(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (test_id, raw_number) = path.into_inner();
    let question_number = parse_question_number(&raw_number)?;

    let answer = state
        .answer_service
        .get_answer(&test_id, question_number)
        .await?;
    Ok(HttpResponse::Ok().json(answer))
}

#[post("/api/tests/{test_id}/answers/{question_number}")]
pub async fn generate_answer(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (test_id, raw_number) = path.into_inner();
    let question_number = parse_question_number(&raw_number)?;

    let answer = state
        .answer_service
        .generate_answer(&test_id, question_number)
        .await?;
    Ok(HttpResponse::Ok().json(answer))
}
