use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, handlers::parse_question_number};

#[get("/api/tests")]
pub async fn list_tests(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let tests = state.test_service.list_by_course().await?;
    Ok(HttpResponse::Ok().json(tests))
}

#[get("/api/tests/{test_id}")]
pub async fn get_test(
    state: web::Data<AppState>,
    test_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let test = state.test_service.get_test(&test_id).await?;
    Ok(HttpResponse::Ok().json(test))
}

#[get("/api/tests/{test_id}/questions/{question_number}")]
pub async fn get_question(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (test_id, raw_number) = path.into_inner();
    let question_number = parse_question_number(&raw_number)?;

    let question = state
        .question_service
        .get_question(&test_id, question_number)
        .await?;
    Ok(HttpResponse::Ok().json(question))
}
