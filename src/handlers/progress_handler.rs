use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    handlers::{parse_question_number, user_id_from},
    models::dto::request::{CreateProgressOrderRequest, UpsertProgressRequest},
};

#[get("/api/tests/{test_id}/progresses")]
pub async fn list_progresses(
    req: HttpRequest,
    state: web::Data<AppState>,
    test_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = user_id_from(&req)?;

    let progresses = state
        .progress_service
        .list_progresses(&user_id, &test_id)
        .await?;
    Ok(HttpResponse::Ok().json(progresses))
}

#[post("/api/tests/{test_id}/progresses")]
pub async fn create_progress_order(
    req: HttpRequest,
    state: web::Data<AppState>,
    test_id: web::Path<String>,
    request: web::Json<CreateProgressOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = user_id_from(&req)?;

    state
        .progress_service
        .create_order(&user_id, &test_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().body("OK"))
}

#[post("/api/tests/{test_id}/progresses/{question_number}")]
pub async fn upsert_progress(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    request: web::Json<UpsertProgressRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = user_id_from(&req)?;
    let (test_id, raw_number) = path.into_inner();
    let question_number = parse_question_number(&raw_number)?;

    state
        .progress_service
        .upsert_progress(&user_id, &test_id, question_number, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().body("OK"))
}

#[delete("/api/tests/{test_id}/progresses")]
pub async fn delete_progresses(
    req: HttpRequest,
    state: web::Data<AppState>,
    test_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = user_id_from(&req)?;

    state
        .progress_service
        .delete_progresses(&user_id, &test_id)
        .await?;
    Ok(HttpResponse::Ok().body("OK"))
}
