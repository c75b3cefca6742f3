use actix_web::{get, post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    handlers::{parse_question_number, user_id_from},
    models::dto::request::UpsertFavoriteRequest,
};

#[get("/api/tests/{test_id}/favorites")]
pub async fn list_favorites(
    req: HttpRequest,
    state: web::Data<AppState>,
    test_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = user_id_from(&req)?;

    let favorites = state
        .favorite_service
        .list_favorites(&user_id, &test_id)
        .await?;
    Ok(HttpResponse::Ok().json(favorites))
}

#[get("/api/tests/{test_id}/favorites/{question_number}")]
pub async fn get_favorite(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let user_id = user_id_from(&req)?;
    let (test_id, raw_number) = path.into_inner();
    let question_number = parse_question_number(&raw_number)?;

    let favorite = state
        .favorite_service
        .get_favorite(&user_id, &test_id, question_number)
        .await?;
    Ok(HttpResponse::Ok().json(favorite))
}

#[post("/api/tests/{test_id}/favorites/{question_number}")]
pub async fn set_favorite(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    request: web::Json<UpsertFavoriteRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = user_id_from(&req)?;
    let (test_id, raw_number) = path.into_inner();
    let question_number = parse_question_number(&raw_number)?;

    state
        .favorite_service
        .set_favorite(&user_id, &test_id, question_number, request.is_favorite)
        .await?;
    Ok(HttpResponse::Ok().body("OK"))
}
