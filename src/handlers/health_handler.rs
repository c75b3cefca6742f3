use actix_web::{get, HttpResponse};

#[get("/api/healthcheck")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("Healthy")
}
