use actix_web::{get, post, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, handlers::parse_question_number};

#[get("/api/tests/{test_id}/communities/{question_number}")]
pub async fn get_community(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (test_id, raw_number) = path.into_inner();
    let question_number = parse_question_number(&raw_number)?;

    let community = state
        .community_service
        .get_community(&test_id, question_number)
        .await?;
    Ok(HttpResponse::Ok().json(community))
}

#[post("/api/tests/{test_id}/communities/{question_number}")]
pub async fn generate_community(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (test_id, raw_number) = path.into_inner();
    let question_number = parse_question_number(&raw_number)?;

    let community = state
        .community_service
        .generate_community(&test_id, question_number)
        .await?;
    Ok(HttpResponse::Ok().json(community))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::{json, Value};

    use crate::handlers::configure;
    use crate::llm::MockLanguageModel;
    use crate::test_utils::{fixtures, InMemoryStores};

    #[actix_web::test]
    async fn test_post_community_summarizes() {
        let stores = InMemoryStores::new();
        stores.questions.insert(fixtures::discussed_question("aws", 2)).await;
        let mut model = MockLanguageModel::new();
        model
            .expect_complete_text()
            .times(1)
            .returning(|_| Ok(Some("Most users pick S3.".to_string())));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(stores.app_state(model)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/tests/aws/communities/2")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "isExisted": true,
                "discussionsSummary": "Most users pick S3.",
                "votes": ["A (67%)", "B (33%)"]
            })
        );
        assert_eq!(stores.queue.len("communities").await, 1);
    }

    #[actix_web::test]
    async fn test_get_community_not_generated_yet() {
        let stores = InMemoryStores::new();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(stores.app_state(MockLanguageModel::new())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/tests/aws/communities/2")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, json!({ "isExisted": false }));
    }
}
