use actix_web::{error, web, HttpRequest, HttpResponse, Responder};
use log::warn;
use serde_json::json;

use crate::error::GenerationError;
use crate::web::models::{ErrorBody, GenerationRequest};
use crate::web::AppState;

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

// Generation endpoint
pub async fn generate(
    data: web::Data<AppState>,
    req: web::Json<GenerationRequest>,
) -> Result<HttpResponse, GenerationError> {
    let result = data.service.generate(&req).await?;
    Ok(HttpResponse::Ok().json(result))
}

// Malformed bodies (missing prompt, wrong types) never reach the runtime
pub fn json_error_handler(err: error::JsonPayloadError, req: &HttpRequest) -> error::Error {
    warn!("Rejected request body for {}: {}", req.path(), err);

    let detail = err.to_string();
    let response = HttpResponse::UnprocessableEntity().json(ErrorBody { detail });
    error::InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::tests::FakeRuntime;
    use crate::service::GenerationService;
    use crate::web::models::GenerationResult;
    use crate::web::routes;
    use actix_web::{http::StatusCode, test, App};
    use std::sync::Arc;

    fn state(runtime: Arc<FakeRuntime>) -> web::Data<AppState> {
        web::Data::new(AppState {
            service: GenerationService::new(runtime),
        })
    }

    #[actix_web::test]
    async fn generate_returns_deduplicated_text() {
        let runtime = Arc::new(FakeRuntime::replying("Yes. Yes. No."));
        let app = test::init_service(
            App::new()
                .app_data(state(runtime.clone()))
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(json!({ "prompt": "Well?" }))
            .to_request();
        let body: GenerationResult = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.response, "Yes. No.");
        let calls = runtime.calls.lock().unwrap();
        assert_eq!(calls[0].0, "deepseek-r1:7b");
        assert_eq!(calls[0].2.max_tokens, 512);
    }

    #[actix_web::test]
    async fn runtime_failure_maps_to_500_with_detail() {
        let runtime = Arc::new(FakeRuntime::failing("model 'ghost' not found"));
        let app = test::init_service(
            App::new()
                .app_data(state(runtime))
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(json!({ "prompt": "hi", "model": "ghost" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.detail, "model 'ghost' not found");
    }

    #[actix_web::test]
    async fn missing_prompt_is_rejected_before_runtime() {
        let runtime = Arc::new(FakeRuntime::replying("unused"));
        let app = test::init_service(
            App::new()
                .app_data(state(runtime.clone()))
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(json!({ "model": "llama2", "max_tokens": 64 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(runtime.calls.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn health_check_reports_ok() {
        let app = test::init_service(App::new().configure(routes::configure)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
    }

    #[actix_web::test]
    async fn cross_origin_requests_are_allowed() {
        let runtime = Arc::new(FakeRuntime::replying("ok"));
        let app = test::init_service(
            App::new()
                .wrap(routes::cors())
                .app_data(state(runtime))
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .insert_header(("Origin", "http://localhost:8501"))
            .set_json(json!({ "prompt": "hi" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp
            .headers()
            .contains_key("access-control-allow-origin"));
    }
}
