use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use crate::errors::AppError;
use crate::models::{AnalyzeRequest, ErrorBody, GenerateRequest, ModeConfig};
use crate::modes;
use crate::service::assistant_service::AssistantService;

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET `/api/modes` — the mode registry, in navigation order
pub async fn list_modes_handler() -> Json<Vec<&'static ModeConfig>> {
    Json(modes::all().collect())
}

/// POST `/api/generate` — one chat turn for the given mode
pub async fn generate_handler(
    State(svc): State<AssistantService>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    match svc.reply(request).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

/// POST `/api/analyze` — structured report for pasted data
pub async fn analyze_handler(
    State(svc): State<AssistantService>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    match svc.analyze(request).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

// ── Helper ────────────────────────────────────────────────────────────────────

/// Provider failures never get here: the gateway turns them into reply text
/// or an absent report, so only validation and internal errors remain.
fn error_response(err: &AppError) -> Response {
    let status = if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    warn!(%status, "Request rejected: {err}");

    (status, Json(ErrorBody { error: err.to_string() })).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::routes::router;
    use crate::gateway::PROVIDER_ERROR_REPLY;
    use crate::test_support::{gateway_for, model_reply, MockProvider};

    async fn app_with_reply(text: &str) -> (Router, MockProvider) {
        let provider = MockProvider::start(StatusCode::OK, model_reply(text)).await;
        let app = router(AssistantService::new(gateway_for(&provider.base_url)));
        (app, provider)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn modes_are_listed_without_instructions() {
        let (app, _provider) = app_with_reply("unused").await;

        let response = app
            .oneshot(Request::get("/api/modes").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let modes = read_json(response).await;
        let ids: Vec<&str> = modes
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["SUPPORT", "MARKETING", "DATA", "OPS"]);
        assert_eq!(modes[2]["label"], "Data Analysis");
        assert!(modes[0].get("systemInstruction").is_none());
    }

    #[tokio::test]
    async fn generate_returns_reply_text() {
        let (app, _provider) = app_with_reply("Here is your post").await;

        let response = app
            .oneshot(post_json(
                "/api/generate",
                json!({ "mode": "MARKETING", "prompt": "Coffee launch post" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, json!({ "text": "Here is your post" }));
    }

    #[tokio::test]
    async fn empty_prompt_is_bad_request() {
        let (app, provider) = app_with_reply("unused").await;

        let response = app
            .oneshot(post_json("/api/generate", json!({ "mode": "SUPPORT", "prompt": " " })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"], "Field 'prompt' cannot be empty");
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn unknown_mode_is_rejected_by_the_extractor() {
        let (app, _provider) = app_with_reply("unused").await;

        let response = app
            .oneshot(post_json("/api/generate", json!({ "mode": "LEGAL", "prompt": "hi" })))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn malformed_analysis_returns_null_result() {
        let (app, _provider) = app_with_reply("definitely not json").await;

        let response = app
            .oneshot(post_json("/api/analyze", json!({ "data": "1,2,3" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, json!({ "result": null }));
    }

    #[tokio::test]
    async fn analysis_report_is_returned() {
        let report = json!({
            "summary": "Flat",
            "insights": [],
            "chartData": [{"label": "A", "value": 1}, {"label": "B", "value": 2}],
            "recommendation": "Wait"
        });
        let (app, _provider) = app_with_reply(&report.to_string()).await;

        let response = app
            .oneshot(post_json("/api/analyze", json!({ "data": "A,1\nB,2" })))
            .await
            .unwrap();

        let body = read_json(response).await;
        assert_eq!(body["result"]["chartData"][1]["label"], "B");
        assert_eq!(body["result"]["summary"], "Flat");
    }

    #[tokio::test]
    async fn provider_rejection_is_still_a_reply() {
        let provider =
            MockProvider::start(StatusCode::FORBIDDEN, json!({ "error": { "code": 403 } })).await;
        let app = router(AssistantService::new(gateway_for(&provider.base_url)));

        let response = app
            .oneshot(post_json("/api/generate", json!({ "mode": "OPS", "prompt": "Plan Q3" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, json!({ "text": PROVIDER_ERROR_REPLY }));
    }

    #[tokio::test]
    async fn non_validation_errors_are_internal() {
        let response = error_response(&AppError::Unexpected("boom".into()));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read_json(response).await, json!({ "error": "Unexpected error: boom" }));
    }

    #[tokio::test]
    async fn validation_errors_are_bad_requests() {
        let response = error_response(&AppError::empty_field("data"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
