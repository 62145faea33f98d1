use gloo_net::http::Request;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::conversation::ReplyRequest;
use crate::models::{
    AnalyzeRequest, AnalyzeResponse, DataAnalysisResult, GenerateRequest, GenerateResponse,
    ModeConfig,
};

/// Base URL of the backend API server. Empty means same origin.
const API_BASE: &str = match option_env!("BIZG_API_BASE") {
    Some(base) => base,
    None => "",
};

/// Shown in the chat when the backend itself could not be reached.
pub const BACKEND_UNREACHABLE_REPLY: &str =
    "Could not reach the BizG server. Please check your connection and try again.";

/// Shown in the chat when the backend refused the message, e.g. an oversized image.
pub const REQUEST_REJECTED_REPLY: &str =
    "The BizG server rejected this message. Try a shorter message or a smaller image.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server error: {status} {detail}")]
    Status { status: u16, detail: String },
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// The chat text standing in for the reply this error prevented.
    pub fn reply_text(&self) -> &'static str {
        match self {
            ApiError::Status { status: 400..=499, .. } => REQUEST_REJECTED_REPLY,
            _ => BACKEND_UNREACHABLE_REPLY,
        }
    }
}

/// Fetches the mode registry.
pub async fn fetch_modes() -> Result<Vec<ModeConfig>, ApiError> {
    let resp = Request::get(&format!("{API_BASE}/api/modes"))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !resp.ok() {
        return Err(ApiError::Status { status: resp.status(), detail: String::new() });
    }

    resp.json::<Vec<ModeConfig>>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Asks for the assistant's reply. Never fails: transport problems and
/// rejected requests become a reply text so the conversation can carry on.
pub async fn generate_reply(request: &ReplyRequest) -> String {
    let body = GenerateRequest {
        mode: request.mode,
        prompt: request.prompt.clone(),
        image: request.image.clone(),
    };

    match post_json::<_, GenerateResponse>("/api/generate", &body).await {
        Ok(response) => response.text,
        Err(e) => {
            log::error!("Reply request failed: {e}");
            e.reply_text().to_string()
        }
    }
}

/// Requests a structured report. Any failure is `None`.
pub async fn analyze_data(data: String) -> Option<DataAnalysisResult> {
    match post_json::<_, AnalyzeResponse>("/api/analyze", &AnalyzeRequest { data }).await {
        Ok(response) => response.result,
        Err(e) => {
            log::error!("Analysis request failed: {e}");
            None
        }
    }
}

async fn post_json<B: Serialize, R: DeserializeOwned>(path: &str, body: &B) -> Result<R, ApiError> {
    let resp = Request::post(&format!("{API_BASE}{path}"))
        .json(body)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !resp.ok() {
        let detail = resp.text().await.unwrap_or_default();
        return Err(ApiError::Status { status: resp.status(), detail });
    }

    resp.json::<R>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> ApiError {
        ApiError::Status { status: code, detail: String::new() }
    }

    #[test]
    fn rejected_requests_get_their_own_reply() {
        assert_eq!(status(400).reply_text(), REQUEST_REJECTED_REPLY);
        assert_eq!(status(413).reply_text(), REQUEST_REJECTED_REPLY);
    }

    #[test]
    fn unreachable_backend_keeps_the_connection_reply() {
        assert_eq!(ApiError::Network("offline".into()).reply_text(), BACKEND_UNREACHABLE_REPLY);
        assert_eq!(status(500).reply_text(), BACKEND_UNREACHABLE_REPLY);
        assert_eq!(ApiError::Parse("eof".into()).reply_text(), BACKEND_UNREACHABLE_REPLY);
    }

    #[test]
    fn errors_render_for_the_banner() {
        assert_eq!(status(503).to_string(), "Server error: 503 ");
        assert_eq!(ApiError::Network("offline".into()).to_string(), "Network error: offline");
    }
}
