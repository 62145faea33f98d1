mod image;
pub mod wire;

use reqwest::Client;
use tracing::{debug, error, warn};

use crate::config::GatewayConfig;
use crate::errors::AppError;
use crate::models::DataAnalysisResult;

use self::image::inline_data_from_data_url;
use self::wire::{
    analysis_schema, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    Part,
};

/// Returned when the model produced no text.
pub const EMPTY_REPLY_FALLBACK: &str = "I couldn't generate a response. Please try again.";
/// Returned when the provider could not be reached or rejected the call.
pub const PROVIDER_ERROR_REPLY: &str = "Error connecting to AI service. Please check your API key.";

const REPLY_TEMPERATURE: f32 = 0.7;
const ANALYST_INSTRUCTION: &str = "You are a Data Analyst. Output JSON with a summary, key insights, \
                                   chartable data points (label/value), and a strategic recommendation.";
const MAX_ERROR_BODY: usize = 800;

/// Single-attempt client for the Gemini `generateContent` endpoint.
///
/// The public operations never fail: provider errors are logged and collapsed
/// into a fallback reply or an absent analysis.
#[derive(Clone)]
pub struct GeminiGateway {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Unexpected(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generates a free-text reply to `prompt`, optionally grounded on an image
    /// given as a data URL.
    pub async fn generate_reply(
        &self,
        prompt: &str,
        system_instruction: &str,
        image: Option<&str>,
    ) -> String {
        match self.try_generate_reply(prompt, system_instruction, image).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                warn!(model = %self.model, "Model returned an empty reply");
                EMPTY_REPLY_FALLBACK.to_string()
            }
            Err(e) => {
                error!(model = %self.model, "Reply generation failed: {e}");
                PROVIDER_ERROR_REPLY.to_string()
            }
        }
    }

    /// Asks the model for a structured report on `raw_data`. `None` when the
    /// provider fails or its output does not match the report shape.
    pub async fn analyze_data(&self, raw_data: &str) -> Option<DataAnalysisResult> {
        match self.try_analyze_data(raw_data).await {
            Ok(result) => result,
            Err(e) => {
                error!(model = %self.model, "Data analysis failed: {e}");
                None
            }
        }
    }

    async fn try_generate_reply(
        &self,
        prompt: &str,
        system_instruction: &str,
        image: Option<&str>,
    ) -> Result<Option<String>, AppError> {
        let mut parts = Vec::with_capacity(2);
        if let Some(image) = image {
            parts.push(Part::InlineData(inline_data_from_data_url(image)));
        }
        parts.push(Part::Text(prompt.to_string()));

        let request = GenerateContentRequest {
            contents: vec![Content::user(parts)],
            system_instruction: Some(Content::instruction(system_instruction)),
            generation_config: GenerationConfig {
                temperature: Some(REPLY_TEMPERATURE),
                ..Default::default()
            },
        };

        Ok(self.generate_content(&request).await?.text())
    }

    async fn try_analyze_data(
        &self,
        raw_data: &str,
    ) -> Result<Option<DataAnalysisResult>, AppError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::Text(format!(
                "Analyze this data and provide insights: {raw_data}"
            ))])],
            system_instruction: Some(Content::instruction(ANALYST_INSTRUCTION)),
            generation_config: GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(analysis_schema()),
                ..Default::default()
            },
        };

        let Some(json) = self.generate_content(&request).await?.text() else {
            warn!(model = %self.model, "Model returned no analysis payload");
            return Ok(None);
        };

        serde_json::from_str::<DataAnalysisResult>(&json)
            .map(Some)
            .map_err(|e| AppError::MalformedOutput {
                message: format!("analysis payload is not a report: {e}"),
            })
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AppError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        debug!(%url, "Calling model provider");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::ProviderUnavailable {
                host: self.base_url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ProviderStatus {
                status: status.as_u16(),
                body: truncate(body.trim(), MAX_ERROR_BODY),
            });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| AppError::MalformedOutput { message: e.to_string() })
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
