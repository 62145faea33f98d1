use tracing::info;

use crate::errors::AppError;
use crate::gateway::GeminiGateway;
use crate::models::{AnalyzeRequest, AnalyzeResponse, GenerateRequest, GenerateResponse};
use crate::modes;

const MAX_PROMPT_LENGTH: usize = 32_000;
const MAX_DATA_LENGTH: usize = 200_000;
/// Inline image payloads are capped just under the provider's 20 MB request limit.
const MAX_IMAGE_LENGTH: usize = 19 * 1024 * 1024;

#[derive(Clone)]
pub struct AssistantService {
    gateway: GeminiGateway,
}

impl AssistantService {
    pub fn new(gateway: GeminiGateway) -> Self {
        Self { gateway }
    }

    /// Answers a chat prompt using the mode's system instruction.
    pub async fn reply(&self, request: GenerateRequest) -> Result<GenerateResponse, AppError> {
        let image = request.image.as_deref().filter(|img| !img.trim().is_empty());

        // ── Validation ────────────────────────────────────────────────────────
        if request.prompt.trim().is_empty() && image.is_none() {
            return Err(AppError::empty_field("prompt"));
        }
        check_length("prompt", &request.prompt, MAX_PROMPT_LENGTH)?;
        if let Some(image) = image {
            check_length("image", image, MAX_IMAGE_LENGTH)?;
        }

        // ── Call the model ────────────────────────────────────────────────────
        let config = modes::lookup(request.mode);
        info!(
            mode = %request.mode,
            prompt_chars = request.prompt.chars().count(),
            has_image = image.is_some(),
            "Generating reply"
        );
        let text = self
            .gateway
            .generate_reply(&request.prompt, config.system_instruction, image)
            .await;

        Ok(GenerateResponse { text })
    }

    /// Produces a structured report for pasted data.
    pub async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalyzeResponse, AppError> {
        if request.data.trim().is_empty() {
            return Err(AppError::empty_field("data"));
        }
        check_length("data", &request.data, MAX_DATA_LENGTH)?;

        info!(data_chars = request.data.chars().count(), "Analyzing data");
        let result = self.gateway.analyze_data(&request.data).await;
        if result.is_none() {
            info!("Analysis produced no report");
        }

        Ok(AnalyzeResponse { result })
    }
}

fn check_length(field_name: &str, value: &str, max_length: usize) -> Result<(), AppError> {
    let actual_length = value.chars().count();
    if actual_length > max_length {
        return Err(AppError::FieldTooLong {
            field_name: field_name.to_string(),
            max_length,
            actual_length,
        });
    }
    Ok(())
}
