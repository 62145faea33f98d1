use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Matches the backend `Mode` enum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    #[default]
    Support,
    Marketing,
    Data,
    Ops,
}

impl Mode {
    /// Data mode mounts the analysis view instead of the chat.
    pub fn is_analysis(self) -> bool {
        matches!(self, Mode::Data)
    }
}

/// Matches the backend `Icon` enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum Icon {
    MessageSquareHeart,
    Megaphone,
    BarChart3,
    ClipboardList,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::MessageSquareHeart => "💬",
            Icon::Megaphone => "📣",
            Icon::BarChart3 => "📊",
            Icon::ClipboardList => "📋",
        }
    }
}

/// Matches the backend `ModeConfig` as served by `/api/modes`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ModeConfig {
    pub id: Mode,
    pub label: String,
    pub icon: Icon,
    pub description: String,
    pub placeholder: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rating {
    Positive,
    Negative,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Feedback {
    pub rating: Rating,
    pub comment: Option<String>,
}

/// One bubble in the chat. Lives only in browser memory.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    /// Data URL of an attached image.
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub feedback: Option<Feedback>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Matches the backend `DataAnalysisResult`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataAnalysisResult {
    pub summary: String,
    pub insights: Vec<String>,
    pub chart_data: Vec<ChartPoint>,
    pub recommendation: String,
}

/// Request body for `/api/generate`.
#[derive(Clone, Debug, Serialize)]
pub struct GenerateRequest {
    pub mode: Mode,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GenerateResponse {
    pub text: String,
}

/// Request body for `/api/analyze`.
#[derive(Clone, Debug, Serialize)]
pub struct AnalyzeRequest {
    pub data: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AnalyzeResponse {
    pub result: Option<DataAnalysisResult>,
}
