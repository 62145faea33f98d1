use serde::{Deserialize, Serialize};

/// Business task category. Each one has its own prompt and UI copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    Support,
    Marketing,
    Data,
    Ops,
}

impl Mode {
    /// Navigation order.
    pub const ALL: [Mode; 4] = [Mode::Support, Mode::Marketing, Mode::Data, Mode::Ops];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Support => "SUPPORT",
            Mode::Marketing => "MARKETING",
            Mode::Data => "DATA",
            Mode::Ops => "OPS",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon reference shown next to a mode. The browser maps each to a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Icon {
    MessageSquareHeart,
    Megaphone,
    BarChart3,
    ClipboardList,
}

/// Static per-mode configuration. The system instruction stays server-side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeConfig {
    pub id: Mode,
    pub label: &'static str,
    pub icon: Icon,
    pub description: &'static str,
    pub placeholder: &'static str,
    #[serde(skip)]
    pub system_instruction: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Structured report produced by one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataAnalysisResult {
    pub summary: String,
    pub insights: Vec<String>,
    pub chart_data: Vec<ChartPoint>,
    pub recommendation: String,
}

// ── API payloads ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub mode: Mode,
    #[serde(default)]
    pub prompt: String,
    /// Data URL (`data:<mime>;base64,<payload>`).
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: Option<DataAnalysisResult>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
