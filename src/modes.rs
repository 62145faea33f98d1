//! Mode registry: compiled-in copy and system instructions for each mode.

use crate::models::{Icon, Mode, ModeConfig};

static SUPPORT: ModeConfig = ModeConfig {
    id: Mode::Support,
    label: "Customer Support",
    icon: Icon::MessageSquareHeart,
    description: "Automate responses, handle complaints, and manage tickets with empathy.",
    placeholder: "E.g., \"A customer is angry about a late delivery. Write a polite apology.\"",
    system_instruction: "You are a world-class Customer Support Agent.\n\
        Your goal is to de-escalate situations, provide clear solutions, and maintain a professional, empathetic tone.\n\
        Structure your responses with:\n\
        1. Acknowledgment of the issue.\n\
        2. A clear apology or validation.\n\
        3. Step-by-step solution or next steps.\n\
        4. A polite closing.",
};

static MARKETING: ModeConfig = ModeConfig {
    id: Mode::Marketing,
    label: "Marketing & Sales",
    icon: Icon::Megaphone,
    description: "Generate social posts, email campaigns, and ad copy.",
    placeholder: "E.g., \"Write an Instagram post for our new organic coffee blend.\"",
    system_instruction: "You are a Creative Marketing Director.\n\
        Create engaging, high-converting content.\n\
        - For social media: Use emojis, relevant hashtags, and a hook.\n\
        - For emails: Use a catchy subject line and clear CTA (Call to Action).\n\
        - Tone: Modern, energetic, and brand-aligned.",
};

static DATA: ModeConfig = ModeConfig {
    id: Mode::Data,
    label: "Data Analysis",
    icon: Icon::BarChart3,
    description: "Analyze sales figures, spot trends, and forecast growth.",
    placeholder: "Enter your raw data here (CSV format or JSON) to get insights.",
    system_instruction: "You are a Senior Data Analyst. Analyze the provided data.",
};

static OPS: ModeConfig = ModeConfig {
    id: Mode::Ops,
    label: "Operations & SOPs",
    icon: Icon::ClipboardList,
    description: "Streamline workflows, create checklists, and write guidelines.",
    placeholder: "E.g., \"Create an onboarding checklist for a new software engineer.\"",
    system_instruction: "You are an Operations Manager focused on efficiency.\n\
        Output clear, actionable Standard Operating Procedures (SOPs).\n\
        Use formatting like:\n\
        - **Goal**: What are we achieving?\n\
        - **Prerequisites**: What is needed?\n\
        - **Steps**: Numbered list of actions.\n\
        - **Success Criteria**: How do we know it is done?",
};

/// Returns the configuration for `mode`. Adding a `Mode` variant without an
/// entry here fails to compile.
pub fn lookup(mode: Mode) -> &'static ModeConfig {
    match mode {
        Mode::Support => &SUPPORT,
        Mode::Marketing => &MARKETING,
        Mode::Data => &DATA,
        Mode::Ops => &OPS,
    }
}

/// All configurations in navigation order.
pub fn all() -> impl Iterator<Item = &'static ModeConfig> {
    Mode::ALL.into_iter().map(lookup)
}
