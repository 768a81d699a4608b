// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that forbids chatter around the answer.
pub const PLAIN_LIST_SYSTEM: &str = "You are a precise, structured assistant. \
    Respond with the requested list only. \
    Do NOT use markdown code fences. \
    Do NOT include explanations, headings or apologies.";
