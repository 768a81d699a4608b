// LLM prompt constants for skill extraction.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::PLAIN_LIST_SYSTEM;

/// System prompt for skill extraction.
pub const SKILL_EXTRACTION_SYSTEM: &str = PLAIN_LIST_SYSTEM;

/// Marker the model is told to emit when the report shows no weaknesses.
pub const NO_SKILLS_MARKER: &str = "NONE";

/// Skill extraction prompt template. Replace `{report_text}` before sending.
pub const SKILL_EXTRACTION_PROMPT_TEMPLATE: &str = r#"Read the skill assessment report below and identify the 3-5 skill areas the person most needs to improve.
Focus only on areas with low scores or clearly described weaknesses.

REPORT:
{report_text}

OUTPUT RULES:
1. One skill area per line.
2. Use a short name of 1-4 words (e.g. "Communication", "Time Management").
3. No numbering, bullets, scores or explanations.
4. Most important area first.
5. If nothing needs improvement, reply with exactly NONE."#;
