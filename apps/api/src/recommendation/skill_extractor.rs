//! Skill Extractor: asks the LLM which skill areas a report flags as weak and
//! parses the free-text answer into a short list of skill names.
//!
//! Parsing convention (see `parse_skills`):
//! - JSON (`{"skills": [...]}` or `[...]`), fenced or with prose around it, is used as-is;
//! - otherwise the text is split on newlines and commas;
//! - enumeration markers, quotes, trailing punctuation and `: 2/10` score tails are stripped;
//! - headings (`Skills:`), blanks and `NONE`/`N/A` are dropped;
//! - case-insensitive duplicates are dropped, first one wins;
//! - at most `MAX_SKILLS` names are kept.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::llm_client::{strip_json_fences, CompletionService, LlmError};
use crate::recommendation::prompts::{
    NO_SKILLS_MARKER, SKILL_EXTRACTION_PROMPT_TEMPLATE, SKILL_EXTRACTION_SYSTEM,
};

/// Upper bound on skills per report; bounds downstream search calls.
pub const MAX_SKILLS: usize = 10;

#[derive(Debug, Error)]
pub enum SkillError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Completion service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("No skills found in report analysis")]
    NoSkillsFound,
}

/// Shapes the model sometimes answers in despite the plain-list instruction.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SkillListJson {
    Wrapped { skills: Vec<String> },
    Bare(Vec<String>),
}

#[derive(Clone)]
pub struct SkillExtractor {
    llm: Arc<dyn CompletionService>,
}

impl SkillExtractor {
    pub fn new(llm: Arc<dyn CompletionService>) -> Self {
        Self { llm }
    }

    /// One LLM call per report, no retry.
    pub async fn extract_skills(&self, report_text: &str) -> Result<Vec<String>, SkillError> {
        let report_text = report_text.trim();
        if report_text.is_empty() {
            return Err(SkillError::InvalidInput(
                "report_text cannot be empty".to_string(),
            ));
        }

        let prompt = SKILL_EXTRACTION_PROMPT_TEMPLATE.replace("{report_text}", report_text);
        let raw = match self.llm.complete(&prompt, SKILL_EXTRACTION_SYSTEM).await {
            Ok(raw) => raw,
            Err(LlmError::EmptyContent) => return Err(SkillError::NoSkillsFound),
            Err(e) => return Err(SkillError::UpstreamUnavailable(e.to_string())),
        };
        debug!("Skill extraction raw output: {raw:?}");

        let skills = parse_skills(&raw);
        if skills.is_empty() {
            return Err(SkillError::NoSkillsFound);
        }

        info!("Extracted {} skills from report", skills.len());
        Ok(skills)
    }
}

/// Lenient parser for the model's answer. See the module docs for the rules.
pub fn parse_skills(raw: &str) -> Vec<String> {
    let text = strip_json_fences(raw);

    let fragments: Vec<String> = match embedded_json_list(text) {
        Some(SkillListJson::Wrapped { skills }) | Some(SkillListJson::Bare(skills)) => skills,
        None => text
            .split(|c: char| c == '\n' || c == ',')
            .map(str::to_string)
            .collect(),
    };

    let mut seen = HashSet::new();
    fragments
        .iter()
        .filter_map(|f| clean_fragment(f))
        .filter(|skill| seen.insert(skill.to_lowercase()))
        .take(MAX_SKILLS)
        .collect()
}

/// First JSON skill list in the text, ignoring prose before or after it.
fn embedded_json_list(text: &str) -> Option<SkillListJson> {
    let start = text.find(|c: char| c == '[' || c == '{')?;
    serde_json::Deserializer::from_str(&text[start..])
        .into_iter::<SkillListJson>()
        .next()?
        .ok()
}

fn clean_fragment(fragment: &str) -> Option<String> {
    let s = strip_enumeration(fragment.trim());

    // "Skills to improve:" style headings
    if s.ends_with(':') {
        return None;
    }
    let s = strip_score_tail(s);

    // '.' only at the end: ".NET" keeps its dot.
    let s = s
        .trim_matches(is_edge_char)
        .trim_end_matches(|c: char| c == '.' || is_edge_char(c));

    if s.is_empty()
        || s.eq_ignore_ascii_case(NO_SKILLS_MARKER)
        || s.eq_ignore_ascii_case("n/a")
    {
        return None;
    }
    Some(s.to_string())
}

fn is_edge_char(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '"' | '\'' | '`' | '*' | '_' | ';' | ':' | '!' | '[' | ']' | '{' | '}'
        )
}

/// Drops `- `, `* `, `• `, `1. `, `2) ` and similar list prefixes.
fn strip_enumeration(s: &str) -> &str {
    let s = s
        .trim_start_matches(|c: char| matches!(c, '-' | '*' | '•' | '+' | '#' | '>'))
        .trim_start();

    let digits = s.len() - s.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return s;
    }
    let rest = &s[digits..];
    match rest.chars().next() {
        Some('.') | Some(')') => rest[1..].trim_start(),
        _ => s,
    }
}

/// `Communication: 1/10` → `Communication`. Other `label: text` pairs are kept whole.
fn strip_score_tail(s: &str) -> &str {
    match s.split_once(':') {
        Some((label, tail))
            if tail.contains('/')
                && tail
                    .trim()
                    .chars()
                    .all(|c| c.is_ascii_digit() || matches!(c, '/' | '.' | ' ')) =>
        {
            label
        }
        _ => s,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmClient;
    use crate::test_support::{spawn_stub, StubReply};

    enum Reply {
        Text(&'static str),
        Empty,
        Unauthorized,
    }

    struct FakeLlm {
        reply: Reply,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl FakeLlm {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl CompletionService for FakeLlm {
        async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            match self.reply {
                Reply::Text(text) => Ok(text.to_string()),
                Reply::Empty => Err(LlmError::EmptyContent),
                Reply::Unauthorized => Err(LlmError::Api {
                    status: 401,
                    message: "Incorrect API key provided".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_parse_one_skill_per_line() {
        assert_eq!(
            parse_skills("Communication\nTime Management\n"),
            vec!["Communication", "Time Management"]
        );
    }

    #[test]
    fn test_parse_strips_enumeration_markers() {
        let raw = "1. Communication\n2) Confidence\n- Decision-making\n* Language Fluency\n• Technical Proficiency";
        assert_eq!(
            parse_skills(raw),
            vec![
                "Communication",
                "Confidence",
                "Decision-making",
                "Language Fluency",
                "Technical Proficiency"
            ]
        );
    }

    #[test]
    fn test_parse_comma_separated() {
        assert_eq!(
            parse_skills("Communication, Time Management, Public Speaking."),
            vec!["Communication", "Time Management", "Public Speaking"]
        );
    }

    #[test]
    fn test_parse_accepts_json_object_and_array() {
        assert_eq!(
            parse_skills(r#"{"skills": ["Communication", "Confidence"]}"#),
            vec!["Communication", "Confidence"]
        );
        assert_eq!(
            parse_skills("```json\n[\"Decision-making\"]\n```"),
            vec!["Decision-making"]
        );
    }

    #[test]
    fn test_parse_drops_headings_scores_and_quotes() {
        let raw = "Skills to improve:\n\"Communication\": 1/10\n**Confidence**\n`Language Fluency`";
        assert_eq!(
            parse_skills(raw),
            vec!["Communication", "Confidence", "Language Fluency"]
        );
    }

    #[test]
    fn test_parse_json_list_followed_by_prose() {
        assert_eq!(
            parse_skills("[\"Communication\", \"Confidence\"] are the weakest"),
            vec!["Communication", "Confidence"]
        );
        assert_eq!(
            parse_skills("Here you go: {\"skills\": [\"Time Management\"]} Good luck!"),
            vec!["Time Management"]
        );
    }

    #[test]
    fn test_parse_strips_stray_brackets_from_broken_json() {
        assert_eq!(
            parse_skills("[\"Communication\", \"Confidence\""),
            vec!["Communication", "Confidence"]
        );
    }

    #[test]
    fn test_parse_keeps_digit_colon_names() {
        assert_eq!(
            parse_skills("1:1 Meetings\n2. 3D Modeling"),
            vec!["1:1 Meetings", "3D Modeling"]
        );
    }

    #[test]
    fn test_parse_keeps_leading_dot() {
        assert_eq!(
            parse_skills(".NET Development.\n- \".NET Core\""),
            vec![".NET Development", ".NET Core"]
        );
    }

    #[test]
    fn test_parse_keeps_non_score_colon_text() {
        assert_eq!(
            parse_skills("Communication: active listening"),
            vec!["Communication: active listening"]
        );
    }

    #[test]
    fn test_parse_dedupes_case_insensitively() {
        assert_eq!(
            parse_skills("Communication\ncommunication\nConfidence\nCOMMUNICATION"),
            vec!["Communication", "Confidence"]
        );
    }

    #[test]
    fn test_parse_caps_at_max_skills() {
        let raw = (1..=15)
            .map(|i| format!("Skill {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let skills = parse_skills(&raw);
        assert_eq!(skills.len(), MAX_SKILLS);
        assert_eq!(skills[0], "Skill 1");
        assert_eq!(skills[MAX_SKILLS - 1], "Skill 10");
    }

    #[test]
    fn test_parse_nothing_usable_is_empty() {
        assert!(parse_skills("NONE").is_empty());
        assert!(parse_skills("  \n - \n,,\n1.\n").is_empty());
        assert!(parse_skills("n/a").is_empty());
    }

    #[tokio::test]
    async fn test_extract_embeds_report_in_prompt() {
        let llm = FakeLlm::new(Reply::Text("Communication\nTime Management"));
        let extractor = SkillExtractor::new(llm.clone());

        let skills = extractor
            .extract_skills("Needs improvement in Communication and Time Management.")
            .await
            .unwrap();

        assert_eq!(skills, vec!["Communication", "Time Management"]);
        let prompt = llm.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Needs improvement in Communication and Time Management."));
        assert!(!prompt.contains("{report_text}"));
    }

    #[tokio::test]
    async fn test_extract_rejects_blank_report_without_calling_llm() {
        let llm = FakeLlm::new(Reply::Text("Communication"));
        let extractor = SkillExtractor::new(llm.clone());

        for input in ["", "   ", "\n\t"] {
            let err = extractor.extract_skills(input).await.unwrap_err();
            assert!(matches!(err, SkillError::InvalidInput(_)));
        }
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_extract_upstream_failure_is_classified() {
        let extractor = SkillExtractor::new(FakeLlm::new(Reply::Unauthorized));
        let err = extractor.extract_skills("Communication: 1/10").await.unwrap_err();
        match err {
            SkillError::UpstreamUnavailable(msg) => assert!(msg.contains("401")),
            other => panic!("expected UpstreamUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_extract_unparsable_output_is_no_skills() {
        let extractor = SkillExtractor::new(FakeLlm::new(Reply::Text("NONE")));
        let err = extractor.extract_skills("All scores 9/10.").await.unwrap_err();
        assert!(matches!(err, SkillError::NoSkillsFound));

        let extractor = SkillExtractor::new(FakeLlm::new(Reply::Empty));
        let err = extractor.extract_skills("All scores 9/10.").await.unwrap_err();
        assert!(matches!(err, SkillError::NoSkillsFound));
    }

    #[tokio::test]
    async fn test_extract_completion_timeout_is_upstream_unavailable() {
        let base = spawn_stub(StubReply::Hang).await;
        let llm = LlmClient::new(Some("sk-test".to_string()), Duration::from_secs(1))
            .unwrap()
            .with_base_url(format!("{base}/v1/chat/completions"));
        let extractor = SkillExtractor::new(Arc::new(llm));

        let err = extractor.extract_skills("Communication: 1/10").await.unwrap_err();
        assert!(matches!(err, SkillError::UpstreamUnavailable(_)));
    }
}
