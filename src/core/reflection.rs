//! Reflection generation: prompt, payload extraction, provider fallback
//!
//! The generator is a black box behind [`ReflectionGenerator`]. The journal
//! only cares that it gets a well-formed [`Reflection`] or an error.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::SupportConfig;
use crate::error::GenerationError;
use crate::types::Reflection;
use crate::SEVERITY_HIGH_MAX;

/// What the generator gets to work with
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectionRequest {
    pub text: String,
    pub emotion: String,
    pub sentiment: f64,
}

/// Text-generation collaborator
#[async_trait]
pub trait ReflectionGenerator: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &str;

    async fn generate(&self, request: &ReflectionRequest) -> Result<Reflection, GenerationError>;
}

// =============================================================================
// PROMPT
// =============================================================================

fn tone_instruction(sentiment: f64) -> &'static str {
    if sentiment < -0.7 {
        "Use an extra compassionate, grounding tone. Focus on safety and immediate coping."
    } else if sentiment < -0.3 {
        "Use a warm, validating tone. Help them see small positive steps they can take."
    } else if sentiment < 0.3 {
        "Use a balanced, curious tone. Help them explore what they're experiencing."
    } else {
        "Use an encouraging, reinforcing tone. Help them build on this positive momentum."
    }
}

fn followup_focus(emotion: &str) -> &'static str {
    match emotion.to_lowercase().as_str() {
        "lonely" => "Focus follow-ups on connection: relationships, reaching out, community.",
        "anxious" | "overwhelmed" => {
            "Focus follow-ups on breaking things down into manageable steps and grounding techniques."
        }
        "ashamed" | "grieving" => "Focus follow-ups on self-compassion and processing feelings.",
        "joyful" | "hopeful" => {
            "Focus follow-ups on sustaining this momentum and understanding what contributed."
        }
        "frustrated" | "angry" => {
            "Focus follow-ups on understanding the source and healthy expression."
        }
        _ => "",
    }
}

const RESPONSE_SHAPE: &str = r#"{
  "reflection": "3-4 empathetic sentences that validate their feelings. Add a grounding element if sentiment is very low.",
  "summary": "One line naming the core emotion or theme.",
  "actionable_insight": "One small, practical step they could try today.",
  "followups": [
    {"question": "A follow-up tailored to their situation", "rationale": "Why this question helps"},
    {"question": "A follow-up about what led here or what could help", "rationale": "The insight behind it"}
  ],
  "tone": "The tone you used",
  "safety_flag": false,
  "coping_suggestion": "If sentiment < -0.3, a grounding or coping technique"
}"#;

/// Full instruction text for one entry
pub fn build_prompt(request: &ReflectionRequest) -> String {
    let focus = followup_focus(&request.emotion);
    let mut prompt = String::from(
        "You are a compassionate, non-judgmental emotional support companion. \
         Help the writer reflect on their emotions and find one actionable insight.\n\n",
    );
    prompt.push_str(tone_instruction(request.sentiment));
    prompt.push_str("\n\n");
    prompt.push_str(&format!(
        "Emotional state: {} (sentiment score: {:.2})\n",
        request.emotion, request.sentiment
    ));
    if !focus.is_empty() {
        prompt.push_str(focus);
        prompt.push('\n');
    }
    prompt.push_str(&format!("\nJournal entry:\n\"\"\"{}\"\"\"\n\n", request.text));
    prompt.push_str("Reply with JSON in exactly this shape and nothing else:\n\n");
    prompt.push_str(RESPONSE_SHAPE);
    prompt.push('\n');
    prompt
}

// =============================================================================
// PAYLOAD EXTRACTION
// =============================================================================

/// Slice from the first `{` to the last `}`
pub fn extract_json(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Parse model output into a reflection
pub fn parse_reflection(raw: &str) -> Result<Reflection, GenerationError> {
    let json = extract_json(raw)
        .ok_or_else(|| GenerationError::Malformed("no JSON object in output".to_string()))?;
    serde_json::from_str(json).map_err(|e| GenerationError::Malformed(e.to_string()))
}

/// Fill a missing coping suggestion for negative entries
pub fn fill_coping(reflection: &mut Reflection, sentiment: f64, emotion: &str, support: &SupportConfig) {
    let missing = reflection
        .coping_suggestion
        .as_deref()
        .map_or(true, |s| s.trim().is_empty());
    if sentiment < SEVERITY_HIGH_MAX && missing {
        reflection.coping_suggestion = support.coping_for(emotion).first().cloned();
    }
}

// =============================================================================
// FALLBACK
// =============================================================================

/// Tries providers in order until one succeeds.
pub struct FallbackGenerator {
    providers: Vec<Arc<dyn ReflectionGenerator>>,
}

impl FallbackGenerator {
    pub fn new(providers: Vec<Arc<dyn ReflectionGenerator>>) -> Self {
        Self { providers }
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[async_trait]
impl ReflectionGenerator for FallbackGenerator {
    fn name(&self) -> &str {
        "fallback"
    }

    async fn generate(&self, request: &ReflectionRequest) -> Result<Reflection, GenerationError> {
        let mut failures = Vec::new();
        for provider in &self.providers {
            match provider.generate(request).await {
                Ok(reflection) => {
                    info!(provider = provider.name(), "reflection generated");
                    return Ok(reflection);
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "reflection provider failed");
                    failures.push(format!("{}: {e}", provider.name()));
                }
            }
        }
        if failures.is_empty() {
            failures.push("no providers configured".to_string());
        }
        Err(GenerationError::Exhausted(failures.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Followup;

    fn request(emotion: &str, sentiment: f64) -> ReflectionRequest {
        ReflectionRequest {
            text: "Long day at work".to_string(),
            emotion: emotion.to_string(),
            sentiment,
        }
    }

    struct Failing;
    struct Fixed;

    #[async_trait]
    impl ReflectionGenerator for Failing {
        fn name(&self) -> &str {
            "failing"
        }
        async fn generate(&self, _r: &ReflectionRequest) -> Result<Reflection, GenerationError> {
            Err(GenerationError::Transport("connection refused".into()))
        }
    }

    #[async_trait]
    impl ReflectionGenerator for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }
        async fn generate(&self, _r: &ReflectionRequest) -> Result<Reflection, GenerationError> {
            parse_reflection(r#"{"reflection":"ok","summary":"s"}"#)
        }
    }

    #[test]
    fn test_prompt_tone_and_focus() {
        let p = build_prompt(&request("lonely", -0.8));
        assert!(p.contains("grounding tone"));
        assert!(p.contains("connection"));
        assert!(p.contains("-0.80"));

        let p = build_prompt(&request("joyful", 0.5));
        assert!(p.contains("encouraging"));
        assert!(p.contains("momentum"));

        let p = build_prompt(&request("neutral", 0.0));
        assert!(p.contains("curious"));
        assert!(!p.contains("Focus follow-ups"));
    }

    #[test]
    fn test_extract_json_ignores_chatter() {
        let raw = "Sure! Here you go:\n{\"reflection\": \"a\", \"summary\": \"b\"}\nHope it helps";
        assert_eq!(extract_json(raw), Some("{\"reflection\": \"a\", \"summary\": \"b\"}"));
        assert_eq!(extract_json("no braces"), None);
        assert_eq!(extract_json("} backwards {"), None);
    }

    #[test]
    fn test_parse_accepts_follow_up_key() {
        let raw = r#"{"reflection":"r","summary":"s","followups":[{"question":"q","follow_up":"why"}],"safety_flag":true}"#;
        let parsed = parse_reflection(raw).unwrap();
        assert_eq!(
            parsed.followups,
            vec![Followup {
                question: "q".into(),
                rationale: "why".into()
            }]
        );
        assert!(parsed.safety_flag);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_reflection("{not json}"),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn test_fill_coping_only_when_negative_and_missing() {
        let support = SupportConfig::default();
        let mut r = parse_reflection(r#"{"reflection":"r","summary":"s"}"#).unwrap();
        fill_coping(&mut r, 0.1, "anxious", &support);
        assert!(r.coping_suggestion.is_none());

        fill_coping(&mut r, -0.5, "anxious", &support);
        assert_eq!(
            r.coping_suggestion.as_deref(),
            support.coping_for("anxious").first().map(String::as_str)
        );

        r.coping_suggestion = Some("breathe".into());
        fill_coping(&mut r, -0.9, "anxious", &support);
        assert_eq!(r.coping_suggestion.as_deref(), Some("breathe"));
    }

    #[tokio::test]
    async fn test_fallback_uses_next_provider() {
        let chain = FallbackGenerator::new(vec![Arc::new(Failing), Arc::new(Fixed)]);
        let r = chain.generate(&request("anxious", -0.4)).await.unwrap();
        assert_eq!(r.reflection, "ok");
    }

    #[tokio::test]
    async fn test_fallback_exhausted() {
        let chain = FallbackGenerator::new(vec![Arc::new(Failing), Arc::new(Failing)]);
        let err = chain.generate(&request("anxious", -0.4)).await.unwrap_err();
        match err {
            GenerationError::Exhausted(msg) => assert!(msg.contains("connection refused")),
            other => panic!("unexpected error: {other}"),
        }

        let empty = FallbackGenerator::new(Vec::new());
        assert!(empty.is_empty());
        assert!(matches!(
            empty.generate(&request("a", 0.0)).await,
            Err(GenerationError::Exhausted(_))
        ));
    }
}
