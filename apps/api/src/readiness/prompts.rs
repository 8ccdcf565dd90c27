// Readiness engine LLM prompt templates.
// All prompts for the readiness module are defined here.

use crate::llm_client::prompts::{
    sanitize_for_prompt, JSON_ONLY_SYSTEM, UNTRUSTED_INPUT_INSTRUCTION,
};
use crate::llm_client::RenderedPrompt;
use crate::readiness::models::{CompletenessSignals, MAX_FEEDBACK_ITEMS};

const READINESS_SYSTEM_ROLE: &str = "You are a venture analyst who assesses how prepared \
    a startup is to begin fundraising conversations with investors.";

/// Banding guidance keeps scores comparable across calls.
const SCORE_BANDS: &str = "\
- 0-30: idea stage. Little more than a concept; core profile fields or documents missing.
- 31-60: early. Basic profile in place but key documents or structure still missing.
- 61-80: solid. Legal entity, business model and core documents present; gaps are polish.
- 81-100: investor-ready. Complete profile with a full document set.";

/// Renders a startup's completeness signals into a scoring prompt.
pub fn build_readiness_prompt(signals: &CompletenessSignals) -> RenderedPrompt {
    let business_model = if signals.business_model.is_empty() {
        "(none recorded)".to_string()
    } else {
        signals
            .business_model
            .iter()
            .map(|t| sanitize_for_prompt(t))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let user = format!(
        r#"Assess the fundraising readiness of the startup below.

STARTUP:
Name: {name}
Sector: {sector}
Stage: {stage}
Legal structure: {legal}
Business model: {business_model}
Uploaded documents: {documents}
Description: {description}

SCORING BANDS:
{SCORE_BANDS}

OUTPUT SCHEMA (return exactly this structure):
{{
  "score": <integer 0-100>,
  "reason": "<one or two sentences explaining the band>",
  "feedback": ["<short actionable improvement>"]
}}

RULES:
1. Pick the band first, then the score within it.
2. Give at most {MAX_FEEDBACK_ITEMS} feedback items, most impactful first.
3. Each feedback item is a single imperative sentence the founder can act on this week.
4. Return ONLY the JSON object. No code fences, no commentary."#,
        name = or_missing(Some(signals.name.as_str())),
        sector = or_missing(signals.sector.as_deref()),
        stage = or_missing(signals.stage.as_deref()),
        legal = or_missing(signals.legal_structure.as_deref()),
        documents = signals.document_count,
        description = or_missing(signals.description.as_deref()),
    );

    RenderedPrompt {
        system: format!("{READINESS_SYSTEM_ROLE} {UNTRUSTED_INPUT_INSTRUCTION} {JSON_ONLY_SYSTEM}"),
        user,
    }
}

fn or_missing(value: Option<&str>) -> String {
    value
        .map(sanitize_for_prompt)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "(not provided)".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_signals_and_bands() {
        let signals = CompletenessSignals {
            name: "Acme".to_string(),
            sector: Some("HealthTech".to_string()),
            stage: None,
            description: None,
            legal_structure: Some("LLC".to_string()),
            business_model: vec!["B2B".to_string(), "SaaS".to_string()],
            document_count: 2,
        };
        let prompt = build_readiness_prompt(&signals);
        assert!(prompt.user.contains("Sector: HealthTech"));
        assert!(prompt.user.contains("Stage: (not provided)"));
        assert!(prompt.user.contains("Legal structure: LLC"));
        assert!(prompt.user.contains("Business model: B2B, SaaS"));
        assert!(prompt.user.contains("Uploaded documents: 2"));
        assert!(prompt.user.contains("81-100: investor-ready"));
        assert!(prompt.user.contains("at most 3 feedback items"));
        assert!(prompt.system.contains("valid JSON only"));
    }
}
