//! Readiness Scorer: model path with a deterministic heuristic backstop.
//!
//! `score_readiness` cannot fail: any timeout, outage or unusable reply
//! resolves to `ScoringOutcome::FellBack` with a heuristic assessment.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{info, warn};

use crate::llm_client::{parse_json_object, BoundedInvoker, ResponseParseError};
use crate::readiness::heuristic::heuristic_assessment;
use crate::readiness::models::{
    CompletenessSignals, FallbackCause, ReadinessAssessment, ScoringOutcome, MAX_FEEDBACK_ITEMS,
};
use crate::readiness::prompts::build_readiness_prompt;

/// Feedback items longer than this are cut; they become task titles.
const MAX_FEEDBACK_CHARS: usize = 200;

/// Scores a startup via the model, falling back to the heuristic on any failure.
pub async fn score_readiness(
    invoker: &BoundedInvoker,
    signals: &CompletenessSignals,
) -> ScoringOutcome {
    let prompt = build_readiness_prompt(signals);

    let raw = match invoker.invoke(&prompt).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Readiness model call failed for '{}', using heuristic: {e}", signals.name);
            return fall_back(signals, FallbackCause::from(&e));
        }
    };

    match parse_model_assessment(&raw) {
        Ok(assessment) => {
            info!("Model scored '{}' at {}", signals.name, assessment.score);
            ScoringOutcome::Scored(assessment)
        }
        Err(e) => {
            warn!("Readiness reply unusable for '{}', using heuristic: {e}", signals.name);
            fall_back(signals, FallbackCause::UnparseableResponse)
        }
    }
}

fn fall_back(signals: &CompletenessSignals, cause: FallbackCause) -> ScoringOutcome {
    ScoringOutcome::FellBack {
        assessment: heuristic_assessment(signals),
        cause,
    }
}

/// Extracts `{score, reason, feedback}` from raw model text.
///
/// Only a missing or non-numeric score is fatal. The score is clamped to
/// 0..=100; feedback is trimmed, de-duplicated and capped.
pub fn parse_model_assessment(raw: &str) -> Result<ReadinessAssessment, ResponseParseError> {
    let parsed = parse_json_object(raw)?;

    let score = match parsed.get("score") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|s| s.is_finite())
    .ok_or_else(|| ResponseParseError("missing numeric 'score'".to_string()))?;
    let score = score.round().clamp(0.0, 100.0) as u8;

    let reason = parsed
        .get("reason")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Model readiness score {score}/100."));

    let feedback = parsed
        .get("feedback")
        .and_then(Value::as_array)
        .map(|items| clean_feedback(items.iter().filter_map(Value::as_str)))
        .unwrap_or_default();

    Ok(ReadinessAssessment {
        score,
        reason,
        feedback,
    })
}

fn clean_feedback<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .map(|item| item.trim().chars().take(MAX_FEEDBACK_CHARS).collect::<String>())
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.clone()))
        .take(MAX_FEEDBACK_ITEMS)
        .collect()
}
