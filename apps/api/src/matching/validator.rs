//! Match Response Validator: the boundary between raw model output and
//! anything presented as investor data.
//!
//! Structural failure (no JSON object, no `matches` array) is an error.
//! Everything else is per-entry: unknown ids, repeats and blank reasons are
//! dropped while the rest of the response survives.

use std::collections::HashSet;

use serde_json::Value;
use tracing::warn;

use crate::llm_client::{parse_json_object, ResponseParseError};
use crate::matching::models::CandidateInvestor;
use crate::matching::prompts::REQUIRED_MATCHES;

/// Reasons longer than this are cut before reaching the caller.
const MAX_REASON_CHARS: usize = 600;

/// A model suggestion whose id is known to resolve against the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMatch {
    pub id: String,
    pub reason: String,
}

/// Parses raw model output and keeps at most three resolvable, explained matches.
pub fn validate_match_response(
    raw: &str,
    pool: &[CandidateInvestor],
) -> Result<Vec<ValidatedMatch>, ResponseParseError> {
    let parsed = parse_json_object(raw)?;
    let entries = parsed
        .get("matches")
        .and_then(Value::as_array)
        .ok_or_else(|| ResponseParseError("missing 'matches' array".to_string()))?;

    let known_ids: HashSet<&str> = pool.iter().map(|c| c.id.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unknown_ids = 0usize;

    // Resolve, then cap, then drop unexplained entries. A blank reason
    // costs its slot; later entries do not move up to fill it.
    let resolved: Vec<(&str, &str)> = entries
        .iter()
        .filter_map(|entry| {
            // Exact match only: no trimming, case folding or numeric ids.
            let id = entry.get("id").and_then(Value::as_str);
            match id {
                Some(id) if known_ids.contains(id) => Some((id, entry_reason(entry))),
                _ => {
                    unknown_ids += 1;
                    None
                }
            }
        })
        .filter(|(id, _)| seen.insert(*id))
        .take(REQUIRED_MATCHES)
        .collect();

    let before_blank_filter = resolved.len();
    let validated: Vec<ValidatedMatch> = resolved
        .into_iter()
        .filter(|(_, reason)| !reason.is_empty())
        .map(|(id, reason)| ValidatedMatch {
            id: id.to_string(),
            reason: reason.chars().take(MAX_REASON_CHARS).collect(),
        })
        .collect();
    let blank_reasons = before_blank_filter - validated.len();

    if unknown_ids > 0 || blank_reasons > 0 {
        warn!(
            "Dropped model matches: {} unresolvable id(s), {} blank reason(s)",
            unknown_ids, blank_reasons
        );
    }

    Ok(validated)
}

/// Trimmed reason; a missing or non-string reason counts as blank.
fn entry_reason(entry: &Value) -> &str {
    entry
        .get("reason")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
}
