//! Fallback readiness heuristic. Deterministic and model-free; never fails.
//!
//! Score = floor + capped document credit + structural field credit,
//! bounded to [10, 100]. Same signals always give the same assessment.

use crate::readiness::models::{CompletenessSignals, ReadinessAssessment, MAX_FEEDBACK_ITEMS};

const SCORE_FLOOR: u32 = 10;
const SCORE_CEILING: u32 = 100;
const POINTS_PER_DOCUMENT: u32 = 10;
const MAX_CREDITED_DOCUMENTS: u32 = 4;
const LEGAL_STRUCTURE_POINTS: u32 = 15;
const BUSINESS_MODEL_POINTS: u32 = 15;
const FULL_DESCRIPTION_POINTS: u32 = 10;
const SHORT_DESCRIPTION_POINTS: u32 = 5;
const SECTOR_POINTS: u32 = 5;
const STAGE_POINTS: u32 = 5;
/// Descriptions at least this long earn full credit.
const FULL_DESCRIPTION_CHARS: usize = 100;
/// Documents beyond which the "add core documents" nudge stops.
const CORE_DOCUMENT_SET: u32 = 3;

const FEEDBACK_LEGAL: &str = "Register your legal entity and record its structure on your profile";
const FEEDBACK_PITCH_DECK: &str = "Upload your pitch deck to the document library";
const FEEDBACK_CORE_DOCS: &str = "Upload financial projections and a cap table";
const FEEDBACK_BUSINESS_MODEL: &str = "Define your business model (e.g. SaaS, Marketplace, B2B)";
const FEEDBACK_DESCRIPTION: &str =
    "Expand your company description to cover problem, solution and traction";
const FEEDBACK_SECTOR_STAGE: &str = "Specify your sector and current funding stage";

/// Generic items used to top the list up when the profile has few gaps.
const GENERIC_FEEDBACK: [&str; 3] = [
    "Document key traction metrics such as users, revenue and growth rate",
    "Prepare a one-page executive summary for investor outreach",
    "Build a target investor list aligned with your sector and stage",
];

/// Computes a readiness assessment from completeness signals alone.
/// Always returns exactly `MAX_FEEDBACK_ITEMS` feedback strings.
pub fn heuristic_assessment(signals: &CompletenessSignals) -> ReadinessAssessment {
    let score = heuristic_score(signals);
    ReadinessAssessment {
        score,
        reason: heuristic_reason(signals),
        feedback: heuristic_feedback(signals),
    }
}

pub fn heuristic_score(signals: &CompletenessSignals) -> u8 {
    let mut score = SCORE_FLOOR;
    score += signals.document_count.min(MAX_CREDITED_DOCUMENTS) * POINTS_PER_DOCUMENT;
    if signals.legal_structure.is_some() {
        score += LEGAL_STRUCTURE_POINTS;
    }
    if !signals.business_model.is_empty() {
        score += BUSINESS_MODEL_POINTS;
    }
    score += match &signals.description {
        Some(d) if d.chars().count() >= FULL_DESCRIPTION_CHARS => FULL_DESCRIPTION_POINTS,
        Some(_) => SHORT_DESCRIPTION_POINTS,
        None => 0,
    };
    if signals.sector.is_some() {
        score += SECTOR_POINTS;
    }
    if signals.stage.is_some() {
        score += STAGE_POINTS;
    }
    score.clamp(SCORE_FLOOR, SCORE_CEILING) as u8
}

fn heuristic_reason(signals: &CompletenessSignals) -> String {
    let recorded = |present: bool| if present { "recorded" } else { "missing" };
    format!(
        "Heuristic estimate (AI scoring unavailable) based on profile completeness: \
         {} document(s), legal structure {}, business model {}.",
        signals.document_count,
        recorded(signals.legal_structure.is_some()),
        recorded(!signals.business_model.is_empty()),
    )
}

fn heuristic_feedback(signals: &CompletenessSignals) -> Vec<String> {
    let mut gaps: Vec<&str> = Vec::new();
    if signals.legal_structure.is_none() {
        gaps.push(FEEDBACK_LEGAL);
    }
    if signals.document_count == 0 {
        gaps.push(FEEDBACK_PITCH_DECK);
    } else if signals.document_count < CORE_DOCUMENT_SET {
        gaps.push(FEEDBACK_CORE_DOCS);
    }
    if signals.business_model.is_empty() {
        gaps.push(FEEDBACK_BUSINESS_MODEL);
    }
    let description_short = signals
        .description
        .as_ref()
        .map_or(true, |d| d.chars().count() < FULL_DESCRIPTION_CHARS);
    if description_short {
        gaps.push(FEEDBACK_DESCRIPTION);
    }
    if signals.sector.is_none() || signals.stage.is_none() {
        gaps.push(FEEDBACK_SECTOR_STAGE);
    }

    gaps.into_iter()
        .chain(GENERIC_FEEDBACK)
        .take(MAX_FEEDBACK_ITEMS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_signals() -> CompletenessSignals {
        CompletenessSignals {
            name: "Acme".to_string(),
            sector: Some("Fintech".to_string()),
            stage: Some("Idea".to_string()),
            description: Some("We help small shops accept card payments.".to_string()),
            legal_structure: None,
            business_model: vec![],
            document_count: 0,
        }
    }

    fn complete_signals() -> CompletenessSignals {
        CompletenessSignals {
            name: "Acme".to_string(),
            sector: Some("Fintech".to_string()),
            stage: Some("Series A".to_string()),
            description: Some("x".repeat(FULL_DESCRIPTION_CHARS)),
            legal_structure: Some("Delaware C-Corp".to_string()),
            business_model: vec!["SaaS".to_string()],
            document_count: 12,
        }
    }

    #[test]
    fn test_bare_profile_scores_idea_stage_with_three_items() {
        let assessment = heuristic_assessment(&bare_signals());
        assert!(
            (10..=30).contains(&assessment.score),
            "Score was {}",
            assessment.score
        );
        assert_eq!(assessment.feedback.len(), 3);
        assert_eq!(assessment.feedback[0], FEEDBACK_LEGAL);
        assert_eq!(assessment.feedback[1], FEEDBACK_PITCH_DECK);
        assert_eq!(assessment.feedback[2], FEEDBACK_BUSINESS_MODEL);
        assert!(assessment.reason.starts_with("Heuristic estimate"));
    }

    #[test]
    fn test_empty_profile_hits_floor() {
        assert_eq!(heuristic_score(&CompletenessSignals::default()), 10);
    }

    #[test]
    fn test_complete_profile_hits_ceiling_with_generic_feedback() {
        let assessment = heuristic_assessment(&complete_signals());
        assert_eq!(assessment.score, 100);
        assert_eq!(assessment.feedback, GENERIC_FEEDBACK.map(str::to_string).to_vec());
    }

    #[test]
    fn test_score_is_monotonic_in_documents() {
        let mut signals = bare_signals();
        let mut last = heuristic_score(&signals);
        for docs in 1..=10 {
            signals.document_count = docs;
            let score = heuristic_score(&signals);
            assert!(score >= last);
            last = score;
        }
    }

    #[test]
    fn test_same_signals_same_assessment() {
        assert_eq!(
            heuristic_assessment(&bare_signals()),
            heuristic_assessment(&bare_signals())
        );
    }
}
