use serde::{Deserialize, Serialize};

use crate::llm_client::InvokeError;
use crate::models::startup::StartupProfileRow;

/// Upper bound on feedback items per assessment, and so on tasks per run.
pub const MAX_FEEDBACK_ITEMS: usize = 3;

/// Which path produced the readiness score currently stored on a startup.
/// Both paths write the same field; the most recent write is authoritative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentSource {
    Model,
    Heuristic,
    Checklist,
}

impl AssessmentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentSource::Model => "model",
            AssessmentSource::Heuristic => "heuristic",
            AssessmentSource::Checklist => "checklist",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadinessAssessment {
    /// Always within 0..=100.
    pub score: u8,
    pub reason: String,
    /// Short actionable items, at most `MAX_FEEDBACK_ITEMS`.
    pub feedback: Vec<String>,
}

/// Why the model path was abandoned for the heuristic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FallbackCause {
    Timeout,
    Unavailable,
    MalformedEnvelope,
    UnparseableResponse,
}

impl From<&InvokeError> for FallbackCause {
    fn from(err: &InvokeError) -> Self {
        match err {
            InvokeError::Timeout(_) => FallbackCause::Timeout,
            InvokeError::Unavailable(_) => FallbackCause::Unavailable,
            InvokeError::Malformed(_) => FallbackCause::MalformedEnvelope,
        }
    }
}

/// Result of one scoring attempt. Exactly one of the two paths produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringOutcome {
    Scored(ReadinessAssessment),
    FellBack {
        assessment: ReadinessAssessment,
        cause: FallbackCause,
    },
}

impl ScoringOutcome {
    /// `None` when the model path produced the assessment.
    pub fn fallback_cause(&self) -> Option<FallbackCause> {
        match self {
            ScoringOutcome::Scored(_) => None,
            ScoringOutcome::FellBack { cause, .. } => Some(*cause),
        }
    }

    pub fn source(&self) -> AssessmentSource {
        match self {
            ScoringOutcome::Scored(_) => AssessmentSource::Model,
            ScoringOutcome::FellBack { .. } => AssessmentSource::Heuristic,
        }
    }

    pub fn into_assessment(self) -> ReadinessAssessment {
        match self {
            ScoringOutcome::Scored(assessment) => assessment,
            ScoringOutcome::FellBack { assessment, .. } => assessment,
        }
    }
}

/// The profile fields readiness is judged on, trimmed and normalized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletenessSignals {
    pub name: String,
    pub sector: Option<String>,
    pub stage: Option<String>,
    pub description: Option<String>,
    pub legal_structure: Option<String>,
    pub business_model: Vec<String>,
    pub document_count: u32,
}

impl From<&StartupProfileRow> for CompletenessSignals {
    fn from(row: &StartupProfileRow) -> Self {
        Self {
            name: row.name.trim().to_string(),
            sector: non_blank(row.sector.as_deref()),
            stage: non_blank(row.stage.as_deref()),
            description: non_blank(row.description.as_deref()),
            legal_structure: non_blank(row.legal_structure.as_deref()),
            business_model: row
                .business_model
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            document_count: u32::try_from(row.document_count.max(0)).unwrap_or(u32::MAX),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
