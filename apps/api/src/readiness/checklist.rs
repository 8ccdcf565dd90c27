//! Checklist score: readiness derived from action-task completion.
//!
//! Shares the readiness field with model/heuristic assessments. Whichever
//! write lands last is what the dashboard shows; `readiness_source` records
//! which path that was.

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::task::ActionTaskRow;
use crate::readiness::locks::StartupLocks;
use crate::readiness::models::AssessmentSource;
use crate::store::{ReadinessUpdate, StartupStore, TaskStore};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChecklistScore {
    /// `None` when the startup has no tasks; nothing is written then.
    pub score: Option<u8>,
    pub completed: usize,
    pub total: usize,
}

/// `round(100 * completed / total)`, or `None` for an empty checklist.
pub fn checklist_score(tasks: &[ActionTaskRow]) -> ChecklistScore {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.is_completed()).count();
    let score = (total > 0)
        .then(|| (100.0 * completed as f64 / total as f64).round().clamp(0.0, 100.0) as u8);
    ChecklistScore {
        score,
        completed,
        total,
    }
}

/// Recomputes and persists the checklist score after a task status change.
pub async fn refresh_checklist_score(
    startups: &dyn StartupStore,
    tasks: &dyn TaskStore,
    locks: &StartupLocks,
    startup_id: Uuid,
) -> Result<ChecklistScore, AppError> {
    if startups.find_profile(startup_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Startup {startup_id} not found")));
    }

    let _guard = locks.acquire(startup_id).await;
    let result = checklist_score(&tasks.all_tasks(startup_id).await?);

    if let Some(score) = result.score {
        startups
            .write_readiness(
                startup_id,
                &ReadinessUpdate {
                    score,
                    feedback: None,
                    source: AssessmentSource::Checklist,
                },
            )
            .await?;
        info!(
            "Checklist score {score} ({}/{}) for startup {startup_id}",
            result.completed, result.total
        );
    }

    Ok(result)
}
