//! Readiness assessment run: score, persist, reconcile tasks.
//!
//! Scoring happens outside the startup lock so a slow model call never
//! holds it. Persistence and reconciliation happen under the lock, as one
//! unit, so concurrent runs and checklist refreshes on the same startup
//! interleave only at whole-write granularity.

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::BoundedInvoker;
use crate::readiness::locks::StartupLocks;
use crate::readiness::models::{AssessmentSource, CompletenessSignals, FallbackCause};
use crate::readiness::reconciler::reconcile_tasks;
use crate::readiness::scorer::score_readiness;
use crate::store::{ReadinessUpdate, StartupStore, TaskStore};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReadinessReport {
    pub score: u8,
    pub reason: String,
    pub feedback: Vec<String>,
    pub source: AssessmentSource,
    /// Why the heuristic was used; `None` for model-scored runs.
    pub fallback_cause: Option<FallbackCause>,
    /// Tasks this run created; repeated runs with the same feedback add none.
    pub tasks_created: usize,
}

/// Runs one readiness assessment for `startup_id` and persists it.
///
/// Upstream model failures never surface here; only a missing startup or a
/// failed store write does.
pub async fn assess_readiness(
    startups: &dyn StartupStore,
    tasks: &dyn TaskStore,
    invoker: &BoundedInvoker,
    locks: &StartupLocks,
    startup_id: Uuid,
) -> Result<ReadinessReport, AppError> {
    let profile = startups
        .find_profile(startup_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Startup {startup_id} not found")))?;
    let signals = CompletenessSignals::from(&profile);

    let outcome = score_readiness(invoker, &signals).await;
    let source = outcome.source();
    let fallback_cause = outcome.fallback_cause();
    let assessment = outcome.into_assessment();

    let _guard = locks.acquire(startup_id).await;
    startups
        .write_readiness(
            startup_id,
            &ReadinessUpdate {
                score: assessment.score,
                feedback: Some(assessment.feedback.clone()),
                source,
            },
        )
        .await?;
    let created = reconcile_tasks(tasks, startup_id, &assessment.feedback).await?;

    info!(
        "Readiness for '{}' persisted: {} ({}, fallback {:?}), {} new task(s)",
        signals.name,
        assessment.score,
        source.as_str(),
        fallback_cause,
        created.len()
    );

    Ok(ReadinessReport {
        score: assessment.score,
        reason: assessment.reason,
        feedback: assessment.feedback,
        source,
        fallback_cause,
        tasks_created: created.len(),
    })
}
