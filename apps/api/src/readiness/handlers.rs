//! Axum route handlers for the Readiness API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::task::ActionTaskRow;
use crate::readiness::checklist::{refresh_checklist_score, ChecklistScore};
use crate::readiness::service::{assess_readiness, ReadinessReport};
use crate::state::AppState;

#[derive(Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<ActionTaskRow>,
}

/// POST /api/v1/startups/:id/readiness
///
/// The run is spawned detached: if the client disconnects, the model call
/// still runs to its own deadline and the result is persisted whole.
pub async fn handle_assess_readiness(
    State(state): State<AppState>,
    Path(startup_id): Path<Uuid>,
) -> Result<Json<ReadinessReport>, AppError> {
    let run = tokio::spawn(async move {
        assess_readiness(
            state.startups.as_ref(),
            state.tasks.as_ref(),
            &state.invoker,
            &state.locks,
            startup_id,
        )
        .await
    });
    let report = run
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Readiness run aborted: {e}")))??;
    Ok(Json(report))
}

/// POST /api/v1/startups/:id/readiness/checklist
pub async fn handle_refresh_checklist(
    State(state): State<AppState>,
    Path(startup_id): Path<Uuid>,
) -> Result<Json<ChecklistScore>, AppError> {
    let score = refresh_checklist_score(
        state.startups.as_ref(),
        state.tasks.as_ref(),
        &state.locks,
        startup_id,
    )
    .await?;
    Ok(Json(score))
}

/// GET /api/v1/startups/:id/tasks
pub async fn handle_list_tasks(
    State(state): State<AppState>,
    Path(startup_id): Path<Uuid>,
) -> Result<Json<TaskListResponse>, AppError> {
    if state.startups.find_profile(startup_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Startup {startup_id} not found")));
    }
    let tasks = state.tasks.all_tasks(startup_id).await?;
    Ok(Json(TaskListResponse { tasks }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::llm_client::testing::{ScriptedProvider, Step};
    use crate::llm_client::BoundedInvoker;
    use crate::models::startup::StartupProfileRow;
    use crate::store::memory::MemoryStore;

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_request_still_persists() {
        let store = Arc::new(MemoryStore::new());
        let id = Uuid::new_v4();
        store.add_startup(StartupProfileRow {
            id,
            name: "Acme".to_string(),
            sector: None,
            stage: None,
            description: None,
            legal_structure: None,
            business_model: vec![],
            document_count: 0,
        });
        let provider = ScriptedProvider::always(Step::Delayed(
            Duration::from_secs(60),
            r#"{"score": 90}"#.to_string(),
        ));
        let invoker = BoundedInvoker::new(Arc::new(provider), Duration::from_secs(20));
        let state = AppState::for_tests(store.clone(), invoker);

        // Client gives up after one second; the handler future is dropped.
        let abandoned = tokio::time::timeout(
            Duration::from_secs(1),
            handle_assess_readiness(State(state), Path(id)),
        )
        .await;
        assert!(abandoned.is_err());
        assert!(store.readiness(id).is_none());

        tokio::time::sleep(Duration::from_secs(30)).await;
        let stored = store.readiness(id).unwrap();
        assert_eq!(stored.source, "heuristic");
        assert_eq!(store.tasks_for(id).len(), 3);
    }
}
