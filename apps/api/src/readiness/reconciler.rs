//! Task Reconciler: turns assessment feedback into open action tasks.
//!
//! Idempotent: an open task with the same exact title is never created twice.
//! Never closes or deletes tasks; status changes belong to the task owner.
//! Callers hold the startup's `StartupLocks` guard while reconciling.

use std::collections::HashSet;

use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::task::{ActionTaskRow, NewActionTask, TaskPriority, TaskStatus};
use crate::store::TaskStore;

pub const TASK_CATEGORY: &str = "Operations";

/// Creates one pending task per feedback string that has no open twin.
/// Returns only the tasks created by this call.
pub async fn reconcile_tasks(
    tasks: &dyn TaskStore,
    startup_id: Uuid,
    feedback: &[String],
) -> Result<Vec<ActionTaskRow>, AppError> {
    let mut open_titles: HashSet<String> = tasks
        .open_tasks(startup_id)
        .await?
        .into_iter()
        .map(|t| t.title)
        .collect();

    let mut created = Vec::new();
    for title in feedback.iter().map(|f| f.trim()).filter(|f| !f.is_empty()) {
        if open_titles.contains(title) {
            continue;
        }
        let new_task = NewActionTask {
            startup_id,
            title: title.to_string(),
            category: TASK_CATEGORY.to_string(),
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
        };
        // `None` means another writer created the same open task first.
        if let Some(row) = tasks.create_task(&new_task).await? {
            created.push(row);
        }
        open_titles.insert(title.to_string());
    }

    if !created.is_empty() {
        info!(
            "Created {} action task(s) for startup {startup_id}",
            created.len()
        );
    }
    Ok(created)
}
