//! In-memory store for tests. Mirrors the PostgreSQL constraints the engine
//! relies on, including the open-task title uniqueness.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::investor::InvestorRow;
use crate::models::startup::StartupProfileRow;
use crate::models::task::{ActionTaskRow, NewActionTask, TaskPriority, TaskStatus};
use crate::store::{InvestorStore, ReadinessUpdate, StartupStore, TaskStore};

/// Readiness fields as they would sit on the startup row.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredReadiness {
    pub score: u8,
    pub feedback: Vec<String>,
    pub source: &'static str,
}

#[derive(Default)]
pub struct MemoryStore {
    startups: Mutex<HashMap<Uuid, StartupProfileRow>>,
    readiness: Mutex<HashMap<Uuid, StoredReadiness>>,
    investors: Mutex<Vec<InvestorRow>>,
    tasks: Mutex<Vec<ActionTaskRow>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_startup(&self, profile: StartupProfileRow) {
        self.startups.lock().unwrap().insert(profile.id, profile);
    }

    pub fn add_investor(&self, investor: InvestorRow) {
        self.investors.lock().unwrap().push(investor);
    }

    pub fn add_task(&self, startup_id: Uuid, title: &str, status: TaskStatus) -> Uuid {
        let id = Uuid::new_v4();
        self.tasks.lock().unwrap().push(ActionTaskRow {
            id,
            startup_id,
            title: title.to_string(),
            category: "Operations".to_string(),
            status: status.as_str().to_string(),
            priority: TaskPriority::Medium.as_str().to_string(),
            created_at: Utc::now(),
        });
        id
    }

    pub fn set_task_status(&self, task_id: Uuid, status: TaskStatus) {
        let mut tasks = self.tasks.lock().unwrap();
        if let Some(task) = tasks.iter_mut().find(|t| t.id == task_id) {
            task.status = status.as_str().to_string();
        }
    }

    pub fn readiness(&self, startup_id: Uuid) -> Option<StoredReadiness> {
        self.readiness.lock().unwrap().get(&startup_id).cloned()
    }

    pub fn tasks_for(&self, startup_id: Uuid) -> Vec<ActionTaskRow> {
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.startup_id == startup_id)
            .cloned()
            .collect()
    }

    /// Makes every subsequent write fail like a lost database connection.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl StartupStore for MemoryStore {
    async fn find_profile(&self, startup_id: Uuid) -> Result<Option<StartupProfileRow>, AppError> {
        Ok(self.startups.lock().unwrap().get(&startup_id).cloned())
    }

    async fn write_readiness(
        &self,
        startup_id: Uuid,
        update: &ReadinessUpdate,
    ) -> Result<(), AppError> {
        self.check_writable()?;
        if !self.startups.lock().unwrap().contains_key(&startup_id) {
            return Err(AppError::NotFound(format!("Startup {startup_id} not found")));
        }
        let mut readiness = self.readiness.lock().unwrap();
        let previous_feedback = readiness
            .get(&startup_id)
            .map(|r| r.feedback.clone())
            .unwrap_or_default();
        readiness.insert(
            startup_id,
            StoredReadiness {
                score: update.score,
                feedback: update.feedback.clone().unwrap_or(previous_feedback),
                source: update.source.as_str(),
            },
        );
        Ok(())
    }
}

#[async_trait]
impl InvestorStore for MemoryStore {
    async fn approved_investors(&self) -> Result<Vec<InvestorRow>, AppError> {
        Ok(self.investors.lock().unwrap().clone())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn open_tasks(&self, startup_id: Uuid) -> Result<Vec<ActionTaskRow>, AppError> {
        Ok(self
            .tasks_for(startup_id)
            .into_iter()
            .filter(ActionTaskRow::is_pending)
            .collect())
    }

    async fn create_task(&self, task: &NewActionTask) -> Result<Option<ActionTaskRow>, AppError> {
        self.check_writable()?;
        let mut tasks = self.tasks.lock().unwrap();
        let pending = task.status == TaskStatus::Pending;
        let conflict = pending
            && tasks
                .iter()
                .any(|t| t.startup_id == task.startup_id && t.is_pending() && t.title == task.title);
        if conflict {
            return Ok(None);
        }
        let row = ActionTaskRow {
            id: Uuid::new_v4(),
            startup_id: task.startup_id,
            title: task.title.clone(),
            category: task.category.clone(),
            status: task.status.as_str().to_string(),
            priority: task.priority.as_str().to_string(),
            created_at: Utc::now(),
        };
        tasks.push(row.clone());
        Ok(Some(row))
    }

    async fn all_tasks(&self, startup_id: Uuid) -> Result<Vec<ActionTaskRow>, AppError> {
        Ok(self.tasks_for(startup_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(startup_id: Uuid, title: &str) -> NewActionTask {
        NewActionTask {
            startup_id,
            title: title.to_string(),
            category: "Operations".to_string(),
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
        }
    }

    #[tokio::test]
    async fn test_second_open_task_with_same_title_is_not_created() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        let first = store.create_task(&pending(id, "Upload deck")).await.unwrap();
        assert!(first.is_some());
        let second = store.create_task(&pending(id, "Upload deck")).await.unwrap();
        assert!(second.is_none());
        assert_eq!(store.tasks_for(id).len(), 1);
    }

    #[tokio::test]
    async fn test_same_title_allowed_once_previous_is_completed() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        store.add_task(id, "Upload deck", TaskStatus::Completed);

        let created = store.create_task(&pending(id, "Upload deck")).await.unwrap();
        assert!(created.is_some());
        assert_eq!(store.tasks_for(id).len(), 2);
    }
}
