use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }
}

/// Priority the engine assigns. Other values in the `priority` column are
/// set by the task owner and read back as plain strings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Medium,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Medium => "medium",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActionTaskRow {
    pub id: Uuid,
    pub startup_id: Uuid,
    pub title: String,
    pub category: String,
    pub status: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
}

impl ActionTaskRow {
    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending.as_str()
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed.as_str()
    }
}

/// Insert payload for a new action task.
#[derive(Debug, Clone)]
pub struct NewActionTask {
    pub startup_id: Uuid,
    pub title: String,
    pub category: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
}
