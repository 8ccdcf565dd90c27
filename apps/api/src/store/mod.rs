//! Store traits: the engine's only view of persistence.
//!
//! `PgStore` implements all three against PostgreSQL. Tests use the
//! in-memory store, which enforces the same open-task uniqueness rule.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::investor::InvestorRow;
use crate::models::startup::StartupProfileRow;
use crate::models::task::{ActionTaskRow, NewActionTask};
use crate::readiness::models::AssessmentSource;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

/// A write to the startup's readiness fields. `feedback: None` leaves the
/// stored feedback untouched (checklist recomputation only moves the score).
#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessUpdate {
    pub score: u8,
    pub feedback: Option<Vec<String>>,
    pub source: AssessmentSource,
}

#[async_trait]
pub trait StartupStore: Send + Sync {
    async fn find_profile(&self, startup_id: Uuid) -> Result<Option<StartupProfileRow>, AppError>;

    /// Fails with `NotFound` if the startup no longer exists.
    async fn write_readiness(
        &self,
        startup_id: Uuid,
        update: &ReadinessUpdate,
    ) -> Result<(), AppError>;
}

#[async_trait]
pub trait InvestorStore: Send + Sync {
    async fn approved_investors(&self) -> Result<Vec<InvestorRow>, AppError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn open_tasks(&self, startup_id: Uuid) -> Result<Vec<ActionTaskRow>, AppError>;

    /// Returns `None` when an open task with the same title already exists
    /// for the startup. Never creates a duplicate.
    async fn create_task(&self, task: &NewActionTask) -> Result<Option<ActionTaskRow>, AppError>;

    async fn all_tasks(&self, startup_id: Uuid) -> Result<Vec<ActionTaskRow>, AppError>;
}
