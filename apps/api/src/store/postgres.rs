use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::investor::InvestorRow;
use crate::models::startup::StartupProfileRow;
use crate::models::task::{ActionTaskRow, NewActionTask, TaskStatus};
use crate::store::{InvestorStore, ReadinessUpdate, StartupStore, TaskStore};

/// PostgreSQL-backed implementation of every store the engine consumes.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StartupStore for PgStore {
    async fn find_profile(&self, startup_id: Uuid) -> Result<Option<StartupProfileRow>, AppError> {
        Ok(sqlx::query_as::<_, StartupProfileRow>(
            r#"
            SELECT s.id, s.name, s.sector, s.stage, s.description, s.legal_structure,
                   s.business_model,
                   (SELECT COUNT(*) FROM documents d WHERE d.startup_id = s.id) AS document_count
            FROM startups s
            WHERE s.id = $1
            "#,
        )
        .bind(startup_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn write_readiness(
        &self,
        startup_id: Uuid,
        update: &ReadinessUpdate,
    ) -> Result<(), AppError> {
        // COALESCE keeps stored feedback when the update carries none.
        let result = sqlx::query(
            r#"
            UPDATE startups
            SET readiness_score = $2,
                readiness_feedback = COALESCE($3, readiness_feedback),
                readiness_source = $4,
                readiness_updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(startup_id)
        .bind(i32::from(update.score))
        .bind(update.feedback.as_deref())
        .bind(update.source.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Startup {startup_id} not found")));
        }

        info!(
            "Persisted readiness score {} ({}) for startup {startup_id}",
            update.score,
            update.source.as_str()
        );
        Ok(())
    }
}

#[async_trait]
impl InvestorStore for PgStore {
    async fn approved_investors(&self) -> Result<Vec<InvestorRow>, AppError> {
        Ok(sqlx::query_as::<_, InvestorRow>(
            r#"
            SELECT id, name, category, focus, description, investment_range
            FROM investors
            WHERE status = 'approved'
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn open_tasks(&self, startup_id: Uuid) -> Result<Vec<ActionTaskRow>, AppError> {
        Ok(sqlx::query_as::<_, ActionTaskRow>(
            "SELECT * FROM action_tasks WHERE startup_id = $1 AND status = $2 ORDER BY created_at",
        )
        .bind(startup_id)
        .bind(TaskStatus::Pending.as_str())
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create_task(&self, task: &NewActionTask) -> Result<Option<ActionTaskRow>, AppError> {
        // The partial unique index on (startup_id, title) WHERE status = 'pending'
        // turns a concurrent duplicate into "no row returned".
        Ok(sqlx::query_as::<_, ActionTaskRow>(
            r#"
            INSERT INTO action_tasks (startup_id, title, category, status, priority)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (startup_id, title) WHERE status = 'pending' DO NOTHING
            RETURNING *
            "#,
        )
        .bind(task.startup_id)
        .bind(&task.title)
        .bind(&task.category)
        .bind(task.status.as_str())
        .bind(task.priority.as_str())
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn all_tasks(&self, startup_id: Uuid) -> Result<Vec<ActionTaskRow>, AppError> {
        Ok(sqlx::query_as::<_, ActionTaskRow>(
            "SELECT * FROM action_tasks WHERE startup_id = $1 ORDER BY created_at",
        )
        .bind(startup_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
