use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The completeness signals the readiness engine reads for one startup.
/// `document_count` is aggregated from the `documents` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StartupProfileRow {
    pub id: Uuid,
    pub name: String,
    pub sector: Option<String>,
    pub stage: Option<String>,
    pub description: Option<String>,
    pub legal_structure: Option<String>,
    pub business_model: Vec<String>,
    pub document_count: i64,
}
