use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An approved investor record as persisted by the admin workflow.
/// `category` is free text here; the pool assembler normalizes it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvestorRow {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub focus: Vec<String>,
    pub description: String,
    pub investment_range: String,
}
