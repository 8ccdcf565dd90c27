//! Axum route handlers for the Matching API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::matching::matcher::{match_investors, MatchOutcome};
use crate::matching::models::MatchRequest;
use crate::state::AppState;

/// POST /api/v1/matches
///
/// Ranks up to three investors for a startup profile or free-text query.
/// 503 when the model is unreachable; 200 with an empty list when nothing fits.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchOutcome>, AppError> {
    let query = request.into_query()?;
    let outcome = match_investors(
        state.investors.as_ref(),
        &state.catalog,
        &state.invoker,
        &query,
    )
    .await?;
    Ok(Json(outcome))
}
