//! Investor matching: orchestrates the full match pipeline.
//!
//! Flow: approved investors + catalog → candidate pool → prompt →
//!       bounded model call → validate → join to full records.
//!
//! Upstream timeouts and outages propagate: there is no safe synthetic
//! substitute for a ranked match list. A reply that arrives but cannot be
//! used degrades to zero matches.

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{BoundedInvoker, InvokeError};
use crate::matching::assembler::assemble_results;
use crate::matching::models::{CandidateInvestor, MatchQuery, MatchResult};
use crate::matching::pool::assemble_candidate_pool;
use crate::matching::prompts::build_match_prompt;
use crate::matching::validator::validate_match_response;
use crate::store::InvestorStore;

/// Response from the match pipeline. `matches` holds 0 to 3 entries.
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    pub matches: Vec<MatchResult>,
    pub candidate_count: usize,
}

/// Runs one match request end to end.
pub async fn match_investors(
    investors: &dyn InvestorStore,
    catalog: &[CandidateInvestor],
    invoker: &BoundedInvoker,
    query: &MatchQuery,
) -> Result<MatchOutcome, AppError> {
    let persisted = investors.approved_investors().await?;
    let pool = assemble_candidate_pool(persisted, catalog);
    let prompt = build_match_prompt(query, &pool)?;

    let raw = match invoker.invoke(&prompt).await {
        Ok(raw) => Some(raw),
        Err(InvokeError::Malformed(msg)) => {
            warn!("Match model envelope unusable, returning no matches: {msg}");
            None
        }
        Err(e) => return Err(AppError::Upstream(e)),
    };

    let validated = match raw.as_deref().map(|r| validate_match_response(r, &pool)) {
        Some(Ok(validated)) => validated,
        Some(Err(e)) => {
            warn!("Match response rejected, returning no matches: {e}");
            Vec::new()
        }
        None => Vec::new(),
    };

    let matches = assemble_results(validated, &pool);
    info!(
        "Matched {} investor(s) from a pool of {}",
        matches.len(),
        pool.len()
    );

    Ok(MatchOutcome {
        matches,
        candidate_count: pool.len(),
    })
}
