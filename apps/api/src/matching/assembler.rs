use std::collections::HashMap;

use crate::matching::models::{CandidateInvestor, MatchResult};
use crate::matching::validator::ValidatedMatch;

/// Joins validated ids back to their full candidate records, keeping the
/// model's ranking order. The model only ever sees and returns ids.
pub fn assemble_results(
    validated: Vec<ValidatedMatch>,
    pool: &[CandidateInvestor],
) -> Vec<MatchResult> {
    let by_id: HashMap<&str, &CandidateInvestor> =
        pool.iter().map(|c| (c.id.as_str(), c)).collect();

    validated
        .into_iter()
        .filter_map(|m| {
            by_id.get(m.id.as_str()).map(|investor| MatchResult {
                investor: (*investor).clone(),
                reason: m.reason,
            })
        })
        .collect()
}
