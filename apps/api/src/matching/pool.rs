use std::collections::HashSet;

use crate::matching::models::CandidateInvestor;
use crate::models::investor::InvestorRow;

/// Merges approved investor records with the reference catalog.
///
/// Persisted records come first, catalog entries are appended, and ids are
/// unique across the result: on collision the persisted record wins.
pub fn assemble_candidate_pool(
    persisted: Vec<InvestorRow>,
    catalog: &[CandidateInvestor],
) -> Vec<CandidateInvestor> {
    let mut seen = HashSet::with_capacity(persisted.len() + catalog.len());
    let mut pool = Vec::with_capacity(persisted.len() + catalog.len());

    let persisted = persisted.into_iter().map(CandidateInvestor::from);
    for candidate in persisted.chain(catalog.iter().cloned()) {
        if seen.insert(candidate.id.clone()) {
            pool.push(candidate);
        }
    }

    pool
}
