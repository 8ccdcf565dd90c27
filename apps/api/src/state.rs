use std::sync::Arc;

use crate::llm_client::BoundedInvoker;
use crate::matching::models::CandidateInvestor;
use crate::readiness::locks::StartupLocks;
use crate::store::{InvestorStore, StartupStore, TaskStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub startups: Arc<dyn StartupStore>,
    pub investors: Arc<dyn InvestorStore>,
    pub tasks: Arc<dyn TaskStore>,
    /// Single deadline-bounded model call. Shared by matching and readiness.
    pub invoker: BoundedInvoker,
    /// Reference catalog appended to persisted investors on every match.
    pub catalog: Arc<Vec<CandidateInvestor>>,
    pub locks: StartupLocks,
}

#[cfg(test)]
impl AppState {
    pub fn for_tests(store: Arc<crate::store::memory::MemoryStore>, invoker: BoundedInvoker) -> Self {
        Self {
            startups: store.clone(),
            investors: store.clone(),
            tasks: store,
            invoker,
            catalog: Arc::new(crate::matching::catalog::reference_catalog()),
            locks: StartupLocks::new(),
        }
    }
}
