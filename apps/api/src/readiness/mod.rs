pub mod checklist;
pub mod handlers;
pub mod heuristic;
pub mod locks;
pub mod models;
pub mod prompts;
pub mod reconciler;
pub mod scorer;
pub mod service;
