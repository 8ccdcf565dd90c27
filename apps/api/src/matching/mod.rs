// Matching engine: candidate pool → prompt → bounded model call → validation → results.
// All model calls go through llm_client::BoundedInvoker.

pub mod assembler;
pub mod catalog;
pub mod handlers;
pub mod matcher;
pub mod models;
pub mod pool;
pub mod prompts;
pub mod validator;
