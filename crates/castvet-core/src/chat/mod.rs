//! Chat layer: category context building, metric enrichment and query
//! routing.
//!
//! The chat layer is a pure projection over an [`EvaluationResult`]; it
//! draws nothing and stores nothing, so rebuilding the context for every
//! request is free of drift.
//!
//! [`EvaluationResult`]: crate::types::EvaluationResult

mod context;
mod enrich;
mod router;

pub use context::build_chat_context;
pub use enrich::MetricEnricher;
pub use router::route;
