//! # castvet-runtime
//!
//! Async orchestration layer over the deterministic engine in
//! `castvet-core`.
//!
//! The runtime adds what the core deliberately leaves out:
//! - parallel fan-out of the three analyst generations
//! - pluggable generation backends (the built-in simulator, or a remote
//!   model behind the `openai` feature)
//! - deterministic fallback: any backend failure degrades to the core
//!   simulators for the same inputs, never to an error
//! - an in-memory result cache that chat requests resolve against
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use castvet_runtime::{Orchestrator, SimulatorBackend};
//!
//! let orchestrator = Orchestrator::new(Arc::new(SimulatorBackend::new()));
//! let result = orchestrator.evaluate_cached(&ctx).await?;
//! let answer = orchestrator.chat("demo-1", ctx.content_type, "what is the roi?").await?;
//! ```

pub mod backends;
pub mod cache;
pub mod orchestrator;
pub mod prompts;

pub use backends::{BackendError, GenerationBackend, SimulatorBackend};
pub use cache::EvaluationCache;
pub use orchestrator::{Orchestrator, RuntimeError};
pub use prompts::PromptStore;

#[cfg(feature = "openai")]
pub use backends::OpenAiBackend;
