//! Contract review with three chained LLM personas.
//!
//! An analyst extracts the payment, liability, and jurisdiction clauses, a
//! compliance officer audits them against the house playbook, and, when the
//! audit reports a violation, a negotiator drafts redlines and a cover email.

pub mod agents;
pub mod config;
pub mod errors;
pub mod extract;
pub mod fixture;
pub mod pipeline;
pub mod presenter;
pub mod prompts;
pub mod sink;

pub use pipeline::{detect_violation, PipelineResult, ReviewAgents, ReviewPipeline};
