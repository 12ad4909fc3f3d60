//! The generation orchestration core.
//!
//! Data flow: `GenerationRequest` -> per rule: [`prompt::build_prompt`] ->
//! [`adapter::QuestionAdapter::submit`] (concurrent, bounded) ->
//! [`assembler::assemble`] -> ordered question list plus recorded per-rule
//! failures. A failing rule is converted to data, never propagated across
//! the fan-in boundary; only an unsupported provider selector aborts the
//! whole request.

pub mod adapter;
pub mod assembler;
pub mod error;
pub mod orchestrator;
pub mod prompt;
pub mod tool;
pub mod types;

pub use adapter::QuestionAdapter;
pub use error::GenerationError;
pub use orchestrator::Generator;
pub use types::{
    BookReference, GeneratedQuestion, GenerationOutput, GenerationRequest, QuestionDraft, Rule,
    RuleFailure, RuleOutcome,
};
