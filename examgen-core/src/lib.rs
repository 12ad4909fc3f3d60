//! # examgen-core
//!
//! Core library for examgen: turns a structured request of "question rules"
//! into AI-generated exam questions by fanning the rules out concurrently to
//! one of several interchangeable LLM providers and merging the structured
//! tool-call output into a uniform result list.
//!
//! ## Architecture
//!
//! - `llm` - provider abstraction: a unified request/response model, a
//!   provider factory keyed by name, and REST implementations for Gemini and
//!   OpenAI-compatible APIs (OpenAI, DeepSeek).
//! - `generation` - the orchestration core: prompt builder, the
//!   `submit_questions` tool contract, the per-rule adapter, the concurrent
//!   rule dispatcher, and the result assembler.
//! - `config` - environment-driven configuration and model/endpoint
//!   constants.
//!
//! Partial failure is a first-class outcome: every rule produces exactly one
//! [`generation::RuleOutcome`], and a failing rule never aborts its siblings.

pub mod config;
pub mod generation;
pub mod llm;

pub use config::Config;
pub use generation::{
    GeneratedQuestion, GenerationError, GenerationOutput, GenerationRequest, Generator, Rule,
    RuleFailure, RuleOutcome,
};
