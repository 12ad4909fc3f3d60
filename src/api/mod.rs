//! HTTP API handlers.

pub mod generate;
