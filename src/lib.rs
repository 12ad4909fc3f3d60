//! HTTP surface for the examgen question generation service.
//!
//! The binary wires [`examgen_core`] behind a small axum API: one
//! generation endpoint guarded by bearer auth, plus a health probe.

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod routes;
