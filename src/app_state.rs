//! Shared application state for the HTTP handlers.

use std::sync::Arc;

use examgen_core::Config;
use examgen_core::generation::Generator;

/// State shared by all axum handlers. The generator is stateless per
/// request, so no interior locking is needed.
pub struct AppState {
    pub generator: Generator,
}

/// Arc-wrapped state used with axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            generator: Generator::new(config),
        }
    }

    /// Build state around a pre-assembled generator; tests use this to
    /// inject mock providers.
    pub fn with_generator(generator: Generator) -> Self {
        Self { generator }
    }
}
