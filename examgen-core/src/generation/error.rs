//! Error taxonomy for the generation core.

use thiserror::Error;

use crate::llm::LlmError;

/// Errors produced while generating questions.
///
/// Only [`GenerationError::UnsupportedProvider`] escapes
/// [`crate::generation::Generator::generate`]; the other variants are
/// contained at the rule level and recorded as
/// [`crate::generation::RuleOutcome::Failure`].
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The request named a provider the factory does not know. Fatal for the
    /// whole request, raised before any rule is dispatched.
    #[error("unsupported model provider: {0}")]
    UnsupportedProvider(String),

    /// The remote service was unreachable or rejected the call (transport
    /// failure, authentication, quota, 5xx, timeout).
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The remote call succeeded but the tool payload was unusable. Carries
    /// the raw payload for diagnostics.
    #[error("unusable model response: {detail}")]
    ResponseParse { detail: String, raw: String },
}

impl From<LlmError> for GenerationError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::UnsupportedProvider(name) => GenerationError::UnsupportedProvider(name),
            other => GenerationError::ProviderUnavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn llm_errors_map_to_generation_variants() {
        let err: GenerationError = LlmError::UnsupportedProvider("x".to_string()).into();
        assert!(matches!(err, GenerationError::UnsupportedProvider(name) if name == "x"));

        let err: GenerationError = LlmError::RateLimit.into();
        assert!(matches!(err, GenerationError::ProviderUnavailable(_)));

        let err: GenerationError = LlmError::Network("connection reset".to_string()).into();
        assert!(matches!(err, GenerationError::ProviderUnavailable(msg) if msg.contains("connection reset")));
    }
}
