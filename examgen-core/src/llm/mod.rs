//! LLM provider abstraction.
//!
//! A unified request/response model for tool-calling chat APIs, with
//! provider-specific REST implementations behind the [`provider::LlmProvider`]
//! trait and a name-keyed [`factory::ProviderFactory`] for construction.

pub mod factory;
pub mod provider;
pub mod providers;

use std::sync::LazyLock;

pub use factory::{ProviderConfig, ProviderFactory};
pub use provider::{
    FinishReason, LlmError, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole,
    ToolCall, ToolChoice, ToolDefinition,
};

// One HTTP client per process, shared by every provider instance. reqwest
// clients are cheap to clone and safe for concurrent use.
static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

/// Handle to the process-wide HTTP client.
pub fn http_client() -> reqwest::Client {
    HTTP_CLIENT.clone()
}
