//! Unified provider interface with API-specific role and tool-call handling.
//!
//! Different tool-calling APIs disagree on message roles and tool wire
//! shapes: OpenAI-compatible APIs take a `tools` array plus `tool_choice` and
//! answer with `tool_calls`; Gemini takes `function_declarations` plus a
//! `function_calling_config` and answers with `functionCall` parts. The types
//! here are the neutral middle ground each provider converts from and to.

use async_trait::async_trait;
use serde_json::{Value, json};

/// Universal chat request.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    pub system_prompt: Option<String>,
    pub tools: Option<Vec<ToolDefinition>>,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub tool_choice: Option<ToolChoice>,
}

/// Universal chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
}

impl MessageRole {
    /// Role string for OpenAI-compatible APIs.
    ///
    /// Gemini has no counterpart: it accepts no system role in `contents`,
    /// so its converter hoists system text into `systemInstruction` and
    /// sends the remaining messages as `user`.
    pub fn as_openai_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
        }
    }
}

/// Tool choice configuration across providers.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolChoice {
    /// Let the model decide whether to call tools.
    Auto,
    /// Force the model to call the named function.
    Function(String),
}

impl ToolChoice {
    pub fn function(name: impl Into<String>) -> Self {
        Self::Function(name.into())
    }

    /// OpenAI-compatible `tool_choice` value.
    pub fn to_openai_value(&self) -> Value {
        match self {
            ToolChoice::Auto => json!("auto"),
            ToolChoice::Function(name) => json!({
                "type": "function",
                "function": { "name": name }
            }),
        }
    }

    /// Gemini `function_calling_config` value.
    pub fn to_gemini_value(&self) -> Value {
        match self {
            ToolChoice::Auto => json!({ "mode": "AUTO" }),
            ToolChoice::Function(name) => json!({
                "mode": "ANY",
                "allowed_function_names": [name]
            }),
        }
    }
}

/// A function the model may call, described as a JSON Schema object.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolDefinition {
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// A tool invocation emitted by the model. `arguments` is the raw JSON
/// string exactly as the provider returned it.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

/// Universal chat response.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
    pub finish_reason: FinishReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    Other(String),
}

/// Universal LLM provider trait. Implementations issue exactly one remote
/// call per `generate` invocation and hold no per-call mutable state, so a
/// single instance is safe to share across concurrent rules.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name ("gemini", "openai", "deepseek").
    fn name(&self) -> &str;

    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("rate limit or quota exceeded")]
    RateLimit,
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("provider error: {0}")]
    Provider(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_choice_openai_formats() {
        assert_eq!(ToolChoice::Auto.to_openai_value(), json!("auto"));
        assert_eq!(
            ToolChoice::function("submit_questions").to_openai_value(),
            json!({ "type": "function", "function": { "name": "submit_questions" } })
        );
    }

    #[test]
    fn tool_choice_gemini_forces_named_function() {
        let value = ToolChoice::function("submit_questions").to_gemini_value();
        assert_eq!(value["mode"], "ANY");
        assert_eq!(value["allowed_function_names"][0], "submit_questions");
    }

    #[test]
    fn message_constructors_set_roles() {
        assert_eq!(Message::user("hi").role, MessageRole::User);
        assert_eq!(Message::system("be brief").role, MessageRole::System);
        assert_eq!(MessageRole::User.as_openai_str(), "user");
        assert_eq!(MessageRole::System.as_openai_str(), "system");
    }
}
