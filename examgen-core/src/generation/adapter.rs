//! Per-rule bridge between a prompt and a provider's tool-call response.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::generation::error::GenerationError;
use crate::generation::tool::{SUBMIT_QUESTIONS_TOOL, parse_draft_payload, submit_questions_tool};
use crate::generation::types::QuestionDraft;
use crate::llm::{LlmProvider, LlmRequest, Message, ToolChoice};

/// Issues exactly one remote call per [`QuestionAdapter::submit`] invocation
/// against a shared provider instance. The adapter does not own the provider
/// lifecycle; the same instance is reused across all rules of a request.
pub struct QuestionAdapter {
    provider: Arc<dyn LlmProvider>,
    model: String,
    timeout: Duration,
}

impl QuestionAdapter {
    pub fn new(provider: Arc<dyn LlmProvider>, model: String, timeout: Duration) -> Self {
        Self {
            provider,
            model,
            timeout,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Submit one prompt and return the drafts the model produced.
    ///
    /// A model that answers in free text instead of invoking the tool
    /// contributes an empty draft list (logged as a warning, not an error).
    /// A malformed tool payload is a [`GenerationError::ResponseParse`];
    /// transport or provider failure, including timeout, is a
    /// [`GenerationError::ProviderUnavailable`].
    pub async fn submit(&self, prompt: &str) -> Result<Vec<QuestionDraft>, GenerationError> {
        let request = LlmRequest {
            messages: vec![Message::user(prompt)],
            system_prompt: None,
            tools: Some(vec![submit_questions_tool()]),
            model: self.model.clone(),
            max_tokens: None,
            temperature: None,
            tool_choice: Some(ToolChoice::function(SUBMIT_QUESTIONS_TOOL)),
        };

        let response = tokio::time::timeout(self.timeout, self.provider.generate(request))
            .await
            .map_err(|_| {
                GenerationError::ProviderUnavailable(format!(
                    "{} call timed out after {:?}",
                    self.provider.name(),
                    self.timeout
                ))
            })?
            .map_err(GenerationError::from)?;

        let Some(call) = response
            .tool_calls
            .iter()
            .find(|call| call.name == SUBMIT_QUESTIONS_TOOL)
        else {
            warn!(
                provider = self.provider.name(),
                finish_reason = ?response.finish_reason,
                text = response.content.as_deref().unwrap_or_default(),
                "model answered without invoking {SUBMIT_QUESTIONS_TOOL}"
            );
            return Ok(Vec::new());
        };

        let drafts = parse_draft_payload(&call.arguments)?;
        debug!(
            provider = self.provider.name(),
            drafts = drafts.len(),
            "received tool-call payload"
        );
        Ok(drafts)
    }
}
