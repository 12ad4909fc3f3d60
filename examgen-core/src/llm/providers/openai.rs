//! OpenAI-compatible `chat/completions` provider.
//!
//! One implementation serves every API that speaks the OpenAI wire contract;
//! DeepSeek differs only in base URL, credentials, and default model.

use reqwest::Client as HttpClient;
use serde_json::{Value, json};

use crate::config::constants::urls;
use crate::llm::provider::{
    FinishReason, LlmError, LlmProvider, LlmRequest, LlmResponse, ToolCall,
};
use async_trait::async_trait;

pub struct OpenAiProvider {
    provider_name: String,
    api_key: String,
    http_client: HttpClient,
    base_url: String,
}

impl OpenAiProvider {
    pub fn openai(api_key: String, http_client: HttpClient) -> Self {
        Self {
            provider_name: "openai".to_string(),
            api_key,
            http_client,
            base_url: urls::OPENAI_API_BASE.to_string(),
        }
    }

    pub fn deepseek(api_key: String, http_client: HttpClient) -> Self {
        Self {
            provider_name: "deepseek".to_string(),
            api_key,
            http_client,
            base_url: urls::DEEPSEEK_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn convert_request(&self, request: &LlmRequest) -> Value {
        let mut messages = Vec::new();

        if let Some(system_prompt) = &request.system_prompt {
            messages.push(json!({ "role": "system", "content": system_prompt }));
        }

        for message in &request.messages {
            messages.push(json!({
                "role": message.role.as_openai_str(),
                "content": message.content
            }));
        }

        let mut body = json!({
            "model": request.model,
            "messages": messages,
        });

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }

        if let Some(tools) = &request.tools {
            let tools_json: Vec<Value> = tools
                .iter()
                .map(|tool| {
                    json!({
                        "type": "function",
                        "function": {
                            "name": tool.name,
                            "description": tool.description,
                            "parameters": tool.parameters,
                        }
                    })
                })
                .collect();
            body["tools"] = Value::Array(tools_json);
        }

        if let Some(choice) = &request.tool_choice {
            body["tool_choice"] = choice.to_openai_value();
        }

        body
    }

    fn parse_response(&self, response: Value) -> Result<LlmResponse, LlmError> {
        let choice = response["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .ok_or_else(|| {
                LlmError::Provider(format!("no choices in {} response", self.provider_name))
            })?;

        let message = choice.get("message").ok_or_else(|| {
            LlmError::Provider(format!("missing message in {} response", self.provider_name))
        })?;

        let content = message
            .get("content")
            .and_then(Value::as_str)
            .map(str::to_string);

        let tool_calls = message
            .get("tool_calls")
            .and_then(Value::as_array)
            .map(|calls| {
                calls
                    .iter()
                    .filter_map(|call| {
                        Some(ToolCall {
                            id: call.get("id")?.as_str()?.to_string(),
                            name: call.get("function")?.get("name")?.as_str()?.to_string(),
                            arguments: call
                                .get("function")
                                .and_then(|f| f.get("arguments"))
                                .and_then(Value::as_str)
                                .unwrap_or("{}")
                                .to_string(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        let finish_reason = match choice.get("finish_reason").and_then(Value::as_str) {
            Some("stop") | None => FinishReason::Stop,
            Some("length") => FinishReason::Length,
            Some("tool_calls") => FinishReason::ToolCalls,
            Some("content_filter") => FinishReason::ContentFilter,
            Some(other) => FinishReason::Other(other.to_string()),
        };

        Ok(LlmResponse {
            content,
            tool_calls,
            finish_reason,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let body = self.convert_request(&request);
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                LlmError::Network(format!("{} request failed: {e}", self.provider_name))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(LlmError::Authentication(format!(
                    "{} HTTP {status}: {error_text}",
                    self.provider_name
                )));
            }
            if status.as_u16() == 429 || error_text.contains("insufficient_quota") {
                return Err(LlmError::RateLimit);
            }
            return Err(LlmError::Provider(format!(
                "{} HTTP {status}: {error_text}",
                self.provider_name
            )));
        }

        let payload: Value = response.json().await.map_err(|e| {
            LlmError::Provider(format!(
                "failed to parse {} response: {e}",
                self.provider_name
            ))
        })?;

        self.parse_response(payload)
    }
}
