//! Gemini `generateContent` provider.
//!
//! Converts the universal request into Gemini's dialect: messages become
//! `contents` parts, the system prompt becomes `systemInstruction`, tool
//! definitions become `function_declarations` with uppercase schema types,
//! and the tool choice becomes a `function_calling_config`.

use reqwest::Client as HttpClient;
use serde_json::{Map, Value, json};

use crate::config::constants::urls;
use crate::llm::provider::{
    FinishReason, LlmError, LlmProvider, LlmRequest, LlmResponse, MessageRole, ToolCall,
};
use async_trait::async_trait;

pub struct GeminiProvider {
    api_key: String,
    http_client: HttpClient,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: String, http_client: HttpClient) -> Self {
        Self {
            api_key,
            http_client,
            base_url: urls::GEMINI_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn convert_request(&self, request: &LlmRequest) -> Value {
        let mut contents = Vec::new();
        let mut system_prompt = request.system_prompt.clone();

        for message in &request.messages {
            // System text is hoisted out of contents; Gemini accepts no
            // system role there, so everything that remains is user text.
            if message.role == MessageRole::System {
                system_prompt.get_or_insert_with(|| message.content.clone());
                continue;
            }
            contents.push(json!({
                "role": "user",
                "parts": [{ "text": message.content }]
            }));
        }

        let mut body = json!({ "contents": contents });

        if let Some(system) = system_prompt {
            body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
        }

        if let Some(tools) = &request.tools {
            let declarations: Vec<Value> = tools
                .iter()
                .map(|tool| {
                    json!({
                        "name": tool.name,
                        "description": tool.description,
                        "parameters": uppercase_schema_types(&tool.parameters),
                    })
                })
                .collect();
            body["tools"] = json!([{ "function_declarations": declarations }]);
        }

        if let Some(choice) = &request.tool_choice {
            body["tool_config"] = json!({ "function_calling_config": choice.to_gemini_value() });
        }

        let mut generation_config = Map::new();
        if let Some(max_tokens) = request.max_tokens {
            generation_config.insert("maxOutputTokens".to_string(), json!(max_tokens));
        }
        if let Some(temperature) = request.temperature {
            generation_config.insert("temperature".to_string(), json!(temperature));
        }
        if !generation_config.is_empty() {
            body["generationConfig"] = Value::Object(generation_config);
        }

        body
    }

    fn parse_response(&self, response: Value) -> Result<LlmResponse, LlmError> {
        let candidate = response["candidates"]
            .as_array()
            .and_then(|candidates| candidates.first())
            .ok_or_else(|| LlmError::Provider("no candidates in Gemini response".to_string()))?;

        let parts = candidate["content"]["parts"].as_array();

        let mut text_content = String::new();
        let mut tool_calls = Vec::new();

        if let Some(parts) = parts {
            for part in parts {
                if let Some(text) = part["text"].as_str() {
                    text_content.push_str(text);
                } else if let Some(function_call) = part["functionCall"]
                    .as_object()
                    .or_else(|| part["function_call"].as_object())
                {
                    let name = function_call
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string();
                    let args = function_call.get("args").cloned().unwrap_or(json!({}));
                    tool_calls.push(ToolCall {
                        id: format!("call_{}", tool_calls.len()),
                        name,
                        arguments: args.to_string(),
                    });
                }
            }
        }

        let finish_reason = match candidate["finishReason"].as_str() {
            Some("STOP") | None => {
                if tool_calls.is_empty() {
                    FinishReason::Stop
                } else {
                    FinishReason::ToolCalls
                }
            }
            Some("MAX_TOKENS") => FinishReason::Length,
            Some("SAFETY") => FinishReason::ContentFilter,
            Some(other) => FinishReason::Other(other.to_string()),
        };

        Ok(LlmResponse {
            content: if text_content.is_empty() {
                None
            } else {
                Some(text_content)
            },
            tool_calls,
            finish_reason,
        })
    }
}

/// Gemini's function-declaration dialect expects uppercase JSON-schema type
/// names (`OBJECT`, `ARRAY`, `STRING`, ...). Rewrites `type` values
/// recursively, leaving everything else untouched.
fn uppercase_schema_types(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => {
            let converted = map
                .iter()
                .map(|(key, value)| {
                    if key == "type" {
                        if let Some(name) = value.as_str() {
                            return (key.clone(), json!(name.to_uppercase()));
                        }
                    }
                    (key.clone(), uppercase_schema_types(value))
                })
                .collect();
            Value::Object(converted)
        }
        Value::Array(items) => Value::Array(items.iter().map(uppercase_schema_types).collect()),
        other => other.clone(),
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let body = self.convert_request(&request);
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, request.model, self.api_key
        );

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Network(format!("Gemini request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(LlmError::Authentication(format!(
                    "Gemini HTTP {status}: {error_text}"
                )));
            }
            if status.as_u16() == 429
                || error_text.contains("quota")
                || error_text.contains("rate limit")
            {
                return Err(LlmError::RateLimit);
            }
            return Err(LlmError::Provider(format!(
                "Gemini HTTP {status}: {error_text}"
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| LlmError::Provider(format!("failed to parse Gemini response: {e}")))?;

        self.parse_response(payload)
    }
}
