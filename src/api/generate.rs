//! The generation endpoint: validate, dispatch, shape the response.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use examgen_core::generation::{GeneratedQuestion, GenerationError, GenerationRequest};

use crate::app_state::SharedState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub generated_questions: Vec<GeneratedQuestion>,
    pub failed_rules: usize,
}

type ApiError = (StatusCode, Json<Value>);

fn bad_request(message: String) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

/// POST /api/generate
///
/// Accepts a generation request, fans out one model call per rule, and
/// returns every generated question plus the count of rules that failed.
/// An unknown provider selector is a 400; per-rule provider failures are
/// reported in `failed_rules`, never as an error status.
pub async fn generate(
    State(state): State<SharedState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    validate(&request)?;

    info!(
        module = %request.module,
        provider = %request.provider,
        rules = request.rules.len(),
        "generation request received"
    );

    let output = state
        .generator
        .generate(&request)
        .await
        .map_err(|err| match err {
            GenerationError::UnsupportedProvider(_) => bad_request(err.to_string()),
            other => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": other.to_string() })),
            ),
        })?;

    let failed_rules = output.failure_count();
    Ok(Json(GenerateResponse {
        generated_questions: output.into_questions(),
        failed_rules,
    }))
}

fn validate(request: &GenerationRequest) -> Result<(), ApiError> {
    if request.module.trim().is_empty() {
        return Err(bad_request("module must not be empty".to_string()));
    }
    if request.content.trim().is_empty() {
        return Err(bad_request("content must not be empty".to_string()));
    }
    if request.rules.is_empty() {
        return Err(bad_request(
            "Rules must contain at least one rule".to_string(),
        ));
    }
    for rule in &request.rules {
        if rule.count == 0 {
            return Err(bad_request(format!(
                "rule {}: numberOfQuestions must be at least 1",
                rule.id
            )));
        }
        if rule.marks == 0 {
            return Err(bad_request(format!(
                "rule {}: mark must be at least 1",
                rule.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::AppState;
    use crate::config::ServerConfig;
    use crate::routes::create_router;
    use async_trait::async_trait;
    use axum::body::Body;
    use examgen_core::Config;
    use examgen_core::generation::Generator;
    use examgen_core::llm::{
        FinishReason, LlmError, LlmProvider, LlmRequest, LlmResponse, ProviderFactory, ToolCall,
    };
    use http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct CannedProvider {
        response: LlmResponse,
    }

    #[async_trait]
    impl LlmProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        async fn generate(&self, _request: LlmRequest) -> Result<LlmResponse, LlmError> {
            Ok(self.response.clone())
        }
    }

    fn canned_router() -> axum::Router {
        let response = LlmResponse {
            content: None,
            tool_calls: vec![ToolCall {
                id: "call_0".to_string(),
                name: "submit_questions".to_string(),
                arguments: serde_json::json!({
                    "questions": [{
                        "question": "\"What is a pivot?\"",
                        "answer": "The leading entry of a row.",
                        "question_latex": "What is a pivot?",
                        "answer_latex": "The leading entry of a row."
                    }]
                })
                .to_string(),
            }],
            finish_reason: FinishReason::ToolCalls,
        };

        let provider: Arc<dyn LlmProvider> = Arc::new(CannedProvider { response });
        let mut factory = ProviderFactory::new();
        factory.register("gemini", move |_config| Arc::clone(&provider));

        let state = Arc::new(AppState::with_generator(Generator::with_factory(
            Config::default(),
            factory,
        )));
        let config = ServerConfig {
            bind: "127.0.0.1:0".parse().unwrap(),
            allow_remote: false,
            auth_token: None,
            cors_origins: vec!["*".to_string()],
        };
        create_router(state, &config)
    }

    fn request_body(provider: &str, rules: serde_json::Value) -> String {
        serde_json::json!({
            "module": "Linear Algebra",
            "content": "Row reduction",
            "model": provider,
            "Rules": rules,
            "BookDetails": []
        })
        .to_string()
    }

    fn rule_json(id: u32, count: u32, marks: u32) -> serde_json::Value {
        serde_json::json!({
            "questionId": id,
            "questionType": "Short Answer",
            "difficultyLevel": "Easy",
            "cognitiveLevel": "Recall",
            "mark": marks,
            "numberOfQuestions": count
        })
    }

    async fn post_generate(body: String) -> (StatusCode, serde_json::Value) {
        let resp = canned_router()
            .oneshot(
                Request::post("/api/generate")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn returns_generated_questions_with_rule_metadata() {
        let body = request_body("gemini", serde_json::json!([rule_json(1, 1, 5)]));
        let (status, json) = post_generate(body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["failed_rules"], 0);
        let questions = json["generated_questions"].as_array().unwrap();
        assert_eq!(questions.len(), 1);
        // Wrapping quotes stripped, rule metadata attached.
        assert_eq!(questions[0]["question"], "What is a pivot?");
        assert_eq!(questions[0]["difficultyLevel"], "Easy");
        assert_eq!(questions[0]["questionType"], "Short Answer");
        assert_eq!(questions[0]["marks"], 5);
    }

    #[tokio::test]
    async fn unknown_provider_is_a_400() {
        let body = request_body("unsupported-x", serde_json::json!([rule_json(1, 1, 5)]));
        let (status, json) = post_generate(body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            json["error"]
                .as_str()
                .unwrap()
                .contains("unsupported model provider")
        );
    }

    #[tokio::test]
    async fn empty_rules_is_a_400() {
        let body = request_body("gemini", serde_json::json!([]));
        let (status, json) = post_generate(body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("Rules"));
    }

    #[tokio::test]
    async fn zero_question_count_is_a_400() {
        let body = request_body("gemini", serde_json::json!([rule_json(3, 0, 5)]));
        let (status, json) = post_generate(body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("rule 3"));
    }
}
