//! The `submit_questions` tool contract shared by every provider.

use serde::Deserialize;
use serde_json::json;

use crate::generation::error::GenerationError;
use crate::generation::types::QuestionDraft;
use crate::llm::ToolDefinition;

/// Name of the function every provider is instructed to call.
pub const SUBMIT_QUESTIONS_TOOL: &str = "submit_questions";

/// Tool definition with the canonical (lowercase JSON Schema) parameter
/// shape. The Gemini provider uppercases the type names on conversion.
pub fn submit_questions_tool() -> ToolDefinition {
    ToolDefinition::function(
        SUBMIT_QUESTIONS_TOOL,
        "Submits a list of generated questions.",
        json!({
            "type": "object",
            "properties": {
                "questions": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "question": { "type": "string" },
                            "answer": { "type": "string" },
                            "question_latex": { "type": "string" },
                            "answer_latex": { "type": "string" }
                        },
                        "required": ["question", "answer", "question_latex", "answer_latex"]
                    }
                }
            },
            "required": ["questions"]
        }),
    )
}

#[derive(Debug, Deserialize)]
struct SubmitQuestionsArgs {
    questions: Vec<QuestionDraft>,
}

/// Parse the tool call's argument payload into drafts. Invalid JSON or a
/// structurally wrong payload (including drafts with missing fields) is a
/// [`GenerationError::ResponseParse`] carrying the raw payload.
pub fn parse_draft_payload(arguments: &str) -> Result<Vec<QuestionDraft>, GenerationError> {
    serde_json::from_str::<SubmitQuestionsArgs>(arguments)
        .map(|args| args.questions)
        .map_err(|e| GenerationError::ResponseParse {
            detail: e.to_string(),
            raw: arguments.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_definition_matches_contract() {
        let tool = submit_questions_tool();
        assert_eq!(tool.name, SUBMIT_QUESTIONS_TOOL);

        let items = &tool.parameters["properties"]["questions"]["items"];
        let required: Vec<&str> = items["required"]
            .as_array()
            .expect("required array")
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(
            required,
            vec!["question", "answer", "question_latex", "answer_latex"]
        );
    }

    #[test]
    fn parses_well_formed_payload() {
        let payload = json!({
            "questions": [{
                "question": "What is 2+2?",
                "answer": "4",
                "question_latex": "What is $2+2$?",
                "answer_latex": "$4$"
            }]
        })
        .to_string();

        let drafts = parse_draft_payload(&payload).expect("valid payload");
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].question, "What is 2+2?");
    }

    #[test]
    fn empty_questions_array_is_valid() {
        let drafts = parse_draft_payload(r#"{"questions":[]}"#).expect("valid payload");
        assert!(drafts.is_empty());
    }

    #[test]
    fn missing_field_is_a_parse_error_with_raw_payload() {
        let payload = r#"{"questions":[{"question":"q","answer":"a"}]}"#;
        let err = parse_draft_payload(payload).expect_err("missing fields");
        match err {
            GenerationError::ResponseParse { raw, .. } => assert_eq!(raw, payload),
            other => panic!("expected ResponseParse, got {other:?}"),
        }
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = parse_draft_payload("not json at all").expect_err("invalid json");
        assert!(matches!(err, GenerationError::ResponseParse { .. }));
    }
}
