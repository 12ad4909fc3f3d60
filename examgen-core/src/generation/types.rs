//! Domain types for question generation.
//!
//! Wire names follow the inbound JSON contract (`Rules`, `BookDetails`,
//! `questionId`, `numberOfQuestions`, ...); Rust field names follow the
//! domain vocabulary.

use serde::{Deserialize, Serialize};

/// A book the questions should draw on. Immutable, caller-supplied.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookReference {
    #[serde(rename = "BookName")]
    pub name: String,
    #[serde(rename = "BookType")]
    pub kind: String,
}

/// One generation unit: how many questions of what type, difficulty,
/// cognitive level, and mark weight to produce.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Rule {
    #[serde(rename = "questionId")]
    pub id: u32,
    #[serde(rename = "questionType")]
    pub question_type: String,
    #[serde(rename = "difficultyLevel")]
    pub difficulty_level: String,
    #[serde(rename = "cognitiveLevel")]
    pub cognitive_level: String,
    #[serde(rename = "mark")]
    pub marks: u32,
    #[serde(rename = "numberOfQuestions")]
    pub count: u32,
}

/// A validated inbound generation request. Owned by one orchestrator
/// invocation; nothing mutates it after dispatch begins.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    pub module: String,
    pub content: String,
    /// Provider selector from the wire (`"gemini"`, `"openai"`,
    /// `"deepseek"`). Kept as a string so an unknown value can be rejected
    /// with a categorized error instead of a deserialization failure.
    #[serde(rename = "model")]
    pub provider: String,
    #[serde(rename = "Rules")]
    pub rules: Vec<Rule>,
    #[serde(rename = "BookDetails")]
    pub books: Vec<BookReference>,
}

/// One generated item exactly as the model submitted it through the
/// `submit_questions` tool. All four fields are required; a draft missing
/// any of them is a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub question: String,
    pub answer: String,
    pub question_latex: String,
    pub answer_latex: String,
}

/// Final output unit: a draft plus its originating rule's metadata. The
/// metadata is authoritative from the request, never trusted from the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedQuestion {
    pub question: String,
    #[serde(rename = "questionLatex")]
    pub question_latex: String,
    pub answer: String,
    #[serde(rename = "answerLatex")]
    pub answer_latex: String,
    #[serde(rename = "cognitiveLevel")]
    pub cognitive_level: String,
    #[serde(rename = "difficultyLevel")]
    pub difficulty_level: String,
    #[serde(rename = "questionType")]
    pub question_type: String,
    pub marks: u32,
}

/// A rule that produced no questions, with a human-readable cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFailure {
    pub rule_id: u32,
    pub reason: String,
}

/// The per-rule result of dispatch: generated questions or a recorded
/// failure, never both, never silently dropped.
#[derive(Debug, Clone)]
pub enum RuleOutcome {
    Success(Vec<GeneratedQuestion>),
    Failure(RuleFailure),
}

/// All outcomes of one generation request, in rule-declaration order.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    pub outcomes: Vec<RuleOutcome>,
}

impl GenerationOutput {
    /// Successful questions in rule-declaration order; within a rule, in the
    /// order the provider returned them.
    pub fn into_questions(self) -> Vec<GeneratedQuestion> {
        self.outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                RuleOutcome::Success(questions) => Some(questions),
                RuleOutcome::Failure(_) => None,
            })
            .flatten()
            .collect()
    }

    /// Recorded failures, in rule-declaration order.
    pub fn failures(&self) -> Vec<&RuleFailure> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                RuleOutcome::Failure(failure) => Some(failure),
                RuleOutcome::Success(_) => None,
            })
            .collect()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().len()
    }
}
