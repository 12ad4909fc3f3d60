//! Result assembler: draft plus rule metadata into the final question.

use crate::generation::types::{GeneratedQuestion, QuestionDraft, Rule};

/// Strip at most one leading and one trailing `"` character. Providers
/// sometimes wrap string fields in stray quotes; this normalization is
/// defensive and idempotent on already-stripped text.
pub fn strip_wrapping_quotes(text: &str) -> &str {
    let text = text.strip_prefix('"').unwrap_or(text);
    text.strip_suffix('"').unwrap_or(text)
}

/// Merge a draft with its originating rule. The rule's metadata is
/// authoritative; nothing from the draft overrides it.
pub fn assemble(draft: QuestionDraft, rule: &Rule) -> GeneratedQuestion {
    GeneratedQuestion {
        question: strip_wrapping_quotes(&draft.question).to_string(),
        question_latex: strip_wrapping_quotes(&draft.question_latex).to_string(),
        answer: strip_wrapping_quotes(&draft.answer).to_string(),
        answer_latex: strip_wrapping_quotes(&draft.answer_latex).to_string(),
        cognitive_level: rule.cognitive_level.clone(),
        difficulty_level: rule.difficulty_level.clone(),
        question_type: rule.question_type.clone(),
        marks: rule.marks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_one_wrapping_quote_pair() {
        assert_eq!(strip_wrapping_quotes("\"hello\""), "hello");
        assert_eq!(strip_wrapping_quotes("hello"), "hello");
    }

    #[test]
    fn strips_asymmetric_quotes_once_each() {
        assert_eq!(strip_wrapping_quotes("\"leading"), "leading");
        assert_eq!(strip_wrapping_quotes("trailing\""), "trailing");
    }

    #[test]
    fn stripping_is_idempotent_on_stripped_text() {
        let once = strip_wrapping_quotes("\"hello\"");
        assert_eq!(strip_wrapping_quotes(once), once);
    }

    #[test]
    fn interior_quotes_survive() {
        assert_eq!(
            strip_wrapping_quotes("say \"eigen\" aloud"),
            "say \"eigen\" aloud"
        );
    }

    #[test]
    fn empty_and_lone_quote_inputs() {
        assert_eq!(strip_wrapping_quotes(""), "");
        assert_eq!(strip_wrapping_quotes("\""), "");
        assert_eq!(strip_wrapping_quotes("\"\""), "");
    }

    #[test]
    fn rule_metadata_is_authoritative() {
        let rule = Rule {
            id: 4,
            question_type: "Essay".to_string(),
            difficulty_level: "Hard".to_string(),
            cognitive_level: "Analyze".to_string(),
            marks: 10,
            count: 1,
        };
        let draft = QuestionDraft {
            question: "\"Discuss rank-nullity.\"".to_string(),
            answer: "\"See notes.\"".to_string(),
            question_latex: "Discuss rank-nullity.".to_string(),
            answer_latex: "See notes.".to_string(),
        };

        let question = assemble(draft, &rule);
        assert_eq!(question.question, "Discuss rank-nullity.");
        assert_eq!(question.answer, "See notes.");
        assert_eq!(question.question_type, "Essay");
        assert_eq!(question.difficulty_level, "Hard");
        assert_eq!(question.cognitive_level, "Analyze");
        assert_eq!(question.marks, 10);
    }
}
