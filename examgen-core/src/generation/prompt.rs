//! Prompt builder: rule plus shared context in, instructional text out.

use std::fmt::Write;

use crate::generation::tool::SUBMIT_QUESTIONS_TOOL;
use crate::generation::types::{BookReference, Rule};

/// Build the instructional prompt for one rule. Pure and infallible: missing
/// optional context degrades to shorter text, never to an error.
pub fn build_prompt(module: &str, content: &str, books: &[BookReference], rule: &Rule) -> String {
    let book_references = if books.is_empty() {
        "None provided.".to_string()
    } else {
        books
            .iter()
            .map(|book| format!("- {} (Type: {})", book.name, book.kind))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let answer_length_instruction = if rule.marks <= 5 {
        "Provide a complete and comprehensive answer."
    } else {
        "Provide only the main and important points in the answer, do not elaborate."
    };

    let mut prompt = format!(
        "Context:\n\
         Module Name: {module}\n\
         Syllabus Content: {content}\n\
         Book References:\n\
         {book_references}\n\
         \n\
         Task:\n\
         Based ONLY on the provided Context, generate {count} unique question(s) with the \
         following characteristics:\n\
         - Question Type: {question_type}\n\
         - Difficulty Level: {difficulty}\n\
         - Cognitive Level: {cognitive}\n\
         - Marks per question: {marks}\n\
         \n\
         {answer_length_instruction}\n\
         \n\
         Output Requirements:\n\
         You MUST submit the result by invoking the '{tool}' function exactly once, passing \
         every generated question in a single call. Each item in the 'questions' array MUST \
         contain exactly these four string fields: 'question', 'answer', 'question_latex', \
         'answer_latex'. The LaTeX fields hold a LaTeX rendering of the question and answer. \
         Do not truncate any field and do not reply with free text outside the function call.",
        count = rule.count,
        question_type = rule.question_type,
        difficulty = rule.difficulty_level,
        cognitive = rule.cognitive_level,
        marks = rule.marks,
        tool = SUBMIT_QUESTIONS_TOOL,
    );

    if is_multiple_choice(&rule.question_type) {
        // Infallible for String targets.
        let _ = write!(
            prompt,
            "\n\n\
             For Multiple Choice Questions (MCQ):\n\
             - The 'question' field MUST include the question stem followed by exactly four \
             options labeled A, B, C, and D.\n\
             - The 'answer' field MUST contain only the letter of the correct option.\n\
             - The 'question_latex' and 'answer_latex' fields MUST render the stem and the \
             four options as an itemized LaTeX list."
        );
    }

    prompt
}

fn is_multiple_choice(question_type: &str) -> bool {
    let normalized = question_type.to_lowercase();
    normalized.contains("multiple choice") || normalized.contains("mcq")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(question_type: &str, marks: u32, count: u32) -> Rule {
        Rule {
            id: 1,
            question_type: question_type.to_string(),
            difficulty_level: "Medium".to_string(),
            cognitive_level: "Apply".to_string(),
            marks,
            count,
        }
    }

    fn books() -> Vec<BookReference> {
        vec![
            BookReference {
                name: "Strang".to_string(),
                kind: "Textbook".to_string(),
            },
            BookReference {
                name: "Axler".to_string(),
                kind: "Reference".to_string(),
            },
        ]
    }

    #[test]
    fn embeds_module_content_and_books() {
        let prompt = build_prompt(
            "Linear Algebra",
            "Eigenvalues",
            &books(),
            &rule("Short Answer", 5, 2),
        );

        assert!(prompt.contains("Module Name: Linear Algebra"));
        assert!(prompt.contains("Syllabus Content: Eigenvalues"));
        assert!(prompt.contains("- Strang (Type: Textbook)"));
        assert!(prompt.contains("- Axler (Type: Reference)"));
    }

    #[test]
    fn encodes_rule_constraints_and_tool_contract() {
        let prompt = build_prompt("M", "C", &[], &rule("Short Answer", 5, 3));

        assert!(prompt.contains("generate 3 unique question(s)"));
        assert!(prompt.contains("Question Type: Short Answer"));
        assert!(prompt.contains("Difficulty Level: Medium"));
        assert!(prompt.contains("Cognitive Level: Apply"));
        assert!(prompt.contains("Marks per question: 5"));
        assert!(prompt.contains(SUBMIT_QUESTIONS_TOOL));
        for field in ["'question'", "'answer'", "'question_latex'", "'answer_latex'"] {
            assert!(prompt.contains(field), "missing {field}");
        }
        assert!(prompt.contains("Do not truncate"));
    }

    #[test]
    fn answer_length_instruction_follows_marks() {
        let short = build_prompt("M", "C", &[], &rule("Essay", 5, 1));
        assert!(short.contains("complete and comprehensive answer"));

        let long = build_prompt("M", "C", &[], &rule("Essay", 10, 1));
        assert!(long.contains("main and important points"));
    }

    #[test]
    fn mcq_instruction_only_for_multiple_choice() {
        let essay = build_prompt("M", "C", &[], &rule("Essay", 5, 1));
        assert!(!essay.contains("exactly four options"));

        for mcq_type in ["Multiple Choice(MCQ)", "MCQ", "multiple choice"] {
            let mcq = build_prompt("M", "C", &[], &rule(mcq_type, 5, 1));
            assert!(mcq.contains("exactly four options"), "for {mcq_type}");
            assert!(mcq.contains("labeled A, B, C, and D"));
        }
    }

    #[test]
    fn empty_context_degrades_gracefully() {
        let prompt = build_prompt("", "", &[], &rule("Short Answer", 1, 1));
        assert!(prompt.contains("Book References:\nNone provided."));
        assert!(prompt.contains(SUBMIT_QUESTIONS_TOOL));
    }
}
