//! Prompt construction
//!
//! Turns a task and a code snippet into the single prompt string sent to
//! `/api/generate`. The snippet is treated as opaque text.

use crate::defaults::prompt as prompt_defaults;

/// What the model is asked to do with a snippet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    /// Free-form request; the description is the prompt
    Generate,
    /// Explain what the code does
    Explain { language: Option<String> },
    /// Review the code and suggest improvements
    Review { language: Option<String> },
    /// Write unit tests for a function
    Test { framework: String },
    /// Find and fix bugs, optionally given the observed error
    Debug { error: Option<String> },
    /// Refactor towards the given goals
    Refactor { goals: String },
}

impl TaskKind {
    /// Explain code written in `language`
    pub fn explain(language: impl Into<String>) -> Self {
        Self::Explain {
            language: non_empty(language.into()),
        }
    }

    /// Review code written in `language`
    pub fn review(language: impl Into<String>) -> Self {
        Self::Review {
            language: non_empty(language.into()),
        }
    }

    /// Generate tests with `framework`, or the default framework when empty
    pub fn test(framework: impl Into<String>) -> Self {
        Self::Test {
            framework: non_empty(framework.into())
                .unwrap_or_else(|| prompt_defaults::TEST_FRAMEWORK.to_string()),
        }
    }

    /// Debug with an optional error message
    pub fn debug(error: impl Into<String>) -> Self {
        Self::Debug {
            error: non_empty(error.into()),
        }
    }

    /// Refactor towards `goals`, or the default goals when empty
    pub fn refactor(goals: impl Into<String>) -> Self {
        Self::Refactor {
            goals: non_empty(goals.into())
                .unwrap_or_else(|| prompt_defaults::REFACTOR_GOALS.to_string()),
        }
    }

    /// The instruction line placed above the code block
    pub fn instruction(&self) -> String {
        match self {
            Self::Generate => String::new(),
            Self::Explain { language: None } => "Explain this code:".to_string(),
            Self::Explain {
                language: Some(lang),
            } => format!("Explain this {lang} code:"),
            Self::Review { language: None } => {
                "Review this code and suggest improvements:".to_string()
            }
            Self::Review {
                language: Some(lang),
            } => format!("Review this {lang} code and suggest improvements:"),
            Self::Test { framework } => {
                format!("Generate unit tests using {framework} for this function:")
            }
            Self::Debug { error: None } => "Find and fix the bugs in this code:".to_string(),
            Self::Debug { error: Some(error) } => {
                format!("Find and fix the bugs in this code:\n\nError: {error}")
            }
            Self::Refactor { goals } => format!("Refactor this code to {goals}:"),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Wrap `code` in a fenced block
pub fn code_block(code: &str) -> String {
    format!("```\n{code}\n```")
}

/// Build the prompt for `kind`
///
/// For [`TaskKind::Generate`] `input` is the task description and is returned
/// unchanged; for every other kind it is the snippet, embedded below the
/// instruction line.
pub fn build_prompt(kind: &TaskKind, input: &str) -> String {
    match kind {
        TaskKind::Generate => input.to_string(),
        _ => format!("{}\n\n{}", kind.instruction(), code_block(input)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNIPPET: &str = "def add(a, b):\n    return a + b";

    #[test]
    fn test_explain_with_and_without_language() {
        assert_eq!(
            build_prompt(&TaskKind::explain("Python"), SNIPPET),
            format!("Explain this Python code:\n\n```\n{SNIPPET}\n```")
        );
        assert_eq!(
            build_prompt(&TaskKind::explain(""), "x = 1"),
            "Explain this code:\n\n```\nx = 1\n```"
        );
    }

    #[test]
    fn test_review_prompt() {
        assert_eq!(
            build_prompt(&TaskKind::review("Rust"), "fn f() {}"),
            "Review this Rust code and suggest improvements:\n\n```\nfn f() {}\n```"
        );
        assert!(
            build_prompt(&TaskKind::review(""), "x").starts_with("Review this code and suggest")
        );
    }

    #[test]
    fn test_test_prompt_defaults_to_pytest() {
        assert_eq!(
            TaskKind::test(""),
            TaskKind::Test {
                framework: "pytest".to_string()
            }
        );
        assert!(
            build_prompt(&TaskKind::test("unittest"), SNIPPET)
                .starts_with("Generate unit tests using unittest for this function:\n\n```")
        );
    }

    #[test]
    fn test_debug_prompt_includes_error() {
        let prompt = build_prompt(&TaskKind::debug("ZeroDivisionError"), "1 / 0");
        assert_eq!(
            prompt,
            "Find and fix the bugs in this code:\n\nError: ZeroDivisionError\n\n```\n1 / 0\n```"
        );
        let prompt = build_prompt(&TaskKind::debug(""), "1 / 0");
        assert_eq!(prompt, "Find and fix the bugs in this code:\n\n```\n1 / 0\n```");
    }

    #[test]
    fn test_refactor_default_goals() {
        let prompt = build_prompt(&TaskKind::refactor(""), "x");
        assert!(prompt.starts_with("Refactor this code to improve readability and performance:"));
        let prompt = build_prompt(&TaskKind::refactor("use iterators"), "x");
        assert!(prompt.starts_with("Refactor this code to use iterators:"));
    }

    #[test]
    fn test_generate_is_verbatim() {
        let description = "Write a function that computes a factorial";
        assert_eq!(build_prompt(&TaskKind::Generate, description), description);
    }

    #[test]
    fn test_snippet_is_opaque() {
        let weird = "```\n}}{{ not code";
        assert!(build_prompt(&TaskKind::explain(""), weird).contains(weird));
    }
}
