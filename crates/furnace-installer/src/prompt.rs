//! Interactive prompts.

use dialoguer::{theme::ColorfulTheme, Confirm, MultiSelect};

/// A prompt could not be answered (closed terminal, interrupted input, ...).
#[derive(Debug, thiserror::Error)]
#[error("Prompt failed: {0}")]
pub struct PromptError(pub String);

/// Source of answers to installer questions.
pub trait Prompter {
    /// Ask the user to pick any number of `choices`. Returns the selected indices.
    fn multiselect(&self, label: &str, choices: &[&str]) -> Result<Vec<usize>, PromptError>;

    /// Ask a yes/no question.
    fn confirm(&self, label: &str, hint: Option<&str>, default: bool) -> Result<bool, PromptError>;
}

/// Prompts on the terminal with dialoguer.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn multiselect(&self, label: &str, choices: &[&str]) -> Result<Vec<usize>, PromptError> {
        MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .items(choices)
            .interact()
            .map_err(|e| PromptError(e.to_string()))
    }

    fn confirm(&self, label: &str, hint: Option<&str>, default: bool) -> Result<bool, PromptError> {
        let prompt = match hint {
            Some(hint) => format!("{} ({})", label, hint),
            None => label.to_string(),
        };

        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| PromptError(e.to_string()))
    }
}

/// Answers every prompt with its default, selecting nothing.
#[derive(Debug, Default)]
pub struct DefaultPrompter;

impl Prompter for DefaultPrompter {
    fn multiselect(&self, _label: &str, _choices: &[&str]) -> Result<Vec<usize>, PromptError> {
        Ok(Vec::new())
    }

    fn confirm(&self, _label: &str, _hint: Option<&str>, default: bool) -> Result<bool, PromptError> {
        Ok(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prompter_takes_defaults() {
        let prompter = DefaultPrompter;

        assert!(prompter.multiselect("Plugins?", &["a", "b"]).unwrap().is_empty());
        assert!(prompter.confirm("TypeScript?", None, true).unwrap());
        assert!(!prompter.confirm("Replace?", Some("backup"), false).unwrap());
    }
}
