//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Output formatting functions
//! - This module - Interactive prompts and user input handling

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use anyhow::Result;

pub mod formatter;

pub use formatter::{display_error, display_status, display_success, display_version};

/// Source of yes/no answers for interactive questions.
///
/// The command handlers only talk to this trait so they can be driven by the
/// terminal or by a scripted implementation in tests.
pub trait Prompt {
    /// Ask `question`; `Ok(true)` means the user agreed
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Prompt reading answers from stdin
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let stdin = io::stdin();
        confirm_with(question, &mut stdin.lock(), &mut io::stdout())
    }
}

/// Prompt replaying a fixed list of answers, recording every question asked.
///
/// Once the answers run out every further question is declined.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        ScriptedPrompt {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Questions asked so far, in order
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.asked.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Displays the given prompt and accepts "y" or "yes" (case-insensitive) as confirmation.
/// Default is "no" if user presses Enter or input ends.
///
/// # Arguments
/// * `question` - The prompt message to display (without the " [y/N]: " suffix)
/// * `input` - Where the answer is read from
/// * `output` - Where the question is written to
pub fn confirm_with<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    write!(output, "{} [y/N]: ", question)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    let response = answer.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(input: &str) -> (bool, String) {
        let mut output = Vec::new();
        let confirmed = confirm_with("Proceed?", &mut Cursor::new(input), &mut output).unwrap();
        (confirmed, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_confirm_accepts_yes() {
        assert!(answer("y\n").0);
        assert!(answer("YES\n").0);
        assert!(answer("  Yes  \n").0);
    }

    #[test]
    fn test_confirm_defaults_to_no() {
        assert!(!answer("\n").0);
        assert!(!answer("").0);
        assert!(!answer("n\n").0);
        assert!(!answer("sure\n").0);
    }

    #[test]
    fn test_confirm_writes_question() {
        let (_, output) = answer("y\n");
        assert_eq!(output, "Proceed? [y/N]: ");
    }

    #[test]
    fn test_scripted_prompt_records_questions() {
        let mut prompt = ScriptedPrompt::new([true]);
        assert!(prompt.confirm("first?").unwrap());
        assert!(!prompt.confirm("second?").unwrap());
        assert_eq!(prompt.asked(), ["first?", "second?"]);
    }
}
