//! Interactive confirmation before destructive operations.

use std::io::{self, BufRead, Write};

/// Answers accepted as a yes.
const AFFIRMATIVE: [&str; 2] = ["yes", "y"];

/// True when `answer` is an affirmative token, ignoring case and surrounding whitespace.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    AFFIRMATIVE.contains(&answer.as_str())
}

/// Source of a yes/no decision.
pub trait Confirmation: Send {
    /// Show `prompt` and return whether the answer was affirmative.
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Reads the answer from standard input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirmation;

impl Confirmation for StdinConfirmation {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt}");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(e) => {
                tracing::error!(error = %e, "failed to read confirmation");
                false
            }
        }
    }
}

/// Scripted answer, recording every prompt shown.
#[derive(Debug, Clone, Default)]
pub struct FixedConfirmation {
    answer: String,
    prompts: Vec<String>,
}

impl FixedConfirmation {
    /// Always answer with `answer`.
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl Confirmation for FixedConfirmation {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        is_affirmative(&self.answer)
    }
}
