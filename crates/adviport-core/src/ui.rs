//! Console interaction seam.
//!
//! Flows and plugins talk to the user only through [`UserInterface`], so
//! they can be driven by a terminal or by [`ScriptedInterface`] alike.

use std::collections::VecDeque;
use std::time::Duration;

/// Line-oriented user interaction.
pub trait UserInterface {
    /// Prompts for a line of input.
    ///
    /// # Returns
    ///
    /// The trimmed line, or `None` when input is closed (EOF, interrupt).
    fn read_line(&mut self, prompt: &str) -> Option<String>;

    /// Prompts for a secret without echoing it.
    fn read_secret(&mut self, prompt: &str) -> Option<String>;

    /// Prints an informational message.
    fn info(&mut self, message: &str);

    /// Prints an error message.
    fn error(&mut self, message: &str);

    /// Cosmetic pause between retries. No-op by default.
    fn pause(&mut self, _duration: Duration) {}
}

/// A non-interactive [`UserInterface`] fed from a fixed list of answers.
///
/// Secret and plain prompts consume the same queue. Everything printed is
/// recorded so callers can inspect the conversation afterwards.
#[derive(Debug, Default)]
pub struct ScriptedInterface {
    inputs: VecDeque<String>,
    prompts: Vec<String>,
    infos: Vec<String>,
    errors: Vec<String>,
    pauses: usize,
}

impl ScriptedInterface {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn infos(&self) -> &[String] {
        &self.infos
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Number of answers not consumed yet.
    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn pauses(&self) -> usize {
        self.pauses
    }

    fn next_input(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        self.inputs.pop_front().map(|line| line.trim().to_string())
    }
}

impl UserInterface for ScriptedInterface {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.next_input(prompt)
    }

    fn read_secret(&mut self, prompt: &str) -> Option<String> {
        self.next_input(prompt)
    }

    fn info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn pause(&mut self, _duration: Duration) {
        self.pauses += 1;
    }
}
