//! Test doubles for external commands and operator prompts.
//!
//! Public so integration tests under `tests/` can drive a whole run without
//! a terminal, root privileges or a database server.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::core::error::UninstallError;
use crate::core::prompt::Prompt;
use crate::core::runner::{Cmd, CommandOutput, CommandRunner};

/// Records every command and answers from a queue of canned responses.
///
/// A response registered with [`MockRunner::respond`] is used once, by the
/// first command whose rendered line starts with the given prefix. Commands
/// with no queued response succeed with empty output.
#[derive(Default)]
pub struct MockRunner {
    responses: RefCell<Vec<(String, CommandOutput)>>,
    invocations: RefCell<Vec<Cmd>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, prefix: &str, output: CommandOutput) {
        self.responses
            .borrow_mut()
            .push((prefix.to_string(), output));
    }

    pub fn invocations(&self) -> Vec<Cmd> {
        self.invocations.borrow().clone()
    }

    /// Rendered command lines, in call order.
    pub fn commands(&self) -> Vec<String> {
        self.invocations.borrow().iter().map(|c| c.to_string()).collect()
    }

    /// Position of the first command starting with `prefix`.
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.commands().iter().position(|c| c.starts_with(prefix))
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, cmd: &Cmd) -> std::io::Result<CommandOutput> {
        self.invocations.borrow_mut().push(cmd.clone());

        let line = cmd.to_string();
        let mut responses = self.responses.borrow_mut();
        if let Some(idx) = responses.iter().position(|(p, _)| line.starts_with(p.as_str())) {
            return Ok(responses.remove(idx).1);
        }
        Ok(CommandOutput::ok(""))
    }
}

/// Answers questions from a fixed script, in order.
///
/// Running out of answers behaves like a closed stdin.
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    questions: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            questions: Vec::new(),
        }
    }

    /// Every question asked so far.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Answers that were never consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompt for ScriptedPrompt {
    fn line(&mut self, question: &str) -> Result<String, UninstallError> {
        self.questions.push(question.to_string());
        self.answers.pop_front().ok_or(UninstallError::InputClosed)
    }

    fn secret(&mut self, question: &str) -> Result<String, UninstallError> {
        self.line(question)
    }
}
