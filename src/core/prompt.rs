//! Operator prompts
//!
//! Every question the workflow asks goes through [`Prompt`], so a run can be
//! driven from a terminal or from a scripted list of answers.

use std::io::{self, BufRead, IsTerminal, Write};

use super::error::UninstallError;

/// Source of operator answers.
pub trait Prompt {
    /// Ask a question and return the answer line without its newline.
    fn line(&mut self, question: &str) -> Result<String, UninstallError>;

    /// Ask for a secret. Implementations should not echo the answer.
    fn secret(&mut self, question: &str) -> Result<String, UninstallError>;

    /// Ask a yes/no question that defaults to "no".
    fn confirm(&mut self, question: &str) -> Result<bool, UninstallError> {
        let answer = self.line(&format!("{} (y/N): ", question))?;
        Ok(is_affirmative(&answer))
    }
}

/// `y` or `yes`, any case, surrounding whitespace ignored.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Line-oriented prompt over any reader/writer pair.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self) -> Result<String, UninstallError> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(UninstallError::InputClosed);
        }
        Ok(buf.trim_end_matches(['\n', '\r']).to_string())
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn line(&mut self, question: &str) -> Result<String, UninstallError> {
        write!(self.output, "* {}", question)?;
        self.output.flush()?;
        self.read_answer()
    }

    fn secret(&mut self, question: &str) -> Result<String, UninstallError> {
        self.line(question)
    }
}

/// Prompt bound to the process's stdin/stdout.
///
/// Secrets are read without echo through dialoguer when stdin is a terminal.
pub struct TerminalPrompt {
    inner: LinePrompt<io::StdinLock<'static>, io::Stdout>,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            inner: LinePrompt::new(io::stdin().lock(), io::stdout()),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TerminalPrompt {
    fn line(&mut self, question: &str) -> Result<String, UninstallError> {
        self.inner.line(question)
    }

    fn secret(&mut self, question: &str) -> Result<String, UninstallError> {
        if !io::stdin().is_terminal() {
            return self.inner.line(question);
        }
        dialoguer::Password::new()
            .with_prompt(format!("* {}", question.trim_end_matches([':', ' '])))
            .allow_empty_password(true)
            .interact()
            .map_err(|e| UninstallError::Io(io::Error::other(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirmative_answers() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative(" yes "));
        assert!(is_affirmative("YES"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("yep"));
    }

    #[test]
    fn test_confirm_defaults_to_no_on_empty_line() {
        let mut out = Vec::new();
        let mut prompt = LinePrompt::new(&b"\n"[..], &mut out);
        assert!(!prompt.confirm("Remove panel?").unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "* Remove panel? (y/N): ");
    }

    #[test]
    fn test_line_strips_crlf() {
        let mut prompt = LinePrompt::new(&b"panel\r\n"[..], Vec::new());
        assert_eq!(prompt.line("db: ").unwrap(), "panel");
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut prompt = LinePrompt::new(&b""[..], Vec::new());
        assert!(matches!(
            prompt.confirm("Continue?"),
            Err(UninstallError::InputClosed)
        ));
    }
}
