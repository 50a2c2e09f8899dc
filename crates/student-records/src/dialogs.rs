//! Blocking prompts and notifications shown to the user.
//!
//! The controller never talks to a terminal directly; it goes through
//! [`Dialogs`], so the CLI and tests can answer prompts differently.

use std::io::{BufRead, Write};

use tracing::warn;

/// User-facing prompts used by the controller.
pub trait Dialogs {
    /// Show a blocking message that must be acknowledged.
    fn alert(&mut self, message: &str);

    /// Ask a blocking yes/no question.
    fn confirm(&mut self, message: &str) -> bool;

    /// Show a non-blocking notification.
    fn notify(&mut self, message: &str);
}

/// Dialogs over a line-oriented reader and writer.
pub struct TerminalDialogs<R, W> {
    input: R,
    output: W,
    assume_yes: bool,
}

impl<R, W> std::fmt::Debug for TerminalDialogs<R, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalDialogs")
            .field("assume_yes", &self.assume_yes)
            .finish_non_exhaustive()
    }
}

impl TerminalDialogs<std::io::StdinLock<'static>, std::io::Stderr> {
    /// Dialogs on the process's stdin and stderr.
    #[must_use]
    pub fn stdio(assume_yes: bool) -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr(), assume_yes)
    }
}

impl<R: BufRead, W: Write> TerminalDialogs<R, W> {
    /// Dialogs reading answers from `input` and printing to `output`.
    ///
    /// With `assume_yes`, every confirmation is accepted without reading.
    pub fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input,
            output,
            assume_yes,
        }
    }

    /// Give back the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.output, "{line}") {
            warn!(error = %e, "Failed to write dialog output");
        }
    }
}

impl<R: BufRead, W: Write> Dialogs for TerminalDialogs<R, W> {
    fn alert(&mut self, message: &str) {
        self.write_line(message);
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        if let Err(e) = write!(self.output, "{message} [y/N] ").and_then(|()| self.output.flush())
        {
            warn!(error = %e, "Failed to write confirmation prompt");
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) => false,
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                warn!(error = %e, "Failed to read confirmation answer");
                false
            }
        }
    }

    fn notify(&mut self, message: &str) {
        self.write_line(&format!("warning: {message}"));
    }
}

/// Records every dialog and answers confirmations from a queue.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedDialogs {
    pub alerts: Vec<String>,
    pub confirms: Vec<String>,
    pub notifications: Vec<String>,
    answers: std::collections::VecDeque<bool>,
}

#[cfg(test)]
impl ScriptedDialogs {
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl Dialogs for ScriptedDialogs {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirms.push(message.to_string());
        self.answers.pop_front().unwrap_or(false)
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialogs(input: &str, assume_yes: bool) -> TerminalDialogs<&[u8], Vec<u8>> {
        TerminalDialogs::new(input.as_bytes(), Vec::new(), assume_yes)
    }

    #[test]
    fn test_confirm_accepts_yes_answers() {
        for answer in ["y\n", "Y\n", "yes\n", " YES \n"] {
            let mut d = dialogs(answer, false);
            assert!(d.confirm("Delete?"), "answer {answer:?}");
        }
    }

    #[test]
    fn test_confirm_rejects_other_answers() {
        for answer in ["n\n", "\n", "nope\n", ""] {
            let mut d = dialogs(answer, false);
            assert!(!d.confirm("Delete?"), "answer {answer:?}");
        }
    }

    #[test]
    fn test_confirm_prints_prompt() {
        let mut d = dialogs("y\n", false);
        d.confirm("Are you sure?");
        let out = String::from_utf8(d.into_output()).unwrap();
        assert_eq!(out, "Are you sure? [y/N] ");
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        let mut d = dialogs("", true);
        assert!(d.confirm("Are you sure?"));
        assert!(d.into_output().is_empty());
    }

    #[test]
    fn test_alert_and_notify_output() {
        let mut d = dialogs("", false);
        d.alert("Please fix the validation errors before submitting.");
        d.notify("could not save");
        let out = String::from_utf8(d.into_output()).unwrap();
        assert_eq!(
            out,
            "Please fix the validation errors before submitting.\nwarning: could not save\n"
        );
    }

    #[test]
    fn test_scripted_dialogs_answers_in_order() {
        let mut d = ScriptedDialogs::answering([true, false]);
        assert!(d.confirm("first"));
        assert!(!d.confirm("second"));
        assert!(!d.confirm("exhausted"));
        assert_eq!(d.confirms.len(), 3);
    }
}
