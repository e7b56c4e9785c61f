//! Interactive line input.
//!
//! Every prompt has three outcomes: a line, end of input, or an operator
//! interrupt (Ctrl-C). The workflow treats the last two the same way at the
//! point where they occur (use the default, skip the optional step) rather
//! than aborting the run.
//!
//! # Architecture
//!
//! - [`LineSource`]: async trait yielding one [`PromptInput`] per call
//! - [`StdinLines`]: reads stdin on a background thread and races each line
//!   against `tokio::signal::ctrl_c()`
//! - [`ask`]: write a prompt, flush, read one trimmed answer

use std::io::{self, BufRead, Write};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Result of reading one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptInput {
    /// A line with surrounding whitespace removed (may be empty).
    Line(String),
    /// Input closed.
    Eof,
    /// The operator pressed Ctrl-C.
    Interrupted,
}

/// Source of operator answers.
pub trait LineSource {
    /// Wait for the next line, end of input, or an interrupt.
    async fn read_line(&mut self) -> PromptInput;
}

/// Lines from the process's stdin.
///
/// A dedicated thread does the blocking reads and forwards lines over a
/// channel so that each read can be raced against Ctrl-C.
#[derive(Debug)]
pub struct StdinLines {
    rx: mpsc::UnboundedReceiver<io::Result<String>>,
}

impl StdinLines {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }
}

impl LineSource for StdinLines {
    async fn read_line(&mut self) -> PromptInput {
        tokio::select! {
            line = self.rx.recv() => match line {
                Some(Ok(line)) => PromptInput::Line(line.trim().to_string()),
                Some(Err(e)) => {
                    warn!(error = %e, "Failed reading stdin; treating as end of input");
                    PromptInput::Eof
                }
                None => PromptInput::Eof,
            },
            Ok(()) = tokio::signal::ctrl_c() => {
                debug!("Interrupted at prompt");
                PromptInput::Interrupted
            }
        }
    }
}

/// Print `prompt` (no newline) and read one answer.
pub async fn ask<S, W>(source: &mut S, out: &mut W, prompt: &str) -> io::Result<PromptInput>
where
    S: LineSource,
    W: Write,
{
    write!(out, "{prompt}")?;
    out.flush()?;
    Ok(source.read_line().await)
}

/// Canned answers for tests. Runs out as [`PromptInput::Eof`].
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedLines(std::collections::VecDeque<PromptInput>);

#[cfg(test)]
impl ScriptedLines {
    pub fn new<I: IntoIterator<Item = PromptInput>>(inputs: I) -> Self {
        Self(inputs.into_iter().collect())
    }

    pub fn lines(lines: &[&str]) -> Self {
        Self::new(lines.iter().map(|l| PromptInput::Line(l.trim().to_string())))
    }

    pub fn remaining(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
impl LineSource for ScriptedLines {
    async fn read_line(&mut self) -> PromptInput {
        self.0.pop_front().unwrap_or(PromptInput::Eof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ask_writes_prompt_and_returns_answer() {
        let mut source = ScriptedLines::lines(&["  aapl  "]);
        let mut out = Vec::new();
        let answer = ask(&mut source, &mut out, "Ticker: ").await.unwrap();
        assert_eq!(answer, PromptInput::Line("aapl".to_string()));
        assert_eq!(String::from_utf8(out).unwrap(), "Ticker: ");
    }

    #[tokio::test]
    async fn test_scripted_lines_end_with_eof() {
        let mut source = ScriptedLines::new([PromptInput::Interrupted]);
        assert_eq!(source.read_line().await, PromptInput::Interrupted);
        assert_eq!(source.read_line().await, PromptInput::Eof);
        assert_eq!(source.remaining(), 0);
    }
}
