//! Console input primitives.
//!
//! Dialogs read through a [`LineSource`] handle instead of a process-wide
//! reader, so tests and scripts can drive them with canned input.

use crate::error::DialogError;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A blocking source of input lines.
pub trait LineSource {
    /// Show `prompt` and block until one line arrives.
    ///
    /// Returns [`DialogError::Eof`] once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<String, DialogError>;

    /// Whether `read_line` shows the prompt itself.
    fn echoes_prompt(&self) -> bool {
        true
    }
}

/// Get the history file path.
fn history_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".keyfield_history")
}

/// Interactive terminal input backed by rustyline.
pub struct EditorInput {
    editor: Editor<(), DefaultHistory>,
    history: PathBuf,
}

impl EditorInput {
    /// Create a line editor and load history from the user's home directory.
    pub fn new() -> Result<Self, DialogError> {
        let config = Config::builder()
            .history_ignore_space(true)
            .auto_add_history(true)
            .build();

        let mut editor: Editor<(), DefaultHistory> = Editor::with_config(config)?;
        let history = history_path();
        if history.exists() {
            let _ = editor.load_history(&history);
        }

        Ok(Self { editor, history })
    }
}

impl LineSource for EditorInput {
    fn read_line(&mut self, prompt: &str) -> Result<String, DialogError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted) => Err(DialogError::Interrupted),
            Err(ReadlineError::Eof) => Err(DialogError::Eof),
            Err(err) => Err(err.into()),
        }
    }
}

impl Drop for EditorInput {
    fn drop(&mut self) {
        let _ = self.editor.save_history(&self.history);
    }
}

/// One entry of scripted input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScriptEntry {
    Line(String),
    Interrupt,
}

/// Canned input lines, consumed in order.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    entries: VecDeque<ScriptEntry>,
}

impl ScriptedInput {
    /// Create a script from the given lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: lines
                .into_iter()
                .map(|l| ScriptEntry::Line(l.into()))
                .collect(),
        }
    }

    /// Load a script file, one input line per file line.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_lines(content.lines()))
    }

    /// Append a line.
    #[cfg(test)]
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.entries.push_back(ScriptEntry::Line(line.into()));
    }

    /// Append a simulated Ctrl-C.
    #[cfg(test)]
    pub fn push_interrupt(&mut self) {
        self.entries.push_back(ScriptEntry::Interrupt);
    }

    /// Number of entries not yet consumed.
    #[cfg(test)]
    pub fn remaining(&self) -> usize {
        self.entries.len()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> Result<String, DialogError> {
        match self.entries.pop_front() {
            Some(ScriptEntry::Line(line)) => Ok(line),
            Some(ScriptEntry::Interrupt) => Err(DialogError::Interrupted),
            None => Err(DialogError::Eof),
        }
    }

    fn echoes_prompt(&self) -> bool {
        false
    }
}

/// An input source paired with the output stream dialogs write to.
pub struct Console<I, W> {
    input: I,
    out: W,
}

impl<I: LineSource, W: Write> Console<I, W> {
    /// Create a console.
    pub fn new(input: I, out: W) -> Self {
        Self { input, out }
    }

    /// Read one raw line. Pending output is flushed first so it lands before the prompt.
    ///
    /// The prompt goes to the output stream when the input source does not show it.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, DialogError> {
        if !self.input.echoes_prompt() {
            write!(self.out, "{}", prompt)?;
        }
        self.out.flush()?;
        self.input.read_line(prompt)
    }

    /// Read a line, trimmed, prompting again until it is not empty.
    pub fn read_not_empty(&mut self, prompt: &str) -> Result<String, DialogError> {
        loop {
            let line = self.read_line(prompt)?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }
    }

    /// The output stream.
    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    /// The input source.
    #[cfg(test)]
    pub fn input(&mut self) -> &mut I {
        &mut self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_lines_then_eof() {
        let mut input = ScriptedInput::from_lines(["a", "b"]);
        assert_eq!(input.read_line("> ").unwrap(), "a");
        assert_eq!(input.read_line("> ").unwrap(), "b");
        assert!(input.read_line("> ").unwrap_err().is_eof());
    }

    #[test]
    fn test_scripted_interrupt() {
        let mut input = ScriptedInput::default();
        input.push_interrupt();
        input.push_line("after");
        assert!(matches!(
            input.read_line("> "),
            Err(DialogError::Interrupted)
        ));
        assert_eq!(input.read_line("> ").unwrap(), "after");
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_read_not_empty_skips_blank_and_trims() {
        let input = ScriptedInput::from_lines(["", "   ", "\t", "  NAME  "]);
        let mut console = Console::new(input, Vec::new());
        assert_eq!(console.read_not_empty("Name: ").unwrap(), "NAME");
        assert_eq!(console.input().remaining(), 0);
    }

    #[test]
    fn test_scripted_prompts_are_written() {
        let input = ScriptedInput::from_lines(["NI", "PHONE"]);
        let mut console = Console::new(input, Vec::new());

        assert_eq!(console.read_line("> ").unwrap(), "NI");
        assert_eq!(console.read_not_empty("New Item Name: ").unwrap(), "PHONE");
        assert_eq!(console.out().as_slice(), b"> New Item Name: ");
    }

    #[test]
    fn test_read_not_empty_eof() {
        let input = ScriptedInput::from_lines(["", " "]);
        let mut console = Console::new(input, Vec::new());
        assert!(console.read_not_empty("Name: ").unwrap_err().is_eof());
    }

    #[test]
    fn test_script_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.txt");
        std::fs::write(&path, "NI\nPHONE\nQ\n").unwrap();

        let mut input = ScriptedInput::from_file(&path).unwrap();
        assert_eq!(input.remaining(), 3);
        assert_eq!(input.read_line("> ").unwrap(), "NI");
    }
}
