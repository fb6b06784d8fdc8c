//! Dialog errors.

use rustyline::error::ReadlineError;
use thiserror::Error;

/// Errors that end or interrupt a dialog.
///
/// Store failures never show up here: dialogs print them and carry on.
#[derive(Debug, Error)]
pub enum DialogError {
    /// Line editor failure.
    #[error("input error: {0}")]
    Readline(#[from] ReadlineError),

    /// Writing to the console failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    /// The input stream is exhausted.
    #[error("end of input")]
    Eof,

    /// The user pressed Ctrl-C at a prompt.
    #[error("interrupted")]
    Interrupted,
}

impl DialogError {
    /// Check if this error is the end of input.
    pub fn is_eof(&self) -> bool {
        matches!(self, DialogError::Eof)
    }
}
