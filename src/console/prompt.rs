use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::error::WorkbenchError;

/// Source of operator input lines.
///
/// The session loop gathers every field through this seam, so tests can
/// script a whole interaction without a terminal.
pub trait Prompt {
    /// Read one line, displaying `text` first. `None` means the input source
    /// is exhausted.
    ///
    /// # Errors
    /// Returns an error when the underlying reader fails.
    fn read_line(&mut self, text: &str) -> Result<Option<String>, WorkbenchError>;
}

/// Line editor backed by rustyline, with in-memory history.
pub struct RustylinePrompt {
    editor: DefaultEditor,
}

impl RustylinePrompt {
    /// # Errors
    /// Returns `WorkbenchError::InputError` if the editor cannot be created.
    pub fn new() -> Result<Self, WorkbenchError> {
        let editor = DefaultEditor::new()
            .map_err(|e| WorkbenchError::InputError(format!("cannot open line editor: {e}")))?;
        Ok(Self { editor })
    }
}

impl Prompt for RustylinePrompt {
    fn read_line(&mut self, text: &str) -> Result<Option<String>, WorkbenchError> {
        match self.editor.readline(text) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Eof) => Ok(None),
            // Ctrl-C abandons the current entry, not the session.
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(e) => Err(WorkbenchError::InputError(format!("readline failed: {e}"))),
        }
    }
}
