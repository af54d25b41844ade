use anyhow::{Result, anyhow};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Source of user input lines.
pub trait Prompt {
    /// Reads one line; `None` once the user interrupts or input ends.
    fn read_line(&mut self, message: &str) -> Result<Option<String>>;

    /// Remembers a submitted command line for recall.
    fn add_history(&mut self, _line: &str) {}

    /// Reads one line, treating end of input as an error.
    fn ask(&mut self, message: &str) -> Result<String> {
        self.read_line(message)?
            .ok_or_else(|| anyhow!("Input cancelled"))
    }
}

/// Terminal prompt backed by rustyline.
pub struct LinePrompt {
    editor: DefaultEditor,
}

impl LinePrompt {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| anyhow!("Failed to open terminal: {}", e))?;
        Ok(Self { editor })
    }
}

impl Prompt for LinePrompt {
    fn read_line(&mut self, message: &str) -> Result<Option<String>> {
        match self.editor.readline(message) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(anyhow!("Failed to read input: {}", e)),
        }
    }

    fn add_history(&mut self, line: &str) {
        if !line.trim().is_empty() {
            let _ = self.editor.add_history_entry(line);
        }
    }
}

/// Prompt answering from a fixed script, for tests.
#[cfg(test)]
pub struct ScriptedPrompt {
    answers: std::collections::VecDeque<String>,
    pub asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompt {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            asked: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompt for ScriptedPrompt {
    fn read_line(&mut self, message: &str) -> Result<Option<String>> {
        self.asked.push(message.to_string());
        Ok(self.answers.pop_front())
    }
}
