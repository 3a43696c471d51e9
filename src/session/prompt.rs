// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Prompt collaborator used by the driver and by commands

use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use std::collections::VecDeque;
use std::path::PathBuf;

/// Reasons a prompt produced no input.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("interrupted")]
    Interrupted,

    #[error("end of input")]
    Eof,

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("failed to read input: {0}")]
    Io(String),
}

/// Source of user input.
pub trait Prompt {
    /// Show `label` and read one line of free text.
    fn read_line(&mut self, label: &str) -> Result<String, PromptError>;

    /// Offer `items` and return the index of the chosen one.
    fn select(&mut self, label: &str, items: &[String]) -> Result<usize, PromptError>;
}

/// Resolve a selection given either as a 1-based number or as the item text.
fn parse_selection(input: &str, items: &[String]) -> Result<usize, PromptError> {
    let input = input.trim();
    if let Ok(number) = input.parse::<usize>() {
        if number > 0 && number <= items.len() {
            return Ok(number - 1);
        }
    }
    items
        .iter()
        .position(|item| item == input)
        .ok_or_else(|| PromptError::InvalidSelection(input.to_string()))
}

/// Terminal prompt backed by rustyline with persistent history.
pub struct RustylinePrompt {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
}

impl RustylinePrompt {
    pub fn new(history_path: Option<PathBuf>, max_history: usize) -> Result<Self> {
        let mut editor = DefaultEditor::new().context("Failed to initialize line editor")?;
        editor
            .set_max_history_size(max_history)
            .context("Failed to configure history size")?;

        if let Some(ref path) = history_path {
            if path.exists() {
                if let Err(e) = editor.load_history(path) {
                    tracing::debug!("Failed to load history from {:?}: {}", path, e);
                }
            }
        }

        Ok(Self {
            editor,
            history_path,
        })
    }

    fn readline(&mut self, prompt: &str) -> Result<String, PromptError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                Err(PromptError::Interrupted)
            }
            Err(ReadlineError::Eof) => Err(PromptError::Eof),
            Err(err) => Err(PromptError::Io(err.to_string())),
        }
    }
}

impl Prompt for RustylinePrompt {
    fn read_line(&mut self, label: &str) -> Result<String, PromptError> {
        let line = self.readline(&format!("{label} > "))?;
        if !line.trim().is_empty() {
            if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                tracing::debug!("Failed to record history entry: {}", e);
            }
        }
        Ok(line)
    }

    fn select(&mut self, label: &str, items: &[String]) -> Result<usize, PromptError> {
        if items.is_empty() {
            return Err(PromptError::InvalidSelection("nothing to select".to_string()));
        }

        println!("{label}");
        for (i, item) in items.iter().enumerate() {
            println!("  [{}] {}", i + 1, item);
        }
        let input = self.readline(&format!("Select (1-{}): ", items.len()))?;
        parse_selection(&input, items)
    }
}

impl Drop for RustylinePrompt {
    fn drop(&mut self) {
        if let Some(ref path) = self.history_path {
            if let Err(e) = self.editor.save_history(path) {
                tracing::debug!("Failed to save history to {:?}: {}", path, e);
            }
        }
    }
}

/// Prompt fed from a fixed queue of responses.
///
/// Records every label it was shown. Once the queue is drained each read
/// reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    responses: VecDeque<Result<String, PromptError>>,
    labels: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: lines.into_iter().map(|line| Ok(line.into())).collect(),
            labels: Vec::new(),
        }
    }

    /// Queue a line.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.responses.push_back(Ok(line.into()));
    }

    /// Queue a read failure.
    pub fn push_error(&mut self, error: PromptError) {
        self.responses.push_back(Err(error));
    }

    /// Labels shown so far, in order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn remaining(&self) -> usize {
        self.responses.len()
    }

    fn next_response(&mut self, label: &str) -> Result<String, PromptError> {
        self.labels.push(label.to_string());
        self.responses.pop_front().unwrap_or(Err(PromptError::Eof))
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&mut self, label: &str) -> Result<String, PromptError> {
        self.next_response(label)
    }

    fn select(&mut self, label: &str, items: &[String]) -> Result<usize, PromptError> {
        let input = self.next_response(label)?;
        parse_selection(&input, items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<String> {
        vec!["alpha".to_string(), "beta".to_string()]
    }

    #[test]
    fn test_parse_selection_by_number_and_text() {
        assert_eq!(parse_selection("1", &items()).unwrap(), 0);
        assert_eq!(parse_selection(" 2 ", &items()).unwrap(), 1);
        assert_eq!(parse_selection("beta", &items()).unwrap(), 1);
        assert!(parse_selection("0", &items()).is_err());
        assert!(parse_selection("3", &items()).is_err());
        assert!(parse_selection("gamma", &items()).is_err());
    }

    #[test]
    fn test_scripted_prompt_records_labels() {
        let mut prompt = ScriptedPrompt::new(["first", "2"]);
        prompt.push_error(PromptError::Interrupted);

        assert_eq!(prompt.read_line("A").unwrap(), "first");
        assert_eq!(prompt.select("B", &items()).unwrap(), 1);
        assert!(matches!(
            prompt.read_line("C"),
            Err(PromptError::Interrupted)
        ));
        assert!(matches!(prompt.read_line("D"), Err(PromptError::Eof)));
        assert_eq!(prompt.labels(), ["A", "B", "C", "D"]);
        assert_eq!(prompt.remaining(), 0);
    }
}
