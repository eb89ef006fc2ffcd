//! Interactive range prompt.

use std::io::Write;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use ccnews_catalog::{parse_id_range, select_files};
use ccnews_core::{Catalog, FileDescriptor};

use crate::error::CliError;

pub const RANGE_PROMPT: &str =
    "Enter ID or range (e.g. 03802 or 03802-03807), end inclusive. 'q' to quit: ";

const QUIT_WORDS: [&str; 3] = ["q", "quit", "exit"];

/// One answer from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptInput {
    Line(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D or closed stdin
    Eof,
}

/// Source of prompt answers.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<PromptInput, CliError>;
}

/// Line editor with history, backed by rustyline.
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    pub fn new() -> Result<Self, CliError> {
        DefaultEditor::new()
            .map(|editor| Self { editor })
            .map_err(|e| CliError::Input {
                message: e.to_string(),
            })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<PromptInput, CliError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let _ = self.editor.add_history_entry(line.as_str());
                Ok(PromptInput::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(PromptInput::Interrupted),
            Err(ReadlineError::Eof) => Ok(PromptInput::Eof),
            Err(e) => Err(CliError::Input {
                message: e.to_string(),
            }),
        }
    }
}

/// Ask for an ID or range until the answer names files in `catalog`.
///
/// Invalid answers are reported on `out` and asked again. Quitting prints
/// "Aborted." and returns [`CliError::Aborted`] with exit code 0; EOF and
/// interrupts do the same with exit code 1.
pub fn prompt_for_files<'a, S, W>(
    source: &mut S,
    out: &mut W,
    catalog: &'a Catalog,
) -> Result<&'a [FileDescriptor], CliError>
where
    S: LineSource,
    W: Write,
{
    loop {
        let raw = match source.read_line(RANGE_PROMPT)? {
            PromptInput::Line(line) => line,
            PromptInput::Interrupted | PromptInput::Eof => {
                writeln!(out, "Aborted.")?;
                return Err(CliError::Aborted { exit_code: 1 });
            }
        };

        let answer = raw.trim().to_lowercase();
        if QUIT_WORDS.contains(&answer.as_str()) {
            writeln!(out, "Aborted.")?;
            return Err(CliError::Aborted { exit_code: 0 });
        }

        let selected = parse_id_range(&raw, catalog.ids())
            .and_then(|selection| select_files(&catalog.files, &selection));
        match selected {
            Ok(files) => return Ok(files),
            Err(e) => writeln!(out, "Invalid input: {e}. Please try again.")?,
        }
    }
}
