//! Printing and capturing of responses

use clap::ValueEnum;
use serde_json::Value;
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::api::{ApiError, ApiResponse, Body};

/// How much of each response is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Nothing is printed; the proxy sees the traffic anyway
    Quiet,
    /// One line per exchange
    Summary,
    /// Status line followed by the pretty-printed body
    Full,
}

/// Where each labelled response ends up
pub struct Reporter {
    mode: OutputMode,
    save_dir: Option<PathBuf>,
    /// Captures written so far; prefixes each file name
    saved: Cell<usize>,
}

/// Turns a label such as `library get/bbbb` into a file stem.
pub fn file_stem(label: &str) -> String {
    let stem: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    stem.trim_matches('_').to_string()
}

impl Reporter {
    pub fn new(mode: OutputMode, save_dir: Option<PathBuf>) -> Self {
        Reporter { mode, save_dir, saved: Cell::new(0) }
    }

    /// A reporter that prints and saves nothing
    pub fn quiet() -> Self {
        Reporter::new(OutputMode::Quiet, None)
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Renders one exchange as `mode` dictates; `None` in quiet mode.
    pub fn render(&self, label: &str, response: &ApiResponse) -> Option<String> {
        let kind = match &response.body {
            Body::Empty => "empty",
            Body::Json(_) => "json",
            Body::Invalid(_) => "non-json",
        };
        let line = format!("{:<40} {} ({})", label, response.status, kind);

        match self.mode {
            OutputMode::Quiet => None,
            OutputMode::Summary => Some(line),
            OutputMode::Full => {
                let body = match &response.body {
                    Body::Empty => String::new(),
                    Body::Json(value) => {
                        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
                    }
                    Body::Invalid(text) => text.clone(),
                };
                Some(format!("{}\n{}", line, body))
            }
        }
    }

    /// Prints the exchange and, when a capture directory is set, writes a
    /// JSON body to `<dir>/<seq>-<label>.json`. Repeated labels get
    /// separate files.
    pub fn report(&self, label: &str, response: &ApiResponse) -> Result<(), ApiError> {
        match &response.body {
            Body::Invalid(text) => {
                warn!(label, status = %response.status, "response is not JSON: {:.80}", text)
            }
            Body::Empty => debug!(label, status = %response.status, "response has no body"),
            Body::Json(_) => debug!(label, status = %response.status, "response decoded"),
        }

        if let Some(text) = self.render(label, response) {
            println!("{}", text);
        }

        if let (Some(dir), Some(value)) = (&self.save_dir, response.json()) {
            let seq = self.saved.get() + 1;
            let path = write_json(dir, seq, label, value)?;
            self.saved.set(seq);
            debug!("Saved response to {}", path.display());
        }
        Ok(())
    }
}

/// Writes `value` pretty-printed to `<dir>/<seq>-<label>.json`, creating
/// `dir` if needed.
pub fn write_json(dir: &Path, seq: usize, label: &str, value: &Value) -> Result<PathBuf, ApiError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{:03}-{}.json", seq, file_stem(label)));
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    fs::write(&path, content)?;
    Ok(path)
}
