//! Combo Handler Patcher
//!
//! Rewrites a backup of the IPC handler file: everything from the first
//! combo section on is dropped and one clean set of handlers is appended.

pub mod marker;
pub mod template;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Config;
pub use marker::{find_split, kept_prefix, SplitPoint, FALLBACK_TRIM_LINES};
pub use template::{COMBO_HANDLERS_TEMPLATE, HANDLER_TOKEN};

/// Result of patching a document in memory
#[derive(Debug, Clone, PartialEq)]
pub struct PatchedDocument {
    pub split: SplitPoint,
    /// Character offset of the marker in the original text
    pub marker_position: Option<usize>,
    pub text: String,
}

impl PatchedDocument {
    /// Number of lines in the patched text
    pub fn line_count(&self) -> usize {
        count_lines(&self.text)
    }

    /// Number of combo handler registrations in the patched text
    pub fn handler_count(&self) -> usize {
        self.text.matches(HANDLER_TOKEN).count()
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}'
            | '\u{2028}' | '\u{2029}'
    )
}

/// Count lines the way a universal-newline reader does
///
/// `\r\n` is one break, as are a lone `\r` and the Unicode line and paragraph
/// separators. A trailing break does not start a new line.
pub fn count_lines(text: &str) -> usize {
    let mut count = 0;
    let mut open_line = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if is_line_break(c) {
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            count += 1;
            open_line = false;
        } else {
            open_line = true;
        }
    }

    count + usize::from(open_line)
}

/// Describe the split the way the report's first line does
pub fn describe_split(split: SplitPoint, marker_position: Option<usize>) -> String {
    let position = marker_position.unwrap_or_default();
    match split {
        SplitPoint::Banner { .. } => format!("Found combo section at position {}", position),
        SplitPoint::Registration { .. } => format!(
            "Found combos:getAll at position {}, cutting before it",
            position
        ),
        SplitPoint::NotFound => "No combo handlers found, using full content".to_string(),
    }
}

/// Split the document and append the canonical handler block
pub fn patch_document(content: &str) -> PatchedDocument {
    let split = find_split(content);
    let marker_position = split
        .offset()
        .map(|offset| marker::char_offset(content, offset));

    let mut text = kept_prefix(content, split);
    text.push_str(COMBO_HANDLERS_TEMPLATE);

    PatchedDocument {
        split,
        marker_position,
        text,
    }
}

/// Summary printed after a run
#[derive(Debug, Clone, PartialEq)]
pub struct PatchReport {
    pub split: SplitPoint,
    pub marker_position: Option<usize>,
    pub output_path: PathBuf,
    pub line_count: usize,
    pub handler_count: usize,
    pub written: bool,
}

impl fmt::Display for PatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", describe_split(self.split, self.marker_position))?;

        let file_name = self
            .output_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.output_path.display().to_string());

        writeln!(f)?;
        if self.written {
            writeln!(f, "SUCCESS!")?;
            writeln!(f, "Created new {}", file_name)?;
        } else {
            writeln!(f, "DRY RUN")?;
            writeln!(f, "Would create new {}", file_name)?;
        }
        writeln!(f, "Total lines: {}", self.line_count)?;
        write!(f, "Combo handlers: {}", self.handler_count)
    }
}

/// Read the input, patch it and write the output named by `config`
pub fn run(config: &Config) -> Result<PatchReport> {
    let content = read_document(&config.input_path)?;
    let patched = patch_document(&content);
    log::info!("{}", describe_split(patched.split, patched.marker_position));

    if config.dry_run {
        log::info!("Dry run, not writing {}", config.output_path.display());
    } else {
        write_document(&config.output_path, &patched.text)?;
        log::info!(
            "Wrote {} bytes to {}",
            patched.text.len(),
            config.output_path.display()
        );
    }

    Ok(PatchReport {
        split: patched.split,
        marker_position: patched.marker_position,
        output_path: config.output_path.clone(),
        line_count: patched.line_count(),
        handler_count: patched.handler_count(),
        written: !config.dry_run,
    })
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_document(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}
