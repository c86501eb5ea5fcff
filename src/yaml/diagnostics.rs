//! Input file diagnostics with source-pointing error messages

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// Input file that failed to parse, with the offending location
#[derive(Debug, Error, Diagnostic)]
#[error("Cannot parse {filename}: {message}")]
#[diagnostic(code(fcore::yaml::syntax))]
pub struct YamlSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    filename: String,

    /// The underlying error message
    message: String,
}

impl YamlSyntaxError {
    /// Create a syntax error from a serde_yml error
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));

        let offset = line_col_to_offset(source, line, column);
        let message = err.to_string();
        let help = generate_help(&message);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help,
            filename: filename.to_string(),
            message,
        }
    }
}

/// Errors raised while loading an input file
#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error("Cannot read {}", path.display())]
    #[diagnostic(code(fcore::yaml::io), help("check the path and file permissions"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is empty", path.display())]
    #[diagnostic(code(fcore::yaml::empty))]
    Empty { path: PathBuf },
}

/// Convert a 1-based line/column to a byte offset, clamped to the source
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let mut line_start = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let within = text
                .char_indices()
                .nth(column.saturating_sub(1))
                .map_or(text.len(), |(i, _)| i);
            return line_start + within;
        }
        line_start += text.len();
    }
    source.len().saturating_sub(1)
}

/// Suggest a fix based on the parser's message
fn generate_help(message: &str) -> Option<String> {
    let msg = message.to_lowercase();

    if msg.contains("tab") {
        return Some("Indent with spaces, not tabs.".to_string());
    }

    if msg.contains("premature end of input") || msg.contains("input contains invalid characters") {
        return Some("Dates must be written as YYYY-MM-DD, e.g. 2024-01-31.".to_string());
    }

    if msg.contains("unknown variant") {
        return Some(
            "Enumerated fields are lower snake_case, e.g. `straight_line`, `pending_approval`."
                .to_string(),
        );
    }

    if msg.contains("missing field") {
        return Some("Add the missing field to every record in the file.".to_string());
    }

    if msg.contains("invalid type: sequence") {
        return Some("This command expects a single record, not a list.".to_string());
    }

    if msg.contains("invalid type: map") {
        return Some("This command expects a list of records; prefix each one with `- `.".to_string());
    }

    if msg.contains("invalid type: string") {
        return Some("Numeric fields must not be quoted.".to_string());
    }

    if msg.contains("mapping values are not allowed") {
        return Some("You may be missing a space after ':' or have incorrect indentation.".to_string());
    }

    if msg.contains("duplicate") {
        return Some("Each key can only appear once per record.".to_string());
    }

    None
}
