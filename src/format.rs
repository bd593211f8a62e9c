//! Rendering a parsed conversation in one of the supported output formats.
//!
//! Each format lives behind a cargo feature. Asking for a format whose
//! feature was compiled out yields [`ChatweaveError::FormatUnavailable`]
//! rather than a build error, so the CLI and library callers share one
//! entry point.
//!
//! ```rust
//! # #[cfg(feature = "csv-output")]
//! # fn example() -> chatweave::Result<()> {
//! use chatweave::core::models::OutputConfig;
//! use chatweave::format::{OutputFormat, to_format_string};
//! use chatweave::parser::ConversationParser;
//!
//! let conversation = ConversationParser::new().parse_text("[1/1/24, 10:00] Ana: oi");
//! let csv = to_format_string(conversation.messages(), OutputFormat::Csv, &OutputConfig::new())?;
//! assert_eq!(csv, "Author;Content;System\nAna;oi;false\n");
//! # Ok(())
//! # }
//! ```

use std::fs;

use tracing::debug;

use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::{ChatweaveError, Result};

/// Serialized shape of the message list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Semicolon-delimited table
    Csv,
    /// Pretty-printed JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Cargo feature that compiles in the writer for this format.
    pub fn required_feature(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }

    /// Whether this build can render the format.
    pub fn is_available(self) -> bool {
        match self {
            OutputFormat::Csv => cfg!(feature = "csv-output"),
            OutputFormat::Json | OutputFormat::Jsonl => cfg!(feature = "json-output"),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OutputFormat::Csv => "CSV",
            OutputFormat::Json => "JSON",
            OutputFormat::Jsonl => "JSONL",
        })
    }
}

/// Renders messages in `format`, filtered and shaped by `config`.
///
/// # Errors
///
/// [`ChatweaveError::FormatUnavailable`] when the format's feature is off,
/// otherwise whatever the underlying writer reports.
#[cfg_attr(
    not(all(feature = "csv-output", feature = "json-output")),
    allow(unused_variables)
)]
pub fn to_format_string(
    messages: &[Message],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(messages, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(messages, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(messages, config),
        #[allow(unreachable_patterns)]
        unavailable => Err(ChatweaveError::format_unavailable(unavailable)),
    }
}

/// Renders messages and writes them to `path`, replacing any existing file.
///
/// # Errors
///
/// Same as [`to_format_string`], plus [`ChatweaveError::Io`] when the file
/// cannot be written.
pub fn write_to_format(
    messages: &[Message],
    path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    let rendered = to_format_string(messages, format, config)?;
    fs::write(path, &rendered)?;
    debug!(path, %format, bytes = rendered.len(), "wrote conversation");
    Ok(())
}
