//! Unified error types for chatweave.
//!
//! Parsing a transcript never fails: malformed headers, orphan lines and
//! unresolved attachment markers all degrade silently (see
//! [`ParseDiagnostics`](crate::conversation::ParseDiagnostics)). Errors only
//! come from the edges of the crate: reading export bundles from disk and
//! writing output files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::format::OutputFormat;

/// A specialized [`Result`] type for chatweave operations.
///
/// # Example
///
/// ```rust
/// use chatweave::error::Result;
///
/// fn load_title() -> Result<String> {
///     Ok("Alice, Bob".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatweaveError>;

/// The error type for all fallible chatweave operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatweaveError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file or directory doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The requested output format was compiled out.
    #[error("{format} output requires the `{feature}` feature")]
    FormatUnavailable {
        /// Format that was asked for
        format: OutputFormat,
        /// Cargo feature that enables it
        feature: &'static str,
    },

    /// An export directory contained no transcript text file.
    #[error("No chat transcript (.txt) found in {}", path.display())]
    MissingTranscript {
        /// The directory that was scanned
        path: PathBuf,
    },

    /// Failed to walk an export directory.
    #[cfg(feature = "bundle")]
    #[error("Directory scan error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    ///
    /// Occurs when a transcript or generated output is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ChatweaveError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatweaveError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

impl ChatweaveError {
    pub(crate) fn format_unavailable(format: OutputFormat) -> Self {
        ChatweaveError::FormatUnavailable {
            format,
            feature: format.required_feature(),
        }
    }

    /// Creates a missing transcript error for the scanned directory.
    pub fn missing_transcript(path: impl Into<PathBuf>) -> Self {
        ChatweaveError::MissingTranscript { path: path.into() }
    }

    /// Creates a UTF-8 error with a custom context description.
    pub fn utf8(context: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        ChatweaveError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatweaveError::Io(_))
    }

    /// Returns `true` if no transcript was found in an export directory.
    pub fn is_missing_transcript(&self) -> bool {
        matches!(self, ChatweaveError::MissingTranscript { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err: ChatweaveError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(err.is_io());
        assert!(err.to_string().contains("IO error"));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_format_unavailable_names_feature() {
        let err = ChatweaveError::format_unavailable(OutputFormat::Jsonl);
        assert_eq!(
            err.to_string(),
            "JSONL output requires the `json-output` feature"
        );
    }

    #[test]
    fn test_missing_transcript_display() {
        let err = ChatweaveError::missing_transcript("/tmp/export");
        assert!(err.is_missing_transcript());
        assert!(!err.is_io());
        assert!(err.to_string().contains("/tmp/export"));
    }

    #[test]
    fn test_from_utf8_error() {
        let utf8_err = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err: ChatweaveError = utf8_err.into();
        assert!(err.to_string().contains("UTF-8"));
        assert!(err.to_string().contains("output conversion"));
    }

    #[test]
    fn test_utf8_custom_context() {
        let utf8_err = String::from_utf8(vec![0xc3]).unwrap_err();
        let err = ChatweaveError::utf8("transcript _chat.txt", utf8_err);
        assert!(err.to_string().contains("transcript _chat.txt"));
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: ChatweaveError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }

    #[cfg(feature = "csv-output")]
    #[test]
    fn test_from_csv_error() {
        let csv_err = csv::Error::from(io::Error::other("test"));
        let err: ChatweaveError = csv_err.into();
        assert!(err.to_string().contains("CSV error"));
    }

    #[test]
    fn test_error_debug() {
        let err = ChatweaveError::missing_transcript("export");
        assert!(format!("{:?}", err).contains("MissingTranscript"));
    }
}
