//! # Chatweave
//!
//! Rebuilds exported WhatsApp-style chat transcripts into an ordered, typed
//! conversation model.
//!
//! ## Overview
//!
//! An export is a newline-delimited text file, optionally shipped with the
//! media it references. Chatweave reads both header dialects (iOS bracketed,
//! Android dashed), folds multi-line messages back together, tags
//! export-generated notices, resolves attachment markers against the files
//! the caller provides, and derives a display title.
//!
//! Parsing never fails. Degraded input (unreadable dates, text before the
//! first header, markers for files that were not exported) is tolerated and
//! counted in [`ParseDiagnostics`](conversation::ParseDiagnostics).
//!
//! ## Quick Start
//!
//! ```rust
//! use chatweave::prelude::*;
//! use std::collections::HashMap;
//!
//! let text = "[14/08/2023, 15:30:00] Alice: Hello\n\
//!             How are you?\n\
//!             [14/08/2023, 15:31:05] Bob: I'm fine";
//!
//! let conversation = ConversationParser::new().parse(text, &HashMap::<String, String>::new());
//!
//! assert_eq!(conversation.title, "Alice, Bob");
//! assert_eq!(conversation.messages[0].content, "Hello\nHow are you?");
//! ```
//!
//! ## Loading an export from disk
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "bundle", feature = "csv-output"))]
//! # fn main() -> chatweave::Result<()> {
//! use chatweave::prelude::*;
//!
//! let bundle = ExportBundle::load("WhatsApp Chat with Alice")?;
//! let conversation = bundle.parse(&ConversationParser::new());
//! write_csv(conversation.messages(), "alice.csv", &OutputConfig::new().with_timestamps())?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "bundle", feature = "csv-output")))]
//! # fn main() {}
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`ConversationParser`](parser::ConversationParser), the line aggregator
//! - [`parsing`] - Line sanitizing, classification, timestamps, attachment markers
//! - [`message`] - [`Message`], [`Attachment`](message::Attachment), [`AttachmentKind`](message::AttachmentKind)
//! - [`conversation`] - [`Conversation`], title derivation, excerpts
//! - [`config`] - [`ParseConfig`](config::ParseConfig), [`ExcerptConfig`](config::ExcerptConfig)
//! - [`core`] - Output writers, statistics, transcript rendering
//! - [`format`] - [`OutputFormat`](format::OutputFormat) dispatch
//! - `bundle` - Export directory loading (`bundle` feature)
//! - `cli` - CLI types (`cli` feature)
//! - [`error`] - [`ChatweaveError`], [`Result`]

#[cfg(feature = "bundle")]
pub mod bundle;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod conversation;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;

pub use conversation::Conversation;
pub use error::{ChatweaveError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatweave::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Conversation, Message};

    pub use crate::error::{ChatweaveError, Result};

    pub use crate::config::{ExcerptConfig, ParseConfig};
    pub use crate::conversation::ParseDiagnostics;
    pub use crate::message::{Attachment, AttachmentKind};
    pub use crate::parser::{ConversationParser, parse_conversation};
    pub use crate::parsing::LocatorLookup;

    pub use crate::core::models::OutputConfig;
    pub use crate::core::stats::ConversationStats;
    pub use crate::core::transcript::{TranscriptStyle, render_transcript};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};

    #[cfg(feature = "bundle")]
    pub use crate::bundle::ExportBundle;
}
