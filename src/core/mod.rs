//! Post-parse processing: output writers, statistics and transcript rendering.
//!
//! - [`models`] - Output configuration
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//! - [`stats`] - Per-participant and attachment statistics
//! - [`transcript`] - Plain-text rendering for analysis prompts

pub mod models;
pub mod output;
pub mod stats;
pub mod transcript;

pub use models::OutputConfig;
pub use stats::{AuthorCount, ConversationStats};
pub use transcript::{TranscriptStyle, render_transcript};

pub use crate::Message;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
