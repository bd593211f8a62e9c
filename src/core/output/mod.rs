//! Output format writers.
//!
//! - [`write_csv`] / [`to_csv`]: CSV with semicolon delimiter (`csv-output` feature)
//! - [`write_json`] / [`to_json`]: JSON array of messages (`json-output` feature)
//! - [`write_jsonl`] / [`to_jsonl`]: one JSON object per line (`json-output` feature)
//!
//! Every writer honors [`OutputConfig`](crate::core::models::OutputConfig):
//! author and content are always present, the rest is opt-in.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatweave::Result<()> {
//! use chatweave::core::output::{to_csv, write_json, write_jsonl};
//! use chatweave::core::models::OutputConfig;
//! use chatweave::parser::ConversationParser;
//!
//! let conversation = ConversationParser::new()
//!     .parse_text("[14/08/2023, 15:30] Alice: Hello\n[14/08/2023, 15:31] Bob: Hi");
//!
//! let config = OutputConfig::new().with_timestamps();
//!
//! write_json(conversation.messages(), "output.json", &config)?;
//! write_jsonl(conversation.messages(), "output.jsonl", &config)?;
//! let csv_string = to_csv(conversation.messages(), &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;
#[cfg(feature = "json-output")]
mod record;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
