//! Line-level building blocks used by the conversation parser.
//!
//! - [`sanitize`] strips directional marks and whitespace
//! - [`classify`] decides whether a line is authored, a notice, or a continuation
//! - [`timestamp`] turns header date/time text into a UTC instant
//! - [`attachment`] finds and resolves attachment markers
//!
//! Each piece is usable on its own; [`ConversationParser`](crate::parser::ConversationParser)
//! wires them together.

pub mod attachment;
pub mod classify;
pub mod sanitize;
pub mod timestamp;

pub use attachment::{
    AttachmentResolver, LocatorLookup, Marker, MarkerStatus, ResolvedBody,
};
pub use classify::{Dialect, LineClass, Rule, RuleKind, classify_line, rules};
pub use sanitize::sanitize_line;
pub use timestamp::{parse_timestamp, parse_timestamp_or_now};
