//! Transcript parser: raw export text in, [`Conversation`] out.
//!
//! The parser walks the transcript once, line by line:
//!
//! 1. [`sanitize_line`] cleans the line; blank lines are skipped
//! 2. [`classify_line`] decides authored / notice / continuation
//! 3. headers open a new [`Message`] (timestamp and attachment resolved inline)
//! 4. continuations are appended to the open message, or dropped if none is open
//!
//! Parsing never fails. Unreadable dates, orphan lines and unresolved
//! attachments are counted in [`ParseDiagnostics`] instead.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use chatweave::message::AttachmentKind;
//! use chatweave::parser::ConversationParser;
//!
//! let text = "[14/08/2023, 15:30:00] Alice: Hello\n\
//!             How are you?\n\
//!             [14/08/2023, 15:31:05] Bob: I'm fine <attached: photo.jpg>";
//! let files = HashMap::from([("photo.jpg".to_string(), "blob://1".to_string())]);
//!
//! let conversation = ConversationParser::new().parse(text, &files);
//!
//! assert_eq!(conversation.participants, vec!["Alice", "Bob"]);
//! assert_eq!(conversation.messages[0].content, "Hello\nHow are you?");
//! assert_eq!(
//!     conversation.messages[1].attachment.as_ref().map(|a| a.kind),
//!     Some(AttachmentKind::Image)
//! );
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::ParseConfig;
use crate::conversation::{Conversation, ParseDiagnostics};
use crate::message::Message;
use crate::parsing::{
    AttachmentResolver, LineClass, LocatorLookup, MarkerStatus, classify_line,
    parse_timestamp_or_now, sanitize_line,
};

/// Reusable transcript parser.
///
/// Holds only immutable configuration, so one instance can be shared across
/// threads and used for any number of transcripts.
#[derive(Debug, Clone)]
pub struct ConversationParser {
    config: ParseConfig,
    resolver: AttachmentResolver,
}

impl ConversationParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self::with_config(ParseConfig::default())
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParseConfig) -> Self {
        let resolver = AttachmentResolver::new(&config.attachment_suffixes);
        Self { config, resolver }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Parses a transcript, resolving attachment markers against `lookup`.
    pub fn parse<L: LocatorLookup + ?Sized>(&self, text: &str, lookup: &L) -> Conversation {
        let mut aggregator = Aggregator::new(self, lookup);

        for (index, raw) in text.lines().enumerate() {
            aggregator.feed(index, raw);
        }

        aggregator.finish()
    }

    /// Parses a transcript that came without any media.
    pub fn parse_text(&self, text: &str) -> Conversation {
        self.parse(text, &HashMap::<String, String>::new())
    }
}

impl Default for ConversationParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a transcript with the default configuration.
///
/// ```
/// use std::collections::HashMap;
/// use chatweave::parser::parse_conversation;
///
/// let conversation = parse_conversation("", &HashMap::<String, String>::new());
/// assert!(conversation.messages.is_empty());
/// assert_eq!(conversation.title, "Unknown conversation");
/// ```
pub fn parse_conversation<L: LocatorLookup + ?Sized>(text: &str, lookup: &L) -> Conversation {
    ConversationParser::new().parse(text, lookup)
}

/// Which message continuation lines belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenMessage {
    None,
    At(usize),
}

/// Line-by-line state machine behind [`ConversationParser::parse`].
struct Aggregator<'p, 'l, L: ?Sized> {
    parser: &'p ConversationParser,
    lookup: &'l L,
    messages: Vec<Message>,
    participants: Vec<String>,
    open: OpenMessage,
    diagnostics: ParseDiagnostics,
}

impl<'p, 'l, L: LocatorLookup + ?Sized> Aggregator<'p, 'l, L> {
    fn new(parser: &'p ConversationParser, lookup: &'l L) -> Self {
        Self {
            parser,
            lookup,
            messages: Vec::new(),
            participants: Vec::new(),
            open: OpenMessage::None,
            diagnostics: ParseDiagnostics::default(),
        }
    }

    fn feed(&mut self, index: usize, raw: &str) {
        self.diagnostics.lines_total += 1;

        let line = sanitize_line(raw);
        if line.is_empty() {
            self.diagnostics.blank_lines += 1;
            return;
        }

        match classify_line(&line) {
            LineClass::Authored {
                stamp,
                author,
                body,
                ..
            } => self.open_authored(index, stamp, author, body),
            LineClass::Notice { stamp, body, .. } => self.open_notice(index, stamp, body),
            LineClass::Continuation => self.continue_open(index, &line),
        }
    }

    fn open_authored(&mut self, index: usize, stamp: &str, author: &str, body: &str) {
        let timestamp = self.timestamp(index, stamp);
        let resolved = self.parser.resolver.resolve(body, self.lookup);

        match resolved.status {
            MarkerStatus::Resolved => self.diagnostics.attachments_resolved += 1,
            MarkerStatus::Unresolved => {
                self.diagnostics.attachments_unresolved += 1;
                debug!(line = index + 1, "attachment marker not found in provided files");
            }
            MarkerStatus::Absent => {}
        }

        if author != self.parser.config.system_author
            && !self.participants.iter().any(|p| p == author)
        {
            self.participants.push(author.to_string());
        }

        let mut message =
            Message::authored(format!("msg-{index}"), timestamp, author, resolved.content);
        message.attachment = resolved.attachment;
        self.push(message);
    }

    fn open_notice(&mut self, index: usize, stamp: &str, body: &str) {
        let timestamp = self.timestamp(index, stamp);
        let notice = Message::notice(
            format!("sys-{index}"),
            timestamp,
            self.parser.config.system_author.as_str(),
            body,
        );
        self.push(notice);
    }

    fn continue_open(&mut self, index: usize, line: &str) {
        match self.open {
            OpenMessage::At(open) => {
                self.messages[open].push_line(line);
                self.diagnostics.continuation_lines += 1;
            }
            OpenMessage::None => {
                self.diagnostics.orphan_lines += 1;
                debug!(line = index + 1, "dropping text before the first message header");
            }
        }
    }

    fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.open = OpenMessage::At(self.messages.len() - 1);
    }

    fn timestamp(&mut self, index: usize, stamp: &str) -> DateTime<Utc> {
        let (timestamp, fell_back) = parse_timestamp_or_now(stamp);
        if fell_back {
            self.diagnostics.timestamp_fallbacks += 1;
            debug!(line = index + 1, stamp, "unreadable header timestamp, using current time");
        }
        timestamp
    }

    fn finish(self) -> Conversation {
        info!(
            messages = self.messages.len(),
            participants = self.participants.len(),
            orphan_lines = self.diagnostics.orphan_lines,
            timestamp_fallbacks = self.diagnostics.timestamp_fallbacks,
            "parsed transcript"
        );

        Conversation::new(
            self.participants,
            self.messages,
            self.diagnostics,
            &self.parser.config,
        )
    }
}
