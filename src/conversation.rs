//! The assembled conversation model.
//!
//! A [`Conversation`] is produced once per parse and is plain data afterward:
//! the participants in first-seen order, every message in source order, and
//! a display title. [`ParseDiagnostics`] records how often the parser had to
//! degrade instead of failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{ExcerptConfig, ParseConfig};
use crate::message::Message;

/// Counters for the degraded outcomes of a parse.
///
/// None of these are errors. They exist so callers can tell a clean export
/// from one where, say, half the headers had unreadable dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseDiagnostics {
    /// Lines in the input, including blank ones
    pub lines_total: usize,
    /// Lines that were empty after sanitizing
    pub blank_lines: usize,
    /// Lines appended to an open message
    pub continuation_lines: usize,
    /// Lines before the first header, discarded
    pub orphan_lines: usize,
    /// Headers whose date/time could not be read (timestamp set to parse time)
    pub timestamp_fallbacks: usize,
    /// Attachment markers matched against the lookup
    pub attachments_resolved: usize,
    /// Attachment markers left as plain text
    pub attachments_unresolved: usize,
}

impl ParseDiagnostics {
    /// Returns `true` if the parse did not degrade anywhere.
    ///
    /// Blank lines and continuations are normal and don't count.
    pub fn is_clean(&self) -> bool {
        self.orphan_lines == 0 && self.timestamp_fallbacks == 0 && self.attachments_unresolved == 0
    }
}

/// A reconstructed chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Distinct authors of non-notice messages, in first-seen order.
    pub participants: Vec<String>,
    /// Every message, in source line order.
    pub messages: Vec<Message>,
    pub title: String,
    #[serde(default)]
    pub diagnostics: ParseDiagnostics,
}

impl Conversation {
    /// Builds a conversation, deriving the title from `participants`.
    pub fn new(
        participants: Vec<String>,
        messages: Vec<Message>,
        diagnostics: ParseDiagnostics,
        config: &ParseConfig,
    ) -> Self {
        let title = derive_title(&participants, config);
        Self {
            participants,
            messages,
            title,
            diagnostics,
        }
    }

    /// An empty conversation with the fallback title.
    pub fn empty(config: &ParseConfig) -> Self {
        Self::new(Vec::new(), Vec::new(), ParseDiagnostics::default(), config)
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn diagnostics(&self) -> &ParseDiagnostics {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterates over authored messages, skipping notices.
    pub fn authored(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| !m.is_system_notice)
    }

    /// Guess at which participant exported the chat.
    ///
    /// Exports usually list the other person first, so the second participant
    /// is preferred, then the first.
    ///
    /// ```
    /// use chatweave::parser::parse_conversation;
    /// use std::collections::HashMap;
    ///
    /// let text = "[1/1/24, 10:00] Ana: oi\n[1/1/24, 10:01] Bruno: oi!";
    /// let conversation = parse_conversation(text, &HashMap::<String, String>::new());
    /// assert_eq!(conversation.default_self_author(), Some("Bruno"));
    /// ```
    pub fn default_self_author(&self) -> Option<&str> {
        self.participants
            .get(1)
            .or_else(|| self.participants.first())
            .map(String::as_str)
    }

    /// Returns the first `head` and last `tail` messages.
    ///
    /// Overlapping ranges are not duplicated: a conversation shorter than
    /// `head + tail` comes back whole.
    pub fn excerpt(&self, config: &ExcerptConfig) -> Vec<&Message> {
        let pool: Vec<&Message> = if config.authored_only {
            self.authored().collect()
        } else {
            self.messages.iter().collect()
        };

        if pool.len() <= config.head.saturating_add(config.tail) {
            return pool;
        }

        let tail_start = pool.len() - config.tail;
        pool[..config.head]
            .iter()
            .chain(&pool[tail_start..])
            .copied()
            .collect()
    }

    /// Timestamp of the first message.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.messages.first().map(|m| m.timestamp)
    }

    /// Timestamp of the last message.
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.messages.last().map(|m| m.timestamp)
    }
}

/// Joins participant names into a display title.
///
/// The joined names are cut at `title_max_chars` characters, and the
/// ellipsis marker is appended whenever there are more than two
/// participants, whether or not the cut happened.
///
/// ```
/// use chatweave::config::ParseConfig;
/// use chatweave::conversation::derive_title;
///
/// let config = ParseConfig::default();
/// let names = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
///
/// assert_eq!(derive_title(&names(&["Alice", "Bob"]), &config), "Alice, Bob");
/// assert_eq!(derive_title(&names(&["A", "B", "C"]), &config), "A, B, C...");
/// assert_eq!(derive_title(&[], &config), "Unknown conversation");
/// ```
pub fn derive_title(participants: &[String], config: &ParseConfig) -> String {
    if participants.is_empty() {
        return config.fallback_title.clone();
    }

    let mut title: String = participants
        .join(&config.title_separator)
        .chars()
        .take(config.title_max_chars)
        .collect();

    if participants.len() > 2 {
        title.push_str(&config.title_ellipsis);
    }

    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| (*s).to_string()).collect()
    }

    fn sample(count: usize) -> Conversation {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let messages = (0..count)
            .map(|i| {
                let ts = base + chrono::Duration::minutes(i as i64);
                if i % 5 == 4 {
                    Message::notice(format!("sys-{i}"), ts, "System", format!("notice {i}"))
                } else {
                    Message::authored(format!("msg-{i}"), ts, "Alice", format!("text {i}"))
                }
            })
            .collect();
        Conversation::new(
            names(&["Alice"]),
            messages,
            ParseDiagnostics::default(),
            &ParseConfig::default(),
        )
    }

    #[test]
    fn test_title_truncates_by_chars() {
        let config = ParseConfig::default();
        let title = derive_title(
            &names(&["Maximiliano Fernández", "Bartholomew Jones"]),
            &config,
        );
        assert_eq!(title.chars().count(), 30);
        assert_eq!(title, "Maximiliano Fernández, Barthol");
    }

    #[test]
    fn test_title_group_truncated_with_ellipsis() {
        let config = ParseConfig::default();
        let title = derive_title(
            &names(&["Alexandra", "Benjamin", "Charlotte", "Dominic"]),
            &config,
        );
        assert_eq!(title, "Alexandra, Benjamin, Charlotte...");
    }

    #[test]
    fn test_title_single_participant() {
        let config = ParseConfig::default();
        assert_eq!(derive_title(&names(&["Alice"]), &config), "Alice");
    }

    #[test]
    fn test_title_custom_config() {
        let config = ParseConfig::new()
            .with_title_separator(" & ")
            .with_title_max_chars(5)
            .with_title_ellipsis("…");
        assert_eq!(derive_title(&names(&["Ann", "Bo", "Cy"]), &config), "Ann &…");
    }

    #[test]
    fn test_empty_conversation() {
        let conversation = Conversation::empty(&ParseConfig::default());
        assert!(conversation.is_empty());
        assert!(conversation.participants().is_empty());
        assert_eq!(conversation.title(), "Unknown conversation");
        assert_eq!(conversation.default_self_author(), None);
        assert_eq!(conversation.started_at(), None);
    }

    #[test]
    fn test_default_self_author_single() {
        let conversation = sample(3);
        assert_eq!(conversation.default_self_author(), Some("Alice"));
    }

    #[test]
    fn test_excerpt_short_conversation_is_whole() {
        let conversation = sample(10);
        let excerpt = conversation.excerpt(&ExcerptConfig::default());
        assert_eq!(excerpt.len(), 10);
    }

    #[test]
    fn test_excerpt_head_and_tail() {
        let conversation = sample(100);
        let config = ExcerptConfig::new().with_head(2).with_tail(3);
        let ids: Vec<&str> = conversation
            .excerpt(&config)
            .iter()
            .map(|m| m.id())
            .collect();
        assert_eq!(ids, vec!["msg-0", "msg-1", "msg-97", "msg-98", "sys-99"]);
    }

    #[test]
    fn test_excerpt_authored_only() {
        let conversation = sample(20);
        let config = ExcerptConfig::new()
            .with_head(1)
            .with_tail(1)
            .with_authored_only(true);
        let ids: Vec<&str> = conversation
            .excerpt(&config)
            .iter()
            .map(|m| m.id())
            .collect();
        assert_eq!(ids, vec!["msg-0", "msg-18"]);
    }

    #[test]
    fn test_excerpt_unbounded_window_is_whole() {
        let conversation = sample(5);
        let huge_head = ExcerptConfig::new().with_head(usize::MAX).with_tail(1);
        assert_eq!(conversation.excerpt(&huge_head).len(), 5);

        let huge_tail = ExcerptConfig::new().with_head(1).with_tail(usize::MAX);
        assert_eq!(conversation.excerpt(&huge_tail).len(), 5);
    }

    #[test]
    fn test_diagnostics_is_clean() {
        let mut diagnostics = ParseDiagnostics {
            blank_lines: 3,
            continuation_lines: 2,
            ..ParseDiagnostics::default()
        };
        assert!(diagnostics.is_clean());

        diagnostics.timestamp_fallbacks = 1;
        assert!(!diagnostics.is_clean());
    }

    #[test]
    fn test_started_and_ended() {
        let conversation = sample(3);
        assert_eq!(
            conversation.started_at(),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            conversation.ended_at(),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 2, 0).unwrap())
        );
    }
}
