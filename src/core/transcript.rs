//! Plain-text transcript rendering for analysis prompts.
//!
//! Pairs with [`Conversation::excerpt`](crate::conversation::Conversation::excerpt):
//! pick the messages, then render them one per line.

use chrono::SecondsFormat;

use crate::Message;

/// Line layout used by [`render_transcript`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranscriptStyle {
    /// `[2023-08-14T15:30:00Z] Alice: Hello`
    #[default]
    Timestamped,
    /// `[Alice]: Hello`
    AuthorOnly,
}

/// Renders `messages` as newline-joined lines in the given style.
///
/// ```
/// use chatweave::core::{TranscriptStyle, render_transcript};
/// use chatweave::Message;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2023, 8, 14, 15, 30, 0).unwrap();
/// let messages = [Message::authored("msg-0", ts, "Alice", "Hello")];
///
/// assert_eq!(
///     render_transcript(messages.iter(), TranscriptStyle::Timestamped),
///     "[2023-08-14T15:30:00Z] Alice: Hello"
/// );
/// assert_eq!(
///     render_transcript(messages.iter(), TranscriptStyle::AuthorOnly),
///     "[Alice]: Hello"
/// );
/// ```
pub fn render_transcript<'a, I>(messages: I, style: TranscriptStyle) -> String
where
    I: IntoIterator<Item = &'a Message>,
{
    messages
        .into_iter()
        .map(|msg| render_line(msg, style))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_line(msg: &Message, style: TranscriptStyle) -> String {
    match style {
        TranscriptStyle::Timestamped => format!(
            "[{}] {}: {}",
            msg.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            msg.author,
            msg.content
        ),
        TranscriptStyle::AuthorOnly => format!("[{}]: {}", msg.author, msg.content),
    }
}
