//! Message and attachment types produced by the transcript parser.
//!
//! A [`Message`] is one conversational turn or one export-generated notice.
//! Authored messages carry the captured author name; notices carry the
//! configured system sentinel and set [`Message::is_system_notice`].
//!
//! # Examples
//!
//! ```
//! use chatweave::message::{Attachment, AttachmentKind, Message};
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2023, 8, 14, 15, 30, 0).unwrap();
//! let msg = Message::authored("msg-0", ts, "Alice", "")
//!     .with_attachment(Attachment::new("photo.jpg", "blob://1"));
//!
//! assert!(msg.is_attachment_only());
//! assert_eq!(msg.attachment().map(Attachment::kind), Some(AttachmentKind::Image));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Media category of an attachment, inferred from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Video,
    Audio,
    /// Fallback for every extension not listed elsewhere.
    #[default]
    Document,
}

impl AttachmentKind {
    /// Infers the kind from a file name's extension (case-insensitive).
    ///
    /// ```
    /// use chatweave::message::AttachmentKind;
    ///
    /// assert_eq!(AttachmentKind::from_file_name("photo.PNG"), AttachmentKind::Image);
    /// assert_eq!(AttachmentKind::from_file_name("note.opus"), AttachmentKind::Audio);
    /// assert_eq!(AttachmentKind::from_file_name("resume.pdf"), AttachmentKind::Document);
    /// assert_eq!(AttachmentKind::from_file_name("README"), AttachmentKind::Document);
    /// ```
    pub fn from_file_name(file_name: &str) -> Self {
        let Some((_, ext)) = file_name.rsplit_once('.') else {
            return AttachmentKind::Document;
        };

        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" => AttachmentKind::Image,
            "mp4" | "mov" | "avi" | "mkv" => AttachmentKind::Video,
            "mp3" | "wav" | "ogg" | "opus" | "m4a" => AttachmentKind::Audio,
            _ => AttachmentKind::Document,
        }
    }

    /// Returns all kinds in display order.
    pub fn all() -> &'static [AttachmentKind] {
        &[
            AttachmentKind::Image,
            AttachmentKind::Video,
            AttachmentKind::Audio,
            AttachmentKind::Document,
        ]
    }
}

impl std::fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachmentKind::Image => write!(f, "image"),
            AttachmentKind::Video => write!(f, "video"),
            AttachmentKind::Audio => write!(f, "audio"),
            AttachmentKind::Document => write!(f, "document"),
        }
    }
}

/// A reference to media that was bundled with the export.
///
/// The locator is whatever the caller put in the attachment map (a URL, a
/// blob handle, a filesystem path). It is never opened or validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub kind: AttachmentKind,
    pub locator: String,
    pub file_name: String,
}

impl Attachment {
    /// Creates an attachment, inferring its kind from `file_name`.
    pub fn new(file_name: impl Into<String>, locator: impl Into<String>) -> Self {
        let file_name = file_name.into();
        Self {
            kind: AttachmentKind::from_file_name(&file_name),
            locator: locator.into(),
            file_name,
        }
    }

    pub fn kind(&self) -> AttachmentKind {
        self.kind
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// One conversational turn or system notice.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `id` | `String` | Run-local identifier derived from the source line index |
/// | `timestamp` | `DateTime<Utc>` | Always set; parse time if the header date was unreadable |
/// | `author` | `String` | Captured author, or the system sentinel for notices |
/// | `content` | `String` | Body text, may hold `\n` and may be empty |
/// | `is_system_notice` | `bool` | `true` for export-generated notices |
/// | `attachment` | `Option<Attachment>` | Set only when the marker resolved |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,

    pub timestamp: DateTime<Utc>,

    pub author: String,

    /// Body text.
    ///
    /// Continuation lines are joined with `\n`. Empty when the whole body
    /// was a resolved attachment marker.
    pub content: String,

    #[serde(default)]
    pub is_system_notice: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub attachment: Option<Attachment>,
}

impl Message {
    /// Creates an authored chat message.
    pub fn authored(
        id: impl Into<String>,
        timestamp: DateTime<Utc>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp,
            author: author.into(),
            content: content.into(),
            is_system_notice: false,
            attachment: None,
        }
    }

    /// Creates a system notice attributed to `sentinel`.
    pub fn notice(
        id: impl Into<String>,
        timestamp: DateTime<Utc>,
        sentinel: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            is_system_notice: true,
            ..Self::authored(id, timestamp, sentinel, content)
        }
    }

    /// Builder method to set the attachment.
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Appends a continuation line, separated by a newline.
    pub fn push_line(&mut self, line: &str) {
        self.content.push('\n');
        self.content.push_str(line);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_system_notice(&self) -> bool {
        self.is_system_notice
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Returns `true` if the message carries an attachment and no text.
    pub fn is_attachment_only(&self) -> bool {
        self.attachment.is_some() && self.content.trim().is_empty()
    }
}
