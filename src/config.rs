//! Configuration types for parsing and excerpting.
//!
//! These are plain builder structs with no CLI framework dependency, so they
//! can be embedded in other applications or loaded from any serde format.
//!
//! # Example
//!
//! ```rust
//! use chatweave::config::ParseConfig;
//! use chatweave::parser::ConversationParser;
//!
//! let config = ParseConfig::new()
//!     .with_system_author("WhatsApp")
//!     .with_fallback_title("Untitled chat")
//!     .with_attachment_suffix("archivo adjunto");
//!
//! let parser = ConversationParser::with_config(config);
//! ```

use serde::{Deserialize, Serialize};

/// Default localized annotations that follow a file name in the dashed
/// export dialect, e.g. `IMG-0001.jpg (file attached)`.
pub const DEFAULT_ATTACHMENT_SUFFIXES: &[&str] = &["file attached", "arquivo anexado"];

/// Configuration for transcript parsing and title derivation.
///
/// # Example
///
/// ```rust
/// use chatweave::config::ParseConfig;
///
/// let config = ParseConfig::default();
/// assert_eq!(config.system_author, "System");
/// assert_eq!(config.title_max_chars, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Author assigned to notice lines (default: "System")
    pub system_author: String,

    /// Title used when no participant was found (default: "Unknown conversation")
    pub fallback_title: String,

    /// Maximum title length in characters, before the ellipsis (default: 30)
    pub title_max_chars: usize,

    /// Separator between participant names in the title (default: ", ")
    pub title_separator: String,

    /// Marker appended to titles of group chats with more than two participants
    /// (default: "...")
    pub title_ellipsis: String,

    /// Localized "(file attached)" annotations recognized after a file name
    pub attachment_suffixes: Vec<String>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            system_author: "System".to_string(),
            fallback_title: "Unknown conversation".to_string(),
            title_max_chars: 30,
            title_separator: ", ".to_string(),
            title_ellipsis: "...".to_string(),
            attachment_suffixes: DEFAULT_ATTACHMENT_SUFFIXES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl ParseConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the author used for notice lines.
    #[must_use]
    pub fn with_system_author(mut self, author: impl Into<String>) -> Self {
        self.system_author = author.into();
        self
    }

    /// Sets the title used when no participant was detected.
    #[must_use]
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = title.into();
        self
    }

    /// Sets the maximum title length in characters.
    #[must_use]
    pub fn with_title_max_chars(mut self, max: usize) -> Self {
        self.title_max_chars = max;
        self
    }

    /// Sets the separator placed between participant names.
    #[must_use]
    pub fn with_title_separator(mut self, separator: impl Into<String>) -> Self {
        self.title_separator = separator.into();
        self
    }

    /// Sets the marker appended for group chats.
    #[must_use]
    pub fn with_title_ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.title_ellipsis = ellipsis.into();
        self
    }

    /// Adds another localized "(file attached)" annotation.
    #[must_use]
    pub fn with_attachment_suffix(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        if !self.attachment_suffixes.contains(&suffix) {
            self.attachment_suffixes.push(suffix);
        }
        self
    }

    /// Replaces the recognized "(file attached)" annotations.
    #[must_use]
    pub fn with_attachment_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attachment_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }
}

/// How many messages from each end of a conversation go into an excerpt.
///
/// Analysis prompts only need the opening and the most recent part of a
/// chat. The defaults match the summary prompt: 15 from the start and 60
/// from the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcerptConfig {
    /// Messages taken from the start (default: 15)
    pub head: usize,

    /// Messages taken from the end (default: 60)
    pub tail: usize,

    /// Drop system notices before slicing (default: false)
    pub authored_only: bool,
}

impl Default for ExcerptConfig {
    fn default() -> Self {
        Self {
            head: 15,
            tail: 60,
            authored_only: false,
        }
    }
}

impl ExcerptConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wider window used for relationship-style insight prompts (40 + 120).
    pub fn insights() -> Self {
        Self {
            head: 40,
            tail: 120,
            authored_only: false,
        }
    }

    #[must_use]
    pub fn with_head(mut self, head: usize) -> Self {
        self.head = head;
        self
    }

    #[must_use]
    pub fn with_tail(mut self, tail: usize) -> Self {
        self.tail = tail;
        self
    }

    #[must_use]
    pub fn with_authored_only(mut self, authored_only: bool) -> Self {
        self.authored_only = authored_only;
        self
    }
}
