//! Output configuration shared by the writers.

/// Controls which optional fields the output writers emit.
///
/// Author and content are always written. Everything else is opt-in,
/// except system notices, which are kept unless explicitly dropped.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Include message timestamps
    pub include_timestamps: bool,
    /// Include run-local message ids
    pub include_ids: bool,
    /// Include attachment kind, file name and locator
    pub include_attachments: bool,
    /// Keep system notices in the output
    pub include_notices: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_timestamps: false,
            include_ids: false,
            include_attachments: false,
            include_notices: true,
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }

    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.include_ids = true;
        self
    }

    #[must_use]
    pub fn with_attachments(mut self) -> Self {
        self.include_attachments = true;
        self
    }

    #[must_use]
    pub fn without_notices(mut self) -> Self {
        self.include_notices = false;
        self
    }

    /// Returns `true` if `message` should be written.
    pub fn keeps(&self, message: &crate::Message) -> bool {
        self.include_notices || !message.is_system_notice
    }
}
