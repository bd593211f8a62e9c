//! Summary statistics over a parsed conversation.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::conversation::Conversation;
use crate::message::AttachmentKind;

/// Per-author message count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorCount {
    pub author: String,
    pub messages: usize,
}

/// Statistics about a conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationStats {
    pub total_messages: usize,
    pub system_notices: usize,
    /// Authored messages per participant, in participant order
    pub per_author: Vec<AuthorCount>,
    pub images: usize,
    pub videos: usize,
    pub audio: usize,
    pub documents: usize,
    pub first_timestamp: Option<DateTime<Utc>>,
    pub last_timestamp: Option<DateTime<Utc>>,
}

impl ConversationStats {
    pub fn from_conversation(conversation: &Conversation) -> Self {
        let mut per_author: Vec<AuthorCount> = conversation
            .participants
            .iter()
            .map(|author| AuthorCount {
                author: author.clone(),
                messages: 0,
            })
            .collect();

        let mut stats = Self {
            total_messages: conversation.messages.len(),
            system_notices: 0,
            per_author: Vec::new(),
            images: 0,
            videos: 0,
            audio: 0,
            documents: 0,
            first_timestamp: conversation.started_at(),
            last_timestamp: conversation.ended_at(),
        };

        for msg in &conversation.messages {
            if msg.is_system_notice {
                stats.system_notices += 1;
            } else if let Some(entry) = per_author.iter_mut().find(|e| e.author == msg.author) {
                entry.messages += 1;
            }

            match msg.attachment.as_ref().map(|a| a.kind) {
                Some(AttachmentKind::Image) => stats.images += 1,
                Some(AttachmentKind::Video) => stats.videos += 1,
                Some(AttachmentKind::Audio) => stats.audio += 1,
                Some(AttachmentKind::Document) => stats.documents += 1,
                None => {}
            }
        }

        stats.per_author = per_author;
        stats
    }

    pub fn attachments(&self) -> usize {
        self.images + self.videos + self.audio + self.documents
    }

    /// Number of authored (non-notice) messages.
    pub fn authored_messages(&self) -> usize {
        self.total_messages - self.system_notices
    }

    /// Share of authored messages written by `author`, as a percentage.
    pub fn share_of(&self, author: &str) -> f64 {
        let authored = self.authored_messages();
        if authored == 0 {
            return 0.0;
        }
        self.per_author
            .iter()
            .find(|e| e.author == author)
            .map(|e| e.messages as f64 / authored as f64 * 100.0)
            .unwrap_or(0.0)
    }
}
