//! Serializable view of a message, trimmed to the enabled [`OutputConfig`] fields.

use chrono::SecondsFormat;
use serde::Serialize;

use crate::Message;
use crate::core::models::OutputConfig;
use crate::message::AttachmentKind;

/// One message as emitted by the JSON and JSON Lines writers.
#[derive(Serialize)]
pub(super) struct OutputRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    author: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    system: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachment: Option<OutputAttachment<'a>>,
}

#[derive(Serialize)]
struct OutputAttachment<'a> {
    kind: AttachmentKind,
    file_name: &'a str,
    locator: &'a str,
}

impl<'a> OutputRecord<'a> {
    pub(super) fn from_message(msg: &'a Message, config: &OutputConfig) -> Self {
        Self {
            id: config.include_ids.then_some(msg.id.as_str()),
            timestamp: config
                .include_timestamps
                .then(|| msg.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)),
            author: &msg.author,
            content: &msg.content,
            system: msg.is_system_notice,
            attachment: if config.include_attachments {
                msg.attachment.as_ref().map(|a| OutputAttachment {
                    kind: a.kind,
                    file_name: &a.file_name,
                    locator: &a.locator,
                })
            } else {
                None
            },
        }
    }
}
