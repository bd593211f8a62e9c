//! CSV output writer.

use std::fs::File;
use std::io::Write;

use chrono::SecondsFormat;

use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Writes messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: depend on [`OutputConfig`]
///   - Basic: `Author`, `Content`
///   - With ids: `ID` first
///   - With timestamps: `Timestamp` before `Author` (RFC 3339)
///   - With attachments: `AttachmentKind`, `AttachmentFile`, `AttachmentLocator`
/// - A trailing `System` column (`true`/`false`) is present while notices are kept
/// - Encoding: UTF-8
pub fn write_csv(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(messages, file, config)
}

/// Converts messages to a CSV string.
///
/// Same format as [`write_csv`], returned in memory.
pub fn to_csv(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(messages, &mut buffer, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(messages: &[Message], out: W, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(build_header(config))?;

    for msg in messages.iter().filter(|m| config.keeps(m)) {
        writer.write_record(build_record(msg, config))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::new();

    if config.include_ids {
        header.push("ID");
    }
    if config.include_timestamps {
        header.push("Timestamp");
    }

    header.push("Author");
    header.push("Content");

    if config.include_attachments {
        header.extend(["AttachmentKind", "AttachmentFile", "AttachmentLocator"]);
    }
    if config.include_notices {
        header.push("System");
    }

    header
}

fn build_record(msg: &Message, config: &OutputConfig) -> Vec<String> {
    let mut record = Vec::new();

    if config.include_ids {
        record.push(msg.id.clone());
    }
    if config.include_timestamps {
        record.push(msg.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true));
    }

    record.push(msg.author.clone());
    record.push(msg.content.clone());

    if config.include_attachments {
        match &msg.attachment {
            Some(a) => {
                record.push(a.kind.to_string());
                record.push(a.file_name.clone());
                record.push(a.locator.clone());
            }
            None => record.extend([String::new(), String::new(), String::new()]),
        }
    }
    if config.include_notices {
        record.push(msg.is_system_notice.to_string());
    }

    record
}
