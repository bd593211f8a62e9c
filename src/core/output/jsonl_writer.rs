//! JSON Lines (JSONL) output writer.
//!
//! One message per line, suited to ingestion pipelines that read records
//! one at a time.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::record::OutputRecord;
use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Writes messages to a JSON Lines file.
///
/// ```jsonl
/// {"author":"Alice","content":"Hello"}
/// {"author":"Bob","content":"Hi"}
/// ```
pub fn write_jsonl(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(messages, &mut writer, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSON Lines string.
pub fn to_jsonl(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(messages, &mut buffer, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_lines<W: Write>(messages: &[Message], out: &mut W, config: &OutputConfig) -> Result<()> {
    for msg in messages.iter().filter(|m| config.keeps(m)) {
        let line = serde_json::to_string(&OutputRecord::from_message(msg, config))?;
        writeln!(out, "{line}")?;
    }
    Ok(())
}
