//! JSON output writer.

use std::fs::File;
use std::io::Write;

use super::record::OutputRecord;
use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Writes messages to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {"author": "Alice", "content": "Hello"},
///   {"author": "System", "content": "Alice joined", "system": true}
/// ]
/// ```
pub fn write_json(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(messages, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts messages to a JSON array string.
pub fn to_json(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let records: Vec<OutputRecord<'_>> = messages
        .iter()
        .filter(|m| config.keeps(m))
        .map(|m| OutputRecord::from_message(m, config))
        .collect();

    Ok(serde_json::to_string_pretty(&records)?)
}
