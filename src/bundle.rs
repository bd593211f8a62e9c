//! Loading exports from disk.
//!
//! An export is either a bare transcript file or a directory holding an
//! extracted export archive: one transcript plus the media files it
//! references. [`ExportBundle::load`] handles both and builds the
//! file name to locator map the parser resolves markers against.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatweave::bundle::ExportBundle;
//! use chatweave::parser::ConversationParser;
//!
//! # fn main() -> chatweave::Result<()> {
//! let bundle = ExportBundle::load("WhatsApp Chat with Alice")?;
//! let conversation = bundle.parse(&ConversationParser::new());
//! println!("{}: {} messages", conversation.title, conversation.len());
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::conversation::Conversation;
use crate::error::{ChatweaveError, Result};
use crate::parser::ConversationParser;

/// File name the iOS exporter gives the transcript inside an archive.
pub const TRANSCRIPT_FILE_NAME: &str = "_chat.txt";

/// Resource-fork directory added by macOS archivers.
const MACOS_METADATA_DIR: &str = "__MACOSX";

/// A transcript together with the media shipped next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    /// Where the transcript was read from
    pub transcript_path: PathBuf,
    /// Raw transcript text
    pub transcript: String,
    /// Bare file name to filesystem path, for every non-transcript file
    pub attachments: HashMap<String, String>,
}

impl ExportBundle {
    /// Loads a transcript file or an extracted export directory.
    ///
    /// In a directory, `_chat.txt` is preferred; otherwise the first `.txt`
    /// file in sorted traversal order is used. Entries under `__MACOSX` are
    /// ignored. If two media files share a bare name, the later one in
    /// traversal order wins.
    ///
    /// # Errors
    ///
    /// - [`ChatweaveError::Io`] if the path can't be read
    /// - [`ChatweaveError::MissingTranscript`] if a directory has no `.txt` file
    /// - [`ChatweaveError::Utf8`] if the transcript is not valid UTF-8
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            Self::load_dir(path)
        } else {
            Self::load_file(path)
        }
    }

    /// Loads a single transcript with no attachments.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let transcript = read_transcript(path)?;
        debug!(path = %path.display(), bytes = transcript.len(), "loaded transcript file");

        Ok(Self {
            transcript_path: path.to_path_buf(),
            transcript,
            attachments: HashMap::new(),
        })
    }

    /// Loads an extracted export directory.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut text_files = Vec::new();
        let mut media = Vec::new();

        let walker = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_macos_metadata(e));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if has_txt_extension(entry.path()) {
                text_files.push(entry.into_path());
            } else {
                media.push(entry.into_path());
            }
        }

        let transcript_index = text_files
            .iter()
            .position(|p| p.file_name().is_some_and(|n| n == TRANSCRIPT_FILE_NAME))
            .or_else(|| (!text_files.is_empty()).then_some(0))
            .ok_or_else(|| ChatweaveError::missing_transcript(dir))?;
        let transcript_path = text_files.remove(transcript_index);

        // Other text files are attachments too (shared notes, exported docs).
        let attachments: HashMap<String, String> = media
            .into_iter()
            .chain(text_files)
            .filter_map(|p| {
                let name = p.file_name()?.to_string_lossy().into_owned();
                Some((name, p.to_string_lossy().into_owned()))
            })
            .collect();

        let transcript = read_transcript(&transcript_path)?;

        info!(
            dir = %dir.display(),
            transcript = %transcript_path.display(),
            attachments = attachments.len(),
            "loaded export directory"
        );

        Ok(Self {
            transcript_path,
            transcript,
            attachments,
        })
    }

    /// Parses the transcript, resolving markers against the bundled files.
    pub fn parse(&self, parser: &ConversationParser) -> Conversation {
        parser.parse(&self.transcript, &self.attachments)
    }
}

fn read_transcript(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes)
        .map_err(|e| ChatweaveError::utf8(format!("transcript {}", path.display()), e))?;

    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

fn is_macos_metadata(entry: &DirEntry) -> bool {
    entry.file_name() == MACOS_METADATA_DIR
}

fn has_txt_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::AttachmentKind;
    use tempfile::TempDir;

    const TRANSCRIPT: &str = "[14/08/2023, 15:30:00] Alice: <attached: photo.jpg>\n[14/08/2023, 15:31:00] Bob: nice";

    fn write(dir: &Path, rel: &str, contents: &[u8]) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_load_plain_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "chat.txt", TRANSCRIPT.as_bytes());

        let bundle = ExportBundle::load(dir.path().join("chat.txt")).unwrap();
        assert_eq!(bundle.transcript, TRANSCRIPT);
        assert!(bundle.attachments.is_empty());
    }

    #[test]
    fn test_load_dir_prefers_chat_txt() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "_chat.txt", TRANSCRIPT.as_bytes());
        write(dir.path(), "a-notes.txt", b"not the transcript");
        write(dir.path(), "photo.jpg", b"\xff\xd8");

        let bundle = ExportBundle::load(dir.path()).unwrap();
        assert!(bundle.transcript_path.ends_with("_chat.txt"));
        assert!(bundle.attachments.contains_key("a-notes.txt"));
        assert!(bundle.attachments.contains_key("photo.jpg"));
        assert!(!bundle.attachments.contains_key("_chat.txt"));
    }

    #[test]
    fn test_load_dir_falls_back_to_first_txt() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.txt", b"second");
        write(dir.path(), "a.txt", TRANSCRIPT.as_bytes());

        let bundle = ExportBundle::load(dir.path()).unwrap();
        assert!(bundle.transcript_path.ends_with("a.txt"));
        assert_eq!(bundle.transcript, TRANSCRIPT);
    }

    #[test]
    fn test_load_dir_skips_macos_metadata() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "__MACOSX/._chat.txt", b"\x00\x05");
        write(dir.path(), "__MACOSX/._photo.jpg", b"\x00");
        write(dir.path(), "export/chat.txt", TRANSCRIPT.as_bytes());

        let bundle = ExportBundle::load(dir.path()).unwrap();
        assert!(bundle.transcript_path.ends_with("export/chat.txt"));
        assert!(bundle.attachments.is_empty());
    }

    #[test]
    fn test_load_dir_without_transcript() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "photo.jpg", b"\xff\xd8");

        let err = ExportBundle::load(dir.path()).unwrap_err();
        assert!(err.is_missing_transcript());
    }

    #[test]
    fn test_load_missing_path() {
        let err = ExportBundle::load("/definitely/not/here.txt").unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_invalid_utf8_transcript() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "chat.txt", b"\xff\xfe\x00bad");
        let err = ExportBundle::load(dir.path().join("chat.txt")).unwrap_err();
        assert!(matches!(err, ChatweaveError::Utf8 { .. }));
    }

    #[test]
    fn test_byte_order_mark_stripped() {
        let dir = TempDir::new().unwrap();
        let mut bytes = "\u{feff}".as_bytes().to_vec();
        bytes.extend_from_slice(TRANSCRIPT.as_bytes());
        write(dir.path(), "chat.txt", &bytes);

        let bundle = ExportBundle::load(dir.path().join("chat.txt")).unwrap();
        assert!(bundle.transcript.starts_with('['));
    }

    #[test]
    fn test_parse_resolves_bundled_media() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "_chat.txt", TRANSCRIPT.as_bytes());
        write(dir.path(), "photo.jpg", b"\xff\xd8");

        let bundle = ExportBundle::load(dir.path()).unwrap();
        let conversation = bundle.parse(&ConversationParser::new());

        let attachment = conversation.messages[0].attachment.as_ref().unwrap();
        assert_eq!(attachment.kind, AttachmentKind::Image);
        assert!(attachment.locator.ends_with("photo.jpg"));
        assert_eq!(conversation.messages[0].content, "");
        assert!(conversation.diagnostics.is_clean());
    }
}
