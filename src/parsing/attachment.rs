//! Attachment marker detection and resolution.
//!
//! Two marker syntaxes appear in message bodies:
//!
//! - Suffix: `IMG-20230814-WA0001.jpg (file attached)`, with the annotation
//!   localized by the exporting device (`arquivo anexado`, ...)
//! - Angle: `<attached: 00000012-PHOTO-2023-08-14.jpg>`
//!
//! A marker only becomes an [`Attachment`] when its file name is present in
//! the caller's lookup table. Otherwise the body is left untouched.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::message::Attachment;

static ANGLE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<attached: (.+)>").expect("angle marker pattern is valid"));

/// Maps bare file names (as written in markers) to opaque locators.
///
/// Implemented for `HashMap<String, String>` and `BTreeMap<String, String>`.
/// Empty locators count as missing.
pub trait LocatorLookup {
    fn locate(&self, file_name: &str) -> Option<&str>;
}

impl<S: BuildHasher> LocatorLookup for HashMap<String, String, S> {
    fn locate(&self, file_name: &str) -> Option<&str> {
        self.get(file_name)
            .map(String::as_str)
            .filter(|locator| !locator.is_empty())
    }
}

impl LocatorLookup for BTreeMap<String, String> {
    fn locate(&self, file_name: &str) -> Option<&str> {
        self.get(file_name)
            .map(String::as_str)
            .filter(|locator| !locator.is_empty())
    }
}

impl<T: LocatorLookup + ?Sized> LocatorLookup for &T {
    fn locate(&self, file_name: &str) -> Option<&str> {
        (**self).locate(file_name)
    }
}

/// A marker found in a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker<'a> {
    /// Trimmed file name.
    pub file_name: &'a str,
    /// The matched marker text, as it appears in the body.
    pub text: &'a str,
}

/// What happened to a body's attachment marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStatus {
    /// No marker in the body.
    Absent,
    /// Marker found and its file name was in the lookup.
    Resolved,
    /// Marker found but the file was not provided.
    Unresolved,
}

/// Body text after attachment resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBody {
    pub content: String,
    pub attachment: Option<Attachment>,
    pub status: MarkerStatus,
}

/// Finds and resolves attachment markers.
#[derive(Debug, Clone)]
pub struct AttachmentResolver {
    /// Pre-rendered ` (<suffix>)` needles.
    suffix_markers: Vec<String>,
}

impl AttachmentResolver {
    /// Creates a resolver recognizing the given localized annotations.
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            suffix_markers: suffixes
                .into_iter()
                .filter(|s| !s.as_ref().is_empty())
                .map(|s| format!(" ({})", s.as_ref()))
                .collect(),
        }
    }

    /// Locates the first marker in `body`. Suffix markers are tried first.
    ///
    /// For suffix markers the file name is everything before the earliest
    /// annotation, so a caption typed on the same line becomes part of the
    /// name (and usually fails to resolve).
    pub fn find_marker<'a>(&self, body: &'a str) -> Option<Marker<'a>> {
        self.find_suffix_marker(body)
            .or_else(|| Self::find_angle_marker(body))
    }

    fn find_suffix_marker<'a>(&self, body: &'a str) -> Option<Marker<'a>> {
        let (start, needle) = self
            .suffix_markers
            .iter()
            .filter_map(|needle| {
                body.match_indices(needle.as_str())
                    .map(|(idx, _)| idx)
                    .find(|&idx| idx > 0)
                    .map(|idx| (idx, needle))
            })
            .min_by_key(|(idx, _)| *idx)?;

        Some(Marker {
            file_name: body[..start].trim(),
            text: &body[..start + needle.len()],
        })
    }

    fn find_angle_marker(body: &str) -> Option<Marker<'_>> {
        let caps = ANGLE_MARKER.captures(body)?;
        Some(Marker {
            file_name: caps.get(1)?.as_str().trim(),
            text: caps.get(0)?.as_str(),
        })
    }

    /// Resolves the body of an authored message against `lookup`.
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use chatweave::message::AttachmentKind;
    /// use chatweave::parsing::{AttachmentResolver, MarkerStatus};
    ///
    /// let resolver = AttachmentResolver::new(["file attached"]);
    /// let files = HashMap::from([("photo.jpg".to_string(), "blob://1".to_string())]);
    ///
    /// let resolved = resolver.resolve("<attached: photo.jpg>", &files);
    /// assert_eq!(resolved.status, MarkerStatus::Resolved);
    /// assert_eq!(resolved.content, "");
    /// assert_eq!(resolved.attachment.unwrap().kind, AttachmentKind::Image);
    ///
    /// let missing = resolver.resolve("<attached: other.jpg>", &files);
    /// assert_eq!(missing.status, MarkerStatus::Unresolved);
    /// assert_eq!(missing.content, "<attached: other.jpg>");
    /// ```
    pub fn resolve<L: LocatorLookup + ?Sized>(&self, body: &str, lookup: &L) -> ResolvedBody {
        let Some(marker) = self.find_marker(body) else {
            return ResolvedBody {
                content: body.to_string(),
                attachment: None,
                status: MarkerStatus::Absent,
            };
        };

        let Some(locator) = lookup.locate(marker.file_name) else {
            return ResolvedBody {
                content: body.to_string(),
                attachment: None,
                status: MarkerStatus::Unresolved,
            };
        };

        let content = if body.trim() == marker.text.trim() {
            String::new()
        } else {
            body.replacen(marker.text, "", 1)
        };

        ResolvedBody {
            content,
            attachment: Some(Attachment::new(marker.file_name, locator)),
            status: MarkerStatus::Resolved,
        }
    }
}

impl Default for AttachmentResolver {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_ATTACHMENT_SUFFIXES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::AttachmentKind;

    fn files(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_find_angle_marker() {
        let resolver = AttachmentResolver::default();
        assert_eq!(
            resolver.find_marker("<attached: 00000012-PHOTO.jpg>"),
            Some(Marker {
                file_name: "00000012-PHOTO.jpg",
                text: "<attached: 00000012-PHOTO.jpg>",
            })
        );
    }

    #[test]
    fn test_find_suffix_marker() {
        let resolver = AttachmentResolver::default();
        assert_eq!(
            resolver.find_marker("IMG-20230814-WA0001.jpg (file attached)"),
            Some(Marker {
                file_name: "IMG-20230814-WA0001.jpg",
                text: "IMG-20230814-WA0001.jpg (file attached)",
            })
        );
    }

    #[test]
    fn test_find_localized_suffix_marker() {
        let resolver = AttachmentResolver::default();
        let marker = resolver
            .find_marker("PTT-20230814-WA0002.opus (arquivo anexado)")
            .unwrap();
        assert_eq!(marker.file_name, "PTT-20230814-WA0002.opus");
    }

    #[test]
    fn test_custom_suffix() {
        let resolver = AttachmentResolver::new(["archivo adjunto"]);
        assert!(resolver.find_marker("a.pdf (file attached)").is_none());
        assert_eq!(
            resolver.find_marker("a.pdf (archivo adjunto)").unwrap().file_name,
            "a.pdf"
        );
    }

    #[test]
    fn test_suffix_needs_a_file_name() {
        let resolver = AttachmentResolver::default();
        assert!(resolver.find_marker(" (file attached)").is_none());
    }

    #[test]
    fn test_earliest_suffix_wins() {
        let resolver = AttachmentResolver::default();
        let marker = resolver
            .find_marker("a.jpg (arquivo anexado) b.jpg (file attached)")
            .unwrap();
        assert_eq!(marker.file_name, "a.jpg");
    }

    #[test]
    fn test_no_marker() {
        let resolver = AttachmentResolver::default();
        let resolved = resolver.resolve("see attached file", &files(&[]));
        assert_eq!(resolved.status, MarkerStatus::Absent);
        assert_eq!(resolved.content, "see attached file");
        assert!(resolved.attachment.is_none());
    }

    #[test]
    fn test_resolved_marker_only_body_is_cleared() {
        let resolver = AttachmentResolver::default();
        let lookup = files(&[("IMG-1.jpg", "blob://img")]);
        let resolved = resolver.resolve("IMG-1.jpg (file attached)", &lookup);

        assert_eq!(resolved.status, MarkerStatus::Resolved);
        assert_eq!(resolved.content, "");
        let attachment = resolved.attachment.unwrap();
        assert_eq!(attachment.kind, AttachmentKind::Image);
        assert_eq!(attachment.locator, "blob://img");
        assert_eq!(attachment.file_name, "IMG-1.jpg");
    }

    #[test]
    fn test_resolved_marker_keeps_caption() {
        let resolver = AttachmentResolver::default();
        let lookup = files(&[("photo.jpg", "blob://1")]);
        let resolved = resolver.resolve("I'm fine <attached: photo.jpg>", &lookup);

        assert_eq!(resolved.content, "I'm fine ");
        assert_eq!(resolved.attachment.unwrap().locator, "blob://1");
    }

    #[test]
    fn test_unresolved_marker_keeps_text() {
        let resolver = AttachmentResolver::default();
        let lookup = files(&[("other.jpg", "blob://1")]);
        let resolved = resolver.resolve("IMG-1.jpg (file attached)", &lookup);

        assert_eq!(resolved.status, MarkerStatus::Unresolved);
        assert_eq!(resolved.content, "IMG-1.jpg (file attached)");
        assert!(resolved.attachment.is_none());
    }

    #[test]
    fn test_empty_locator_counts_as_missing() {
        let resolver = AttachmentResolver::default();
        let lookup = files(&[("a.pdf", "")]);
        let resolved = resolver.resolve("<attached: a.pdf>", &lookup);
        assert_eq!(resolved.status, MarkerStatus::Unresolved);
    }

    #[test]
    fn test_file_name_is_trimmed_for_lookup() {
        let resolver = AttachmentResolver::default();
        let lookup = files(&[("doc.pdf", "file:///tmp/doc.pdf")]);
        let resolved = resolver.resolve("<attached:  doc.pdf >", &lookup);
        assert_eq!(resolved.status, MarkerStatus::Resolved);
        assert_eq!(resolved.attachment.unwrap().kind, AttachmentKind::Document);
    }

    #[test]
    fn test_btreemap_lookup() {
        let resolver = AttachmentResolver::default();
        let lookup: BTreeMap<String, String> =
            BTreeMap::from([("v.mp4".to_string(), "blob://v".to_string())]);
        let resolved = resolver.resolve("<attached: v.mp4>", &lookup);
        assert_eq!(resolved.attachment.unwrap().kind, AttachmentKind::Video);
    }
}
