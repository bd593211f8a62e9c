//! Ordered-rule classification of sanitized transcript lines.
//!
//! Exports come in two dialects that differ only in how the header is
//! framed:
//!
//! - Bracketed (iOS): `[14/08/2023, 15:30:00] Alice: Hello`
//! - Dashed (Android): `14/08/2023, 15:30 - Alice: Hello`
//!
//! Each dialect has an authored form (`Author: body` after the header) and a
//! notice form (free text after the header). The notice form accepts every
//! line the authored form accepts, so the rules are evaluated in a fixed
//! order: both authored rules first, then both notice rules. Anything left is
//! a continuation of the previous message.

use once_cell::sync::Lazy;
use regex::Regex;

/// `<date>[,] <time>` with `d/m/y` dates and optional seconds.
const STAMP: &str = r"\d{1,2}/\d{1,2}/\d{2,4},? \d{1,2}:\d{2}(?::\d{2})?";

/// Surface syntax of a header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Timestamp in square brackets.
    /// Example: [14/08/2023, 15:30:00] Alice: Hello
    Bracketed,
    /// Timestamp followed by ` - `.
    /// Example: 14/08/2023, 15:30 - Alice: Hello
    Dashed,
}

/// What a rule recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Authored,
    Notice,
}

/// Result of classifying one sanitized line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Header with an `Author: ` segment.
    Authored {
        dialect: Dialect,
        stamp: &'a str,
        author: &'a str,
        body: &'a str,
    },
    /// Header without an author, e.g. "Messages are end-to-end encrypted".
    Notice {
        dialect: Dialect,
        stamp: &'a str,
        body: &'a str,
    },
    /// No header: extends the open message, if any.
    Continuation,
}

impl LineClass<'_> {
    /// Returns `true` if the line opens a new message.
    pub fn is_header(&self) -> bool {
        !matches!(self, LineClass::Continuation)
    }
}

/// One matcher in the classification order.
#[derive(Debug)]
pub struct Rule {
    kind: RuleKind,
    dialect: Dialect,
    regex: Regex,
}

impl Rule {
    fn new(kind: RuleKind, dialect: Dialect) -> Self {
        let pattern = match (kind, dialect) {
            (RuleKind::Authored, Dialect::Bracketed) => format!(r"^\[({STAMP})\] (.*?): (.*)"),
            (RuleKind::Authored, Dialect::Dashed) => format!(r"^({STAMP}) - (.*?): (.*)"),
            (RuleKind::Notice, Dialect::Bracketed) => format!(r"^\[({STAMP})\] (.*)"),
            (RuleKind::Notice, Dialect::Dashed) => format!(r"^({STAMP}) - (.*)"),
        };

        Self {
            kind,
            dialect,
            regex: Regex::new(&pattern).expect("line patterns are static and valid"),
        }
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Applies this rule alone, ignoring the others.
    pub fn apply<'a>(&self, line: &'a str) -> Option<LineClass<'a>> {
        let caps = self.regex.captures(line)?;
        let stamp = caps.get(1).map_or("", |m| m.as_str());

        match self.kind {
            RuleKind::Authored => Some(LineClass::Authored {
                dialect: self.dialect,
                stamp,
                author: caps.get(2).map_or("", |m| m.as_str()),
                body: caps.get(3).map_or("", |m| m.as_str()),
            }),
            RuleKind::Notice => Some(LineClass::Notice {
                dialect: self.dialect,
                stamp,
                body: caps.get(2).map_or("", |m| m.as_str()),
            }),
        }
    }
}

static RULES: Lazy<[Rule; 4]> = Lazy::new(|| {
    [
        Rule::new(RuleKind::Authored, Dialect::Bracketed),
        Rule::new(RuleKind::Authored, Dialect::Dashed),
        Rule::new(RuleKind::Notice, Dialect::Bracketed),
        Rule::new(RuleKind::Notice, Dialect::Dashed),
    ]
});

/// Returns the rules in evaluation order.
pub fn rules() -> &'static [Rule] {
    RULES.as_slice()
}

/// Classifies a sanitized line. The first matching rule wins.
///
/// ```
/// use chatweave::parsing::{classify_line, LineClass};
///
/// match classify_line("14/08/23, 09:05 - Bob: see you") {
///     LineClass::Authored { author, body, .. } => {
///         assert_eq!(author, "Bob");
///         assert_eq!(body, "see you");
///     }
///     other => panic!("unexpected {other:?}"),
/// }
///
/// assert_eq!(classify_line("just more text"), LineClass::Continuation);
/// ```
pub fn classify_line(line: &str) -> LineClass<'_> {
    rules()
        .iter()
        .find_map(|rule| rule.apply(line))
        .unwrap_or(LineClass::Continuation)
}
