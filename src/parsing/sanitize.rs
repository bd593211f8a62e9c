//! Line cleanup applied before classification.

/// Left-to-right mark, inserted by some exporters next to timestamps.
const LRM: char = '\u{200E}';
/// Right-to-left mark.
const RLM: char = '\u{200F}';

/// Removes directional marks and trims surrounding whitespace.
///
/// Returns an empty string for blank input. Blank lines are separators,
/// never continuation text, so callers skip them.
///
/// ```
/// use chatweave::parsing::sanitize_line;
///
/// assert_eq!(sanitize_line("\u{200e}[14/08/2023, 15:30] Alice: Hi  "), "[14/08/2023, 15:30] Alice: Hi");
/// assert_eq!(sanitize_line(" \t\r"), "");
/// ```
pub fn sanitize_line(raw: &str) -> String {
    if raw.contains([LRM, RLM]) {
        raw.chars()
            .filter(|c| *c != LRM && *c != RLM)
            .collect::<String>()
            .trim()
            .to_string()
    } else {
        raw.trim().to_string()
    }
}
