//! Header timestamp normalization.
//!
//! Headers carry day-first dates (`14/08/2023` or `14/08/23`) and 24h times
//! with optional seconds. Two-digit years are read as `2000 + yy`; there is
//! no other century handling.

use chrono::{DateTime, NaiveDate, Utc};

/// Parses a header date/time such as `14/08/2023, 15:30:00`.
///
/// Returns `None` if a field is missing, non-numeric, or outside the
/// calendar (e.g. `31/02/2023`). The parser substitutes the current time in
/// that case.
///
/// ```
/// use chatweave::parsing::parse_timestamp;
/// use chrono::{TimeZone, Utc};
///
/// assert_eq!(
///     parse_timestamp("14/08/23 15:30"),
///     Some(Utc.with_ymd_and_hms(2023, 8, 14, 15, 30, 0).unwrap())
/// );
/// assert_eq!(parse_timestamp("14/08/2023"), None);
/// ```
pub fn parse_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let mut parts = stamp
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty());
    let date_part = parts.next()?;
    let time_part = parts.next()?;

    let mut date = date_part.split('/').map(parse_field);
    let day = date.next()??;
    let month = date.next()??;
    let year = expand_year(date.next()??);

    let mut time = time_part.split(':').map(parse_field);
    let hour = time.next()??;
    let minute = time.next()??;
    let second = time.next().unwrap_or(Some(0))?;

    let naive = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?
        .and_hms_opt(hour, minute, second)?;

    Some(naive.and_utc())
}

/// Parses a header date/time, falling back to the current time.
///
/// The second value reports whether the fallback was used.
pub fn parse_timestamp_or_now(stamp: &str) -> (DateTime<Utc>, bool) {
    match parse_timestamp(stamp) {
        Some(ts) => (ts, false),
        None => (Utc::now(), true),
    }
}

/// Two-digit years belong to the 2000s.
fn expand_year(year: u32) -> u32 {
    if year < 100 { 2000 + year } else { year }
}

fn parse_field(field: &str) -> Option<u32> {
    field.trim().parse().ok()
}
