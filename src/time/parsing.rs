//! Parsing of the textual timestamps found in embedded metadata.

use chrono::NaiveDateTime;

/// Formats tried in order. The colon-separated date is what EXIF writes; the
/// dash-separated one shows up in files re-saved by some editors.
const CAPTURE_TIME_FORMATS: [&str; 2] = ["%Y:%m:%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an EXIF timestamp (`YYYY:MM:DD HH:MM:SS`, optional fractional seconds).
///
/// Placeholder values such as `0000:00:00 00:00:00` and anything else that does not
/// form a real calendar date return `None`.
pub fn parse_capture_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    CAPTURE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}
