//! Date token template matching.
//!
//! A [`DatePattern`] is a moment-style token template (e.g. `YYYY-MM-DD`)
//! describing how a calendar date is rendered into a note basename. Matching
//! is strict: a basename is parsed against the pattern and accepted only if
//! reformatting the parsed date reproduces the basename byte-for-byte. This
//! rejects lossy matches such as `2024-1-5` under `YYYY-MM-DD` or a basename
//! with trailing characters.
//!
//! Matching never fails loudly — anything that does not round-trip is simply
//! not a dated note.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// Supported template tokens, longest-first so `YYYY` wins over `YY`.
/// `mm`/`ss` are minutes/seconds (moment convention); `MM` is the month.
const TOKENS: &[(&str, &str, TokenKind)] = &[
    ("YYYY", "%Y", TokenKind::Date),
    ("YY", "%y", TokenKind::Date),
    ("MM", "%m", TokenKind::Date),
    ("DD", "%d", TokenKind::Date),
    ("HH", "%H", TokenKind::Time),
    ("mm", "%M", TokenKind::Time),
    ("ss", "%S", TokenKind::Time),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Date,
    Time,
}

/// A comparable calendar position derived from a matched basename.
///
/// Ordering is chronological: earlier dates compare less than later ones.
/// Patterns without time tokens produce keys pinned to midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDateTime);

impl DateKey {
    pub fn timestamp(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.time() == NaiveTime::MIN {
            write!(f, "{}", self.0.format("%Y-%m-%d"))
        } else {
            write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
        }
    }
}

/// A compiled date token template.
///
/// Compilation always succeeds; a template with no recognizable date tokens
/// is still a valid value that matches nothing, which is how a misconfigured
/// pattern degrades to an empty aggregation instead of an error.
#[derive(Debug, Clone)]
pub struct DatePattern {
    raw: String,
    fmt: String,
    has_date: bool,
    has_time: bool,
}

impl DatePattern {
    /// Translate a token template into a chrono format string.
    ///
    /// Unrecognized characters are literals; `%` is escaped so it cannot
    /// inject format specifiers.
    pub fn compile(template: &str) -> Self {
        let mut fmt = String::with_capacity(template.len());
        let mut has_date = false;
        let mut has_time = false;

        let mut rest = template;
        'outer: while !rest.is_empty() {
            for (token, strftime, kind) in TOKENS {
                if let Some(tail) = rest.strip_prefix(token) {
                    fmt.push_str(strftime);
                    match kind {
                        TokenKind::Date => has_date = true,
                        TokenKind::Time => has_time = true,
                    }
                    rest = tail;
                    continue 'outer;
                }
            }
            let ch = match rest.chars().next() {
                Some(c) => c,
                None => break,
            };
            if ch == '%' {
                fmt.push_str("%%");
            } else {
                fmt.push(ch);
            }
            rest = &rest[ch.len_utf8()..];
        }

        Self {
            raw: template.to_string(),
            fmt,
            has_date,
            has_time,
        }
    }

    /// The original template text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether the template contains any year/month/day token. A pattern
    /// without them is malformed and matches no basename.
    pub fn has_date_tokens(&self) -> bool {
        self.has_date
    }

    /// Match a basename against the pattern, round-trip validated.
    ///
    /// Returns a key only when reformatting the parsed date with this same
    /// pattern reproduces `basename` exactly. Deterministic for a fixed
    /// `(basename, pattern)` pair — no locale or clock involvement.
    pub fn match_basename(&self, basename: &str) -> Option<DateKey> {
        if !self.has_date {
            return None;
        }

        let parsed = if self.has_time {
            NaiveDateTime::parse_from_str(basename, &self.fmt).ok()?
        } else {
            NaiveDate::parse_from_str(basename, &self.fmt)
                .ok()?
                .and_time(NaiveTime::MIN)
        };

        let roundtrip = parsed.format(&self.fmt).to_string();
        if roundtrip == basename {
            Some(DateKey(parsed))
        } else {
            None
        }
    }

    /// Render a key back into basename form.
    pub fn format_key(&self, key: DateKey) -> String {
        key.0.format(&self.fmt).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(pattern: &str, basename: &str) -> Option<DateKey> {
        DatePattern::compile(pattern).match_basename(basename)
    }

    #[test]
    fn test_token_translation() {
        let p = DatePattern::compile("YYYY-MM-DD");
        assert_eq!(p.fmt, "%Y-%m-%d");
        assert!(p.has_date_tokens());
        assert!(!p.has_time);

        let p = DatePattern::compile("YYYY-MM-DD HH.mm.ss");
        assert_eq!(p.fmt, "%Y-%m-%d %H.%M.%S");
        assert!(p.has_time);
    }

    #[test]
    fn test_exact_match_accepted() {
        let k = key("YYYY-MM-DD", "2024-01-05").unwrap();
        assert_eq!(k.to_string(), "2024-01-05");
    }

    #[test]
    fn test_lossy_and_junk_names_rejected() {
        // Only the canonical rendering survives the round trip.
        assert!(key("YYYY-MM-DD", "2024-1-5").is_none());
        assert!(key("YYYY-MM-DD", "notes").is_none());
        assert!(key("YYYY-MM-DD", "2024-01-05-extra").is_none());
        assert!(key("YYYY-MM-DD", "").is_none());
    }

    #[test]
    fn test_two_digit_year_pattern_rejects_four_digit_name() {
        assert!(key("YY-MM-DD", "2024-01-05").is_none());
        assert!(key("YY-MM-DD", "24-01-05").is_some());
    }

    #[test]
    fn test_invalid_calendar_date_rejected() {
        assert!(key("YYYY-MM-DD", "2024-13-01").is_none());
        assert!(key("YYYY-MM-DD", "2023-02-29").is_none());
        assert!(key("YYYY-MM-DD", "2024-02-29").is_some()); // leap day
    }

    #[test]
    fn test_time_tokens_participate_in_round_trip() {
        let p = DatePattern::compile("YYYY-MM-DD HH.mm");
        assert!(p.match_basename("2024-01-05 09.30").is_some());
        assert!(p.match_basename("2024-01-05 9.30").is_none());
        assert!(p.match_basename("2024-01-05").is_none());
    }

    #[test]
    fn test_pattern_without_date_tokens_matches_nothing() {
        let p = DatePattern::compile("journal");
        assert!(!p.has_date_tokens());
        assert!(p.match_basename("journal").is_none());
        assert!(p.match_basename("2024-01-05").is_none());

        // Time-only templates are malformed too.
        let p = DatePattern::compile("HH.mm");
        assert!(p.match_basename("09.30").is_none());
    }

    #[test]
    fn test_literal_text_around_tokens() {
        let p = DatePattern::compile("log_YYYY-MM-DD");
        assert!(p.match_basename("log_2024-03-17").is_some());
        assert!(p.match_basename("2024-03-17").is_none());
    }

    #[test]
    fn test_percent_in_template_is_literal() {
        let p = DatePattern::compile("YYYY%MM");
        assert!(p.match_basename("2024%03").is_some());
    }

    #[test]
    fn test_keys_order_chronologically() {
        let p = DatePattern::compile("YYYY-MM-DD");
        let a = p.match_basename("2023-01-10").unwrap();
        let b = p.match_basename("2023-02-20").unwrap();
        let c = p.match_basename("2023-03-01").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_round_trip_law() {
        let p = DatePattern::compile("YYYY-MM-DD");
        for name in ["2024-01-05", "1999-12-31", "2024-02-29"] {
            let k = p.match_basename(name).unwrap();
            assert_eq!(p.format_key(k), name);
        }
    }

    #[test]
    fn test_deterministic() {
        let p = DatePattern::compile("YYYY-MM-DD");
        assert_eq!(
            p.match_basename("2024-06-01"),
            p.match_basename("2024-06-01")
        );
    }
}
