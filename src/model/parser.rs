// File: src/model/parser.rs
// Field parsers for raw schedule records.
//
// Every parser returns `None` on input it does not understand; callers decide
// whether that drops the record (course key) or just defaults the field.
use crate::config::CourseKeyGrammar;
use crate::model::duration::Day;
use chrono::{NaiveDate, NaiveTime};
use std::fmt;

/// Structured form of a course token like `F001A02Y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseKey {
    /// Format/campus letter (`F`, `D`).
    pub format: char,
    /// Catalog number with the zero padding removed.
    pub number: String,
    pub suffix: Option<char>,
    /// Section digits following the catalog number (`02`, `.01`).
    pub section: Option<String>,
    /// Trailing section qualifier (`Y`, `W`, `H`).
    pub qualifier: Option<char>,
}

impl CourseKey {
    /// Catalog key used to group sections, e.g. `1A`.
    pub fn catalog_key(&self) -> String {
        match self.suffix {
            Some(s) => format!("{}{}", self.number, s),
            None => self.number.clone(),
        }
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.catalog_key())
    }
}

/// Parse a single course token against `grammar`.
///
/// Grammar: `<format letter> <1..=number_digits digits> [letter] ['.'] [digits] [qualifier]`,
/// and nothing after it.
pub fn parse_course_key(token: &str, grammar: &CourseKeyGrammar) -> Option<CourseKey> {
    let mut chars = token.trim().chars().peekable();

    let format = chars.next()?;
    if !grammar.format_letters.contains(format) {
        return None;
    }

    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() || digits.len() == grammar.number_digits {
            break;
        }
        digits.push(c);
        chars.next();
    }
    if digits.is_empty() {
        return None;
    }
    let trimmed = digits.trim_start_matches('0');
    let number = if trimmed.is_empty() { "0" } else { trimmed }.to_string();

    // A qualifier letter directly after the number is a qualifier, not a suffix,
    // only if nothing follows it.
    let mut suffix = None;
    if let Some(&c) = chars.peek()
        && c.is_ascii_alphabetic()
    {
        let mut lookahead = chars.clone();
        lookahead.next();
        let is_trailing_qualifier = lookahead.peek().is_none() && grammar.qualifiers.contains(c);
        if !is_trailing_qualifier {
            suffix = Some(c);
            chars.next();
        }
    }

    if chars.peek() == Some(&'.') {
        chars.next();
    }

    let mut section = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        section.push(c);
        chars.next();
    }

    let mut qualifier = None;
    if let Some(&c) = chars.peek()
        && grammar.qualifiers.contains(c)
    {
        qualifier = Some(c);
        chars.next();
    }

    if chars.next().is_some() {
        return None;
    }

    Some(CourseKey {
        format,
        number,
        suffix,
        section: (!section.is_empty()).then_some(section),
        qualifier,
    })
}

/// Pick the course token out of a raw course name (`"ACTG F001A02Y"`,
/// `"C S F001A02Y"`) and parse it.
pub fn course_key_from_name(raw_name: &str, grammar: &CourseKeyGrammar) -> Option<CourseKey> {
    let parts: Vec<&str> = raw_name.split_whitespace().collect();
    let idx = if parts.len() < 3 { 1 } else { 2 };
    parse_course_key(parts.get(idx)?, grammar)
}

/// Split a compact day token (`"TTh"`, `"MWF"`) into day codes.
///
/// Two-letter codes are matched before one-letter codes, so `"Th"` is
/// Thursday rather than Tuesday followed by garbage. Any character outside the
/// vocabulary rejects the whole token. Repeated days are kept once.
pub fn split_days(token: &str) -> Option<Vec<Day>> {
    let mut days = Vec::new();
    let mut rest = token.trim();
    while !rest.is_empty() {
        rest = rest.trim_start();
        let (day, len) = if rest.starts_with("Th") {
            (Day::Thursday, 2)
        } else if rest.starts_with("Sa") {
            (Day::Saturday, 2)
        } else if rest.starts_with("Su") {
            (Day::Sunday, 2)
        } else {
            match rest.chars().next()? {
                'M' => (Day::Monday, 1),
                'T' => (Day::Tuesday, 1),
                'W' => (Day::Wednesday, 1),
                'F' => (Day::Friday, 1),
                _ => return None,
            }
        };
        if !days.contains(&day) {
            days.push(day);
        }
        rest = &rest[len..];
    }
    Some(days)
}

fn parse_time(s: &str, formats: &[String]) -> Option<NaiveTime> {
    let s = s.trim();
    formats
        .iter()
        .find_map(|f| NaiveTime::parse_from_str(s, f).ok())
        .or_else(|| {
            // chrono wants upper-case meridiems for %p
            let upper = s.to_uppercase();
            formats
                .iter()
                .find_map(|f| NaiveTime::parse_from_str(&upper, f).ok())
        })
}

fn meridiem(s: &str) -> Option<&'static str> {
    let upper = s.trim().to_uppercase();
    if upper.ends_with("AM") {
        Some("AM")
    } else if upper.ends_with("PM") {
        Some("PM")
    } else {
        None
    }
}

/// Parse `"10:00 AM-11:50 AM"` (also `"10:00-11:50 AM"`) into start/end times.
/// Ranges that end at or before they start are rejected.
pub fn parse_time_range(token: &str, formats: &[String]) -> Option<(NaiveTime, NaiveTime)> {
    let (start_raw, end_raw) = token.split_once(['-', '–'])?;
    let end = parse_time(end_raw, formats)?;
    let start = match (meridiem(start_raw), meridiem(end_raw)) {
        // "01:30-03:20 PM": borrow the end's meridiem, unless that puts the
        // start after the end ("11:00-12:50 PM")
        (None, Some(m)) => parse_time(&format!("{} {}", start_raw.trim(), m), formats)
            .filter(|s| *s < end)
            .or_else(|| parse_time(&format!("{} AM", start_raw.trim()), formats)),
        _ => parse_time(start_raw, formats),
    }?;
    (start < end).then_some((start, end))
}

pub fn parse_date(token: &str, formats: &[String]) -> Option<NaiveDate> {
    let token = token.trim();
    formats
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(token, f).ok())
}

/// Seat counts. The feed may report negative values (over-enrolled waitlists),
/// which are preserved.
pub fn parse_count(token: &str) -> Option<i32> {
    token.trim().parse::<i32>().ok()
}

pub fn parse_units(token: &str) -> Option<f32> {
    token.trim().parse::<f32>().ok().filter(|u| u.is_finite())
}

/// Split an instructor cell into names.
///
/// Names are separated by `;`, `/`, `&`, `,` or newlines, and may carry a role
/// annotation in parentheses (`"Drake (P)"`) which is dropped. Placeholder
/// names (`TBA`, `Staff`) are skipped.
pub fn parse_instructors(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for part in raw.split([';', '/', '&', ',', '\n']) {
        let mut name = String::new();
        let mut depth = 0usize;
        for c in part.chars() {
            match c {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                _ if depth == 0 => name.push(c),
                _ => {}
            }
        }
        let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
        if name.is_empty()
            || name.eq_ignore_ascii_case("tba")
            || name.eq_ignore_ascii_case("staff")
        {
            continue;
        }
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
