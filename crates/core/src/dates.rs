//! Date normalization for album dates.
//!
//! Scraped pages show dates loosely ("Oct 30 – Nov 2", "Nov 27, 2014").
//! Storage uses a sortable canonical form:
//!
//! ```text
//! 2024-10-30              single date
//! 2024-10-30--2024-11-02  range
//! 10-30                   month and day, year unknown
//! 10-30--11-02            range, year unknown
//! ```
//!
//! A year that cannot be read from the text is left out, never guessed.

use crate::error::{Error, Result};
use chrono::{Month, NaiveDate};
use std::fmt;

/// Separator between the two sides of a canonical range.
pub const RANGE_SEPARATOR: &str = "--";

/// Dash-like characters accepted between the sides of a display range.
const DASHES: &[char] = &['-', '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}'];

/// Any year works for validating a month/day pair as long as it is a leap year.
const LEAP_YEAR: i32 = 2000;

/// A calendar day whose year may be unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: Option<i32>,
    month: u32,
    day: u32,
}

impl CalendarDate {
    pub fn new(year: Option<i32>, month: u32, day: u32) -> Result<Self> {
        let check_year = year.unwrap_or(LEAP_YEAR);
        if NaiveDate::from_ymd_opt(check_year, month, day).is_none() {
            return Err(Error::Parse(match year {
                Some(y) => format!("No such date: {:04}-{:02}-{:02}", y, month, day),
                None => format!("No such date: {:02}-{:02}", month, day),
            }));
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn is_complete(&self) -> bool {
        self.year.is_some()
    }

    /// Storage form: `yyyy-mm-dd`, or `mm-dd` when the year is unknown.
    pub fn canonical(&self) -> String {
        match self.year {
            Some(y) => format!("{:04}-{:02}-{:02}", y, self.month, self.day),
            None => format!("{:02}-{:02}", self.month, self.day),
        }
    }

    /// Display form: `Mon D` or `Mon D, YYYY`.
    pub fn display(&self, with_year: bool) -> String {
        let month = month_abbrev(self.month);
        match (self.year, with_year) {
            (Some(y), true) => format!("{} {}, {}", month, self.day, y),
            _ => format!("{} {}", month, self.day),
        }
    }

    fn month_day(&self) -> (u32, u32) {
        (self.month, self.day)
    }

    fn with_year(self, year: i32) -> Result<Self> {
        Self::new(Some(year), self.month, self.day)
    }
}

/// A single date or an inclusive range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSpan {
    Single(CalendarDate),
    Range(CalendarDate, CalendarDate),
}

impl DateSpan {
    pub fn start(&self) -> CalendarDate {
        match self {
            DateSpan::Single(d) | DateSpan::Range(d, _) => *d,
        }
    }

    pub fn end(&self) -> Option<CalendarDate> {
        match self {
            DateSpan::Single(_) => None,
            DateSpan::Range(_, end) => Some(*end),
        }
    }

    pub fn canonical(&self) -> String {
        match self {
            DateSpan::Single(d) => d.canonical(),
            DateSpan::Range(start, end) => {
                format!("{}{}{}", start.canonical(), RANGE_SEPARATOR, end.canonical())
            }
        }
    }

    /// Human-readable form.
    ///
    /// Same-year ranges drop the year on both sides ("Oct 30 – Nov 2"),
    /// cross-year ranges keep it on both ("Dec 28, 2023 – Jan 3, 2024").
    pub fn display(&self) -> String {
        match self {
            DateSpan::Single(d) => d.display(true),
            DateSpan::Range(start, end) => {
                let same_year = start.year == end.year;
                format!("{} – {}", start.display(!same_year), end.display(!same_year))
            }
        }
    }

    /// Years of every complete date in the span.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = [Some(self.start()), self.end()]
            .into_iter()
            .flatten()
            .filter_map(|d| d.year)
            .collect();
        years.dedup();
        years
    }
}

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Normalize loosely formatted date text into a [`DateSpan`].
///
/// Accepts the canonical forms plus display text such as
/// `"Oct 30"`, `"Nov 27, 2014"`, `"Oct 30 – Nov 2"`, `"Dec 28, 2023 – Jan 3, 2024"`
/// and `"Oct 30 – 31, 2024"`.
pub fn normalize(text: &str) -> Result<DateSpan> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::Parse("Empty date".to_string()));
    }

    if let Some((left, right)) = text.split_once(RANGE_SEPARATOR) {
        let start = parse_side(left.trim(), None)?;
        let end = parse_side(right.trim(), Some(start.month))?;
        return build_range(start, end);
    }

    if let Some(date) = parse_canonical_side(text) {
        return Ok(DateSpan::Single(date?));
    }

    let parts: Vec<&str> = text.split(DASHES).map(str::trim).collect();
    match parts.as_slice() {
        [single] => Ok(DateSpan::Single(parse_side(single, None)?)),
        [left, right] if !left.is_empty() && !right.is_empty() => {
            let start = parse_side(left, None)?;
            let end = parse_side(right, Some(start.month))?;
            build_range(start, end)
        }
        _ => Err(Error::Parse(format!("Unrecognized date '{}'", text))),
    }
}

/// Normalize to the canonical storage string.
pub fn normalize_to_canonical(text: &str) -> Result<String> {
    normalize(text).map(|span| span.canonical())
}

/// Render a stored date value for display.
///
/// Values that do not parse (hand-edited files) are shown as stored.
pub fn display_stored(value: &str) -> String {
    match normalize(value) {
        Ok(span) => span.display(),
        Err(_) => value.to_string(),
    }
}

/// Strict parser for manually entered dates.
///
/// Only `yyyy-mm-dd` and `yyyy-mm-dd--yyyy-mm-dd` are accepted, and a range
/// must not end before it starts.
pub fn parse_manual(text: &str) -> Result<DateSpan> {
    let text = text.trim();
    let invalid = || {
        Error::Parse(format!(
            "Invalid date '{}', expected yyyy-mm-dd or yyyy-mm-dd--yyyy-mm-dd",
            text
        ))
    };

    match text.split_once(RANGE_SEPARATOR) {
        Some((left, right)) => {
            let start = parse_iso_date(left).ok_or_else(invalid)??;
            let end = parse_iso_date(right).ok_or_else(invalid)??;
            if start > end {
                return Err(Error::Parse(format!(
                    "Date range '{}' ends before it starts",
                    text
                )));
            }
            Ok(DateSpan::Range(start, end))
        }
        None => Ok(DateSpan::Single(parse_iso_date(text).ok_or_else(invalid)??)),
    }
}

fn build_range(start: CalendarDate, end: CalendarDate) -> Result<DateSpan> {
    let (start, end) = match (start.year, end.year) {
        (None, Some(end_year)) => {
            let year = if start.month_day() > end.month_day() {
                end_year - 1
            } else {
                end_year
            };
            (start.with_year(year)?, end)
        }
        (Some(start_year), None) => {
            let year = if end.month_day() < start.month_day() {
                start_year + 1
            } else {
                start_year
            };
            (start, end.with_year(year)?)
        }
        _ => (start, end),
    };
    Ok(DateSpan::Range(start, end))
}

/// One side of a range: canonical form, `Mon D[, YYYY]`, or `D[, YYYY]` when
/// the month is carried over from the other side.
fn parse_side(text: &str, carried_month: Option<u32>) -> Result<CalendarDate> {
    if let Some(date) = parse_canonical_side(text) {
        return date;
    }

    let cleaned = text.replace(',', " ");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    let unrecognized = || Error::Parse(format!("Unrecognized date '{}'", text));

    let (month, rest) = match tokens.split_first() {
        Some((first, rest)) => match parse_month(first) {
            Some(month) => (month, rest),
            None => (carried_month.ok_or_else(unrecognized)?, tokens.as_slice()),
        },
        None => return Err(unrecognized()),
    };

    match rest {
        [day] => CalendarDate::new(None, month, parse_day(day).ok_or_else(unrecognized)?),
        [day, year] => CalendarDate::new(
            Some(parse_year(year).ok_or_else(unrecognized)?),
            month,
            parse_day(day).ok_or_else(unrecognized)?,
        ),
        _ => Err(unrecognized()),
    }
}

/// `Some` when the text has the shape of a canonical date, with the result of
/// validating it.
fn parse_canonical_side(text: &str) -> Option<Result<CalendarDate>> {
    if let Some(date) = parse_iso_date(text) {
        return Some(date);
    }
    let bytes = text.as_bytes();
    if bytes.len() == 5 && bytes[2] == b'-' && all_digits(&text[..2]) && all_digits(&text[3..]) {
        let month = text[..2].parse().ok()?;
        let day = text[3..].parse().ok()?;
        return Some(CalendarDate::new(None, month, day));
    }
    None
}

/// `Some` when the text is shaped exactly `yyyy-mm-dd`.
fn parse_iso_date(text: &str) -> Option<Result<CalendarDate>> {
    let bytes = text.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    if !all_digits(&text[..4]) || !all_digits(&text[5..7]) || !all_digits(&text[8..]) {
        return None;
    }
    let year = text[..4].parse().ok()?;
    let month = text[5..7].parse().ok()?;
    let day = text[8..].parse().ok()?;
    Some(CalendarDate::new(Some(year), month, day))
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_month(token: &str) -> Option<u32> {
    let token = token.trim_end_matches('.');
    let token = if token.eq_ignore_ascii_case("sept") {
        "sep"
    } else {
        token
    };
    token.parse::<Month>().ok().map(|m| m.number_from_month())
}

fn parse_day(token: &str) -> Option<u32> {
    if token.len() > 2 || !all_digits(token) {
        return None;
    }
    token.parse().ok()
}

fn parse_year(token: &str) -> Option<i32> {
    if token.len() != 4 || !all_digits(token) {
        return None;
    }
    token.parse().ok()
}

fn month_abbrev(month: u32) -> &'static str {
    const ABBREVS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    ABBREVS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("???")
}
