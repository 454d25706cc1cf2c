use crate::dates::{self, DateSpan};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::ops::RangeInclusive;
use uuid::Uuid;

/// Opaque album identifier, assigned once and never regenerated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumId(String);

impl AlbumId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AlbumId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AlbumId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One tracked photo album
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: AlbumId,
    pub url: String,
    pub title: String,
    pub tags: Vec<String>,
    /// Zero and absent both mean "unknown".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u64>,
    #[serde(flatten)]
    pub dates: AlbumDates,
    /// Fields written by other tools, kept as found.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Album {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: AlbumId::generate(),
            url: url.into(),
            title: title.into(),
            tags: Vec::new(),
            item_count: None,
            dates: AlbumDates::default(),
            extra: Map::new(),
        }
    }

    /// Item count when it carries information.
    pub fn known_item_count(&self) -> Option<u64> {
        self.item_count.filter(|&n| n > 0)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Title with a trailing site suffix (e.g. " - Google Photos") removed.
    pub fn clean_title<'a>(&'a self, suffix: &str) -> &'a str {
        let title = if suffix.is_empty() {
            self.title.as_str()
        } else {
            self.title.strip_suffix(suffix).unwrap_or(&self.title)
        };
        if title.trim().is_empty() { "Untitled" } else { title }
    }
}

/// Canonical date strings of an album, each independently optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl AlbumDates {
    pub fn is_empty(&self) -> bool {
        self.date_range.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }

    /// Fill in derivable fields: start/end from the range, the range from
    /// start/end. Fields already present are left alone.
    pub fn completed(mut self) -> Self {
        if let Some(span) = self.date_range.as_deref().and_then(|r| dates::normalize(r).ok()) {
            if self.start_date.is_none() {
                self.start_date = Some(span.start().canonical());
            }
            if self.end_date.is_none() {
                self.end_date = span.end().map(|d| d.canonical());
            }
        }
        if self.date_range.is_none() {
            self.date_range = match (&self.start_date, &self.end_date) {
                (Some(start), Some(end)) => {
                    Some(format!("{}{}{}", start, dates::RANGE_SEPARATOR, end))
                }
                (Some(start), None) => Some(start.clone()),
                _ => None,
            };
        }
        self
    }

    /// Replace all three fields from one span, clearing `end_date` for a
    /// single date.
    pub fn set_span(&mut self, span: &DateSpan) {
        self.date_range = Some(span.canonical());
        self.start_date = Some(span.start().canonical());
        self.end_date = span.end().map(|d| d.canonical());
    }

    /// The best span describing these dates.
    pub fn span(&self) -> Option<DateSpan> {
        if let Some(span) = self.date_range.as_deref().and_then(|r| dates::normalize(r).ok()) {
            return Some(span);
        }
        let start = self.start_date.as_deref().and_then(|s| dates::normalize(s).ok())?;
        match self.end_date.as_deref().and_then(|e| dates::normalize(e).ok()) {
            Some(end) => Some(DateSpan::Range(start.start(), end.start())),
            None => Some(start),
        }
    }

    /// Years of every complete date across all three fields.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = [&self.date_range, &self.start_date, &self.end_date]
            .into_iter()
            .flatten()
            .filter_map(|value| dates::normalize(value).ok())
            .flat_map(|span| span.years())
            .collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Earliest to latest complete year across all three fields.
    pub fn year_span(&self) -> Option<RangeInclusive<i32>> {
        let years = self.years();
        Some(*years.first()?..=*years.last()?)
    }

    /// Display text for the dates, if any.
    pub fn display(&self) -> Option<String> {
        match self.span() {
            Some(span) => Some(span.display()),
            None => self
                .date_range
                .clone()
                .or_else(|| self.start_date.clone()),
        }
    }
}

/// Thousands-separated number: 1234567 -> "1,234,567".
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// "1 album", "1,204 albums"
pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    let noun = if count == 1 { singular } else { plural };
    format!("{} {}", format_number(count as u64), noun)
}
