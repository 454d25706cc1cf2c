//! Keyword, year and subset filtering over the catalog.
//!
//! Query syntax: whitespace-separated terms, each a case-insensitive substring
//! of the title, plus at most one year filter `y:2024` or `y:2022-2024`
//! anywhere in the text.

use album_catalog_core::{Album, Catalog, IdSubset, SortOrder};
use std::cmp::Reverse;
use std::ops::RangeInclusive;
use tracing::debug;

/// Parsed search text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Lowercased substring terms
    pub terms: Vec<String>,
    pub years: Option<RangeInclusive<i32>>,
}

impl Query {
    pub fn parse(text: &str) -> Self {
        let mut query = Query::default();
        for token in text.split_whitespace() {
            if query.years.is_none() {
                if let Some(years) = parse_year_token(token) {
                    query.years = Some(years);
                    continue;
                }
            }
            query.terms.push(token.to_lowercase());
        }
        query
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.years.is_none()
    }

    pub fn matches(&self, album: &Album) -> bool {
        let title = album.title.to_lowercase();
        if !self.terms.iter().all(|term| title.contains(term.as_str())) {
            return false;
        }
        match &self.years {
            // Overlap of the album's years with the filter. Albums without a
            // complete date never match.
            Some(range) => album
                .dates
                .year_span()
                .is_some_and(|span| span.start() <= range.end() && span.end() >= range.start()),
            None => true,
        }
    }
}

/// `y:YYYY` or `y:YYYY-YYYY`; a reversed range is swapped.
fn parse_year_token(token: &str) -> Option<RangeInclusive<i32>> {
    let prefix = token.get(..2)?;
    if !prefix.eq_ignore_ascii_case("y:") {
        return None;
    }
    let body = &token[2..];
    let (from, to) = match body.split_once('-') {
        Some((from, to)) => (parse_year(from)?, parse_year(to)?),
        None => {
            let year = parse_year(body)?;
            (year, year)
        }
    };
    Some(from.min(to)..=from.max(to))
}

fn parse_year(s: &str) -> Option<i32> {
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

/// Restrictions applied before the query terms
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub subset: Option<IdSubset>,
    /// Exact, case-sensitive tag
    pub tag: Option<String>,
    pub sort: SortOrder,
}

/// A matching album and its place in the result list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    pub album: &'a Album,
    /// 1-based
    pub position: usize,
    pub total: usize,
}

impl SearchHit<'_> {
    pub fn position_label(&self) -> String {
        format!("{}/{}", self.position, self.total)
    }
}

pub fn search<'a>(catalog: &'a Catalog, query: &Query, options: &SearchOptions) -> Vec<SearchHit<'a>> {
    let subset = options.subset.as_ref().map(IdSubset::to_set);

    let mut matches: Vec<&Album> = catalog
        .iter()
        .filter(|album| subset.as_ref().is_none_or(|ids| ids.contains(&album.id)))
        .filter(|album| options.tag.as_deref().is_none_or(|tag| album.has_tag(tag)))
        .filter(|album| query.matches(album))
        .collect();

    if options.sort == SortOrder::Date {
        // Stable: equal dates keep store order.
        matches.sort_by_key(|album| {
            let key = sort_key(album);
            (key.is_none(), Reverse(key))
        });
    }

    let total = matches.len();
    debug!(terms = ?query.terms, years = ?query.years, total, "search");
    matches
        .into_iter()
        .enumerate()
        .map(|(i, album)| SearchHit {
            album,
            position: i + 1,
            total,
        })
        .collect()
}

/// (year, month, day) of a complete start date.
fn sort_key(album: &Album) -> Option<(i32, u32, u32)> {
    let start = album.dates.span()?.start();
    let year = start.year()?;
    Some((year, start.month(), start.day()))
}
