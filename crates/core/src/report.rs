//! Output shapes handed to the presentation layer, and the id-subset that
//! carries a previous result (import batch, tag, stats category) into a
//! follow-up search.

use crate::error::{Error, Result};
use crate::types::AlbumId;
use serde::Serialize;
use std::collections::HashSet;

/// Restriction of a search to a set of album ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IdSubset {
    ids: Vec<AlbumId>,
}

impl IdSubset {
    pub fn new(ids: Vec<AlbumId>) -> Self {
        Self { ids }
    }

    /// Parse a comma-separated id list.
    ///
    /// Blank entries are skipped. An entry with inner whitespace, or input
    /// that yields no ids at all, is rejected.
    pub fn parse(text: &str) -> Result<Self> {
        let mut ids = Vec::new();
        for entry in text.split(',').map(str::trim) {
            if entry.is_empty() {
                continue;
            }
            if entry.chars().any(|c| c.is_whitespace() || c.is_control()) {
                return Err(Error::Parse(format!("Malformed id '{}' in id list", entry)));
            }
            ids.push(AlbumId::from(entry));
        }
        if ids.is_empty() {
            return Err(Error::Parse(format!("Id list '{}' contains no ids", text)));
        }
        Ok(Self { ids })
    }

    pub fn ids(&self) -> &[AlbumId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Lookup set for filtering.
    pub fn to_set(&self) -> HashSet<&AlbumId> {
        self.ids.iter().collect()
    }

    /// Comma-joined form accepted by [`IdSubset::parse`].
    pub fn to_arg(&self) -> String {
        self.ids
            .iter()
            .map(AlbumId::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<AlbumId> for IdSubset {
    fn from_iter<I: IntoIterator<Item = AlbumId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// One row of a summary report (import result, stats, tag list)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub label: String,
    pub count: usize,
    pub id_subset: IdSubset,
}

impl ReportRow {
    pub fn new(label: impl Into<String>, id_subset: IdSubset) -> Self {
        Self {
            label: label.into(),
            count: id_subset.len(),
            id_subset,
        }
    }
}

/// One album in a search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    pub title: String,
    pub subtitle: String,
    pub url: String,
    pub id: AlbumId,
    pub position_label: String,
}
