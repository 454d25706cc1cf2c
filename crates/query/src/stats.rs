//! Completeness statistics over the whole catalog.
//!
//! An album is complete when it has a known (positive) item count and at
//! least one date field. Every category keeps the ids of its members in store
//! order so it can be browsed as a search subset.

use album_catalog_core::{Album, Catalog, IdSubset, ReportRow, format_number, plural};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: IdSubset,
    pub complete: IdSubset,
    pub incomplete: IdSubset,
    pub with_tags: IdSubset,
    pub without_tags: IdSubset,
    pub missing_count: IdSubset,
    pub missing_date: IdSubset,
    pub missing_both: IdSubset,
}

fn missing_count(album: &Album) -> bool {
    album.known_item_count().is_none()
}

fn missing_date(album: &Album) -> bool {
    album.dates.is_empty()
}

fn ids_where(catalog: &Catalog, pred: impl Fn(&Album) -> bool) -> IdSubset {
    catalog
        .iter()
        .filter(|album| pred(*album))
        .map(|album| album.id.clone())
        .collect()
}

/// Compute every category in one pass per category.
pub fn compute(catalog: &Catalog) -> Stats {
    Stats {
        total: ids_where(catalog, |_| true),
        complete: ids_where(catalog, |a| !missing_count(a) && !missing_date(a)),
        incomplete: ids_where(catalog, |a| missing_count(a) || missing_date(a)),
        with_tags: ids_where(catalog, |a| !a.tags.is_empty()),
        without_tags: ids_where(catalog, |a| a.tags.is_empty()),
        missing_count: ids_where(catalog, missing_count),
        missing_date: ids_where(catalog, missing_date),
        missing_both: ids_where(catalog, |a| missing_count(a) && missing_date(a)),
    }
}

impl Stats {
    /// Report rows; empty categories are left out, except the total.
    pub fn rows(&self) -> Vec<ReportRow> {
        let categories = [
            ("Incomplete", &self.incomplete),
            ("With tags", &self.with_tags),
            ("Without tags", &self.without_tags),
            ("Missing item count", &self.missing_count),
            ("Missing date", &self.missing_date),
            ("Missing both item count and date", &self.missing_both),
            ("Total", &self.total),
            ("Complete", &self.complete),
        ];

        categories
            .into_iter()
            .filter(|(name, ids)| *name == "Total" || !ids.is_empty())
            .map(|(name, ids)| {
                ReportRow::new(
                    format!("{}: {}", name, plural(ids.len(), "album", "albums")),
                    ids.clone(),
                )
            })
            .collect()
    }

    /// "3 complete, 2 incomplete • 1 tagged, 4 untagged"
    pub fn summary(&self) -> String {
        format!(
            "{} complete, {} incomplete • {} tagged, {} untagged",
            format_number(self.complete.len() as u64),
            format_number(self.incomplete.len() as u64),
            format_number(self.with_tags.len() as u64),
            format_number(self.without_tags.len() as u64),
        )
    }
}
