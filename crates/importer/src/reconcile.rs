//! Non-destructive merge of scraped candidates into the catalog.
//!
//! Title and tags belong to the user and are never touched. Item count and
//! dates are only filled in where the catalog has nothing; a value already
//! stored is never replaced by an import.

use crate::batch::{Candidate, ImportBatch};
use album_catalog_core::dates;
use album_catalog_core::{Album, AlbumDates, AlbumId, Catalog, Error, Result, Store};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Added,
    Updated,
    Unchanged,
}

/// The album touched by a single-album import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SingleResult {
    pub id: AlbumId,
    pub title: String,
    pub url: String,
    pub classification: Classification,
}

/// Outcome of one import run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub added: Vec<AlbumId>,
    pub updated: Vec<AlbumId>,
    pub unchanged: Vec<AlbumId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single: Option<SingleResult>,
}

impl ImportReport {
    pub fn total(&self) -> usize {
        self.added.len() + self.updated.len() + self.unchanged.len()
    }

    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.updated.is_empty()
    }

    fn record(&mut self, id: AlbumId, classification: Classification) {
        match classification {
            Classification::Added => self.added.push(id),
            Classification::Updated => self.updated.push(id),
            Classification::Unchanged => self.unchanged.push(id),
        }
    }
}

/// Candidate after validation and date normalization
#[derive(Debug, Clone, PartialEq, Eq)]
struct Prepared {
    title: String,
    url: String,
    item_count: Option<u64>,
    dates: AlbumDates,
}

/// Reconcile a batch into the catalog in memory.
///
/// Every candidate is validated before the catalog is touched, so an error
/// leaves `catalog` exactly as it was.
pub fn reconcile(catalog: &mut Catalog, batch: &ImportBatch) -> Result<ImportReport> {
    let prepared = prepare_batch(batch)?;

    let mut index: HashMap<String, usize> = catalog
        .iter()
        .enumerate()
        .filter(|(_, album)| !album.url.is_empty())
        .map(|(i, album)| (album.url.clone(), i))
        .collect();

    let mut report = ImportReport::default();
    for candidate in prepared {
        let (id, classification) = apply(catalog, &mut index, candidate);
        if batch.is_single() {
            if let Some(album) = catalog.get(&id) {
                report.single = Some(SingleResult {
                    id: id.clone(),
                    title: album.title.clone(),
                    url: album.url.clone(),
                    classification,
                });
            }
        }
        report.record(id, classification);
    }

    info!(
        added = report.added.len(),
        updated = report.updated.len(),
        unchanged = report.unchanged.len(),
        "reconciled batch"
    );
    Ok(report)
}

/// Load the store, reconcile, and rewrite the store once if needed.
pub fn run_import(store: &Store, batch: &ImportBatch) -> Result<ImportReport> {
    let mut catalog = store.load()?;
    let report = reconcile(&mut catalog, batch)?;
    if report.has_changes() || catalog.is_dirty() {
        store.save(&catalog)?;
    } else {
        debug!("nothing changed, store not rewritten");
    }
    Ok(report)
}

fn prepare_batch(batch: &ImportBatch) -> Result<Vec<Prepared>> {
    match batch {
        ImportBatch::Single(candidate) => {
            let prepared = prepare(candidate)?
                .ok_or_else(|| Error::Parse("Candidate has no url".to_string()))?;
            Ok(vec![prepared])
        }
        ImportBatch::Bulk(candidates) => {
            let mut seen: HashSet<String> = HashSet::new();
            let mut out = Vec::with_capacity(candidates.len());
            for candidate in candidates {
                let Some(prepared) = prepare(candidate)? else {
                    warn!(title = %candidate.title, "skipping candidate without url");
                    continue;
                };
                // First occurrence of a url wins.
                if !seen.insert(prepared.url.clone()) {
                    debug!(url = %prepared.url, "skipping duplicate url in batch");
                    continue;
                }
                out.push(prepared);
            }
            Ok(out)
        }
    }
}

/// `None` for a candidate without a url.
fn prepare(candidate: &Candidate) -> Result<Option<Prepared>> {
    let url = candidate.url.trim();
    if url.is_empty() {
        return Ok(None);
    }

    let dates = AlbumDates {
        date_range: normalize_field("dateRange", &candidate.date_range)?,
        start_date: normalize_field("startDate", &candidate.start_date)?,
        end_date: normalize_field("endDate", &candidate.end_date)?,
    }
    .completed();

    Ok(Some(Prepared {
        title: candidate.title.clone(),
        url: url.to_string(),
        item_count: candidate
            .item_count
            .filter(|&n| n > 0)
            .and_then(|n| u64::try_from(n).ok()),
        dates,
    }))
}

fn normalize_field(field: &str, value: &Option<String>) -> Result<Option<String>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => dates::normalize_to_canonical(raw)
            .map(Some)
            .map_err(|e| Error::Parse(format!("Invalid {} '{}': {}", field, raw, e))),
    }
}

/// Merge one candidate. `index` maps urls to catalog positions and is kept
/// current as albums are appended.
fn apply(
    catalog: &mut Catalog,
    index: &mut HashMap<String, usize>,
    candidate: Prepared,
) -> (AlbumId, Classification) {
    let position = index.get(&candidate.url).copied();
    let Some(album) = position.and_then(|i| catalog.album_at_mut(i)) else {
        let mut album = Album::new(candidate.url.clone(), candidate.title);
        album.item_count = candidate.item_count;
        album.dates = candidate.dates;
        let id = album.id.clone();
        debug!(id = %id, url = %candidate.url, "added album");
        index.insert(candidate.url, catalog.len());
        catalog.push(album);
        return (id, Classification::Added);
    };

    let mut changed = false;
    if let Some(count) = candidate.item_count {
        if album.known_item_count().is_none() {
            album.item_count = Some(count);
            changed = true;
        }
    }
    changed |= fill_missing(&mut album.dates.date_range, candidate.dates.date_range);
    changed |= fill_missing(&mut album.dates.start_date, candidate.dates.start_date);
    changed |= fill_missing(&mut album.dates.end_date, candidate.dates.end_date);

    let classification = if changed {
        debug!(id = %album.id, url = %album.url, "updated album");
        Classification::Updated
    } else {
        Classification::Unchanged
    };
    (album.id.clone(), classification)
}

fn fill_missing(slot: &mut Option<String>, value: Option<String>) -> bool {
    if slot.is_none() && value.is_some() {
        *slot = value;
        true
    } else {
        false
    }
}
