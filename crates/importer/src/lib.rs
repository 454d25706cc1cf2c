//! Reconciles scraped album candidates into the catalog.

pub mod batch;
pub mod reconcile;
pub mod report;

pub use batch::{Candidate, ImportBatch, parse_batch};
pub use reconcile::{Classification, ImportReport, SingleResult, reconcile, run_import};

use album_catalog_core::{Result, Store};

/// Parse a batch descriptor and run the import against the store.
///
/// A scraper error descriptor fails before the store is read.
pub fn import_json(store: &Store, json: &str) -> Result<ImportReport> {
    let batch = parse_batch(json)?;
    run_import(store, &batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use album_catalog_core::Error;
    use tempfile::TempDir;

    #[test]
    fn test_scrape_error_leaves_store_untouched() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("albums.json"));
        std::fs::write(store.path(), "{\"url\":\"u1\",\"title\":\"Legacy\"}\n").unwrap();

        let err = import_json(&store, r#"{"error":"No albums found on page"}"#).unwrap_err();
        assert!(matches!(err, Error::Scrape(ref m) if m == "No albums found on page"));
        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            "{\"url\":\"u1\",\"title\":\"Legacy\"}\n"
        );
    }

    #[test]
    fn test_import_json_end_to_end() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("albums.json"));
        let report = import_json(
            &store,
            r#"{"mode":"bulk","candidates":[{"title":"Paris","url":"u1","itemCount":5}]}"#,
        )
        .unwrap();
        assert_eq!(report.added.len(), 1);
        assert_eq!(store.load().unwrap().find_by_url("u1").unwrap().title, "Paris");
    }
}
