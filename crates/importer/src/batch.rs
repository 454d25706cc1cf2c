use album_catalog_core::{Error, Result};
use serde::Deserialize;

/// Album data scraped from one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    /// Scrapers report 0 when they could not read the count.
    #[serde(default)]
    pub item_count: Option<i64>,
    #[serde(default)]
    pub date_range: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl Candidate {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_item_count(mut self, count: i64) -> Self {
        self.item_count = Some(count);
        self
    }
}

/// Scraper output to reconcile against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportBatch {
    /// An album list page
    Bulk(Vec<Candidate>),
    /// A single album page, which may carry dates
    Single(Candidate),
}

impl ImportBatch {
    pub fn candidates(&self) -> &[Candidate] {
        match self {
            ImportBatch::Bulk(candidates) => candidates,
            ImportBatch::Single(candidate) => std::slice::from_ref(candidate),
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self, ImportBatch::Single(_))
    }
}

/// Raw batch descriptor as emitted by the scraper
#[derive(Debug, Deserialize)]
struct RawBatch {
    #[serde(default, alias = "type")]
    mode: Option<String>,
    #[serde(default, alias = "albums")]
    candidates: Option<Vec<Candidate>>,
    #[serde(default)]
    candidate: Option<Candidate>,
    #[serde(default)]
    error: Option<String>,
}

/// Parse a batch descriptor.
///
/// `{"error": "..."}` becomes [`Error::Scrape`] carrying the message verbatim.
pub fn parse_batch(json: &str) -> Result<ImportBatch> {
    let raw: RawBatch = serde_json::from_str(json)
        .map_err(|e| Error::Parse(format!("Invalid batch descriptor: {}", e)))?;

    if let Some(message) = raw.error.filter(|m| !m.is_empty()) {
        return Err(Error::Scrape(message));
    }

    match raw.mode.as_deref() {
        Some("bulk") => raw
            .candidates
            .map(ImportBatch::Bulk)
            .ok_or_else(|| Error::Parse("Bulk batch without 'candidates'".to_string())),
        Some("single") => raw
            .candidate
            .map(ImportBatch::Single)
            .ok_or_else(|| Error::Parse("Single batch without 'candidate'".to_string())),
        Some(other) => Err(Error::Parse(format!("Unknown batch mode '{}'", other))),
        None => Err(Error::Parse(
            "Batch descriptor has neither 'mode' nor 'error'".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bulk() {
        let batch = parse_batch(
            r#"{"mode":"bulk","candidates":[{"title":"Paris","url":"u1","itemCount":5},{"title":"Rome","url":"u2","itemCount":0}]}"#,
        )
        .unwrap();
        assert!(!batch.is_single());
        assert_eq!(batch.candidates().len(), 2);
        assert_eq!(batch.candidates()[0], Candidate::new("Paris", "u1").with_item_count(5));
    }

    #[test]
    fn test_parse_single_with_dates() {
        let batch = parse_batch(
            r#"{"mode":"single","candidate":{"title":"Trip","url":"u2","dateRange":"Oct 30 – Nov 2"}}"#,
        )
        .unwrap();
        let ImportBatch::Single(candidate) = batch else {
            panic!("expected single batch");
        };
        assert_eq!(candidate.date_range.as_deref(), Some("Oct 30 – Nov 2"));
        assert_eq!(candidate.item_count, None);
    }

    #[test]
    fn test_parse_legacy_field_names() {
        let batch = parse_batch(r#"{"type":"bulk","albums":[{"title":"A","url":"u"}]}"#).unwrap();
        assert_eq!(batch.candidates().len(), 1);
    }

    #[test]
    fn test_error_descriptor_is_scrape_failure() {
        let err = parse_batch(r#"{"error":"Not a photos page"}"#).unwrap_err();
        assert!(matches!(err, Error::Scrape(ref m) if m == "Not a photos page"));
    }

    #[test]
    fn test_empty_error_is_malformed() {
        assert!(matches!(parse_batch(r#"{"error":""}"#), Err(Error::Parse(_))));
    }

    #[test]
    fn test_malformed_descriptors() {
        assert!(matches!(parse_batch("not json"), Err(Error::Parse(_))));
        assert!(matches!(parse_batch(r#"{"mode":"bulk"}"#), Err(Error::Parse(_))));
        assert!(matches!(parse_batch(r#"{"mode":"single"}"#), Err(Error::Parse(_))));
        assert!(matches!(parse_batch(r#"{"mode":"other"}"#), Err(Error::Parse(_))));
    }
}
