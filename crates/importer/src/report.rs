use crate::reconcile::{Classification, ImportReport};
use album_catalog_core::{AlbumId, IdSubset, ReportRow, plural};

impl ImportReport {
    /// Added / updated / unchanged summary rows, in that order.
    ///
    /// A single-album import names the album in its row.
    pub fn rows(&self) -> Vec<ReportRow> {
        [
            (Classification::Added, "Added", &self.added),
            (Classification::Updated, "Updated", &self.updated),
            (Classification::Unchanged, "Unchanged", &self.unchanged),
        ]
        .into_iter()
        .map(|(class, label, ids)| {
            let mut text = format!("{}: {}", label, plural(ids.len(), "album", "albums"));
            if let Some(single) = self.single.as_ref().filter(|s| s.classification == class) {
                text.push_str(&format!(" ({})", single.title));
            }
            ReportRow::new(text, ids.iter().cloned().collect::<IdSubset>())
        })
        .collect()
    }

    /// Every id touched by the run, in report order.
    pub fn all_ids(&self) -> Vec<AlbumId> {
        self.added
            .iter()
            .chain(&self.updated)
            .chain(&self.unchanged)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::batch::{Candidate, ImportBatch, parse_batch};
    use crate::reconcile::reconcile;
    use album_catalog_core::Catalog;

    #[test]
    fn test_bulk_rows() {
        let mut catalog = Catalog::default();
        let batch = ImportBatch::Bulk(vec![Candidate::new("A", "u1"), Candidate::new("B", "u2")]);
        let report = reconcile(&mut catalog, &batch).unwrap();
        let rows = report.rows();

        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Added: 2 albums", "Updated: 0 albums", "Unchanged: 0 albums"]);
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].id_subset.ids(), report.added.as_slice());
        assert!(rows[1].id_subset.is_empty());
    }

    #[test]
    fn test_single_row_names_album() {
        let mut catalog = Catalog::default();
        let batch =
            parse_batch(r#"{"mode":"single","candidate":{"title":"Trip","url":"u2"}}"#).unwrap();
        let report = reconcile(&mut catalog, &batch).unwrap();
        assert_eq!(report.rows()[0].label, "Added: 1 album (Trip)");
        assert_eq!(report.rows()[2].label, "Unchanged: 0 albums");
        assert_eq!(report.all_ids(), report.added);
    }
}
