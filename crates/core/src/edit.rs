//! Explicit user edits of a single album.
//!
//! Unlike imports, these may overwrite anything. Each edit is validated before
//! the album is looked up, and a missing album is `Ok(None)`, not an error.

use crate::dates;
use crate::error::{Error, Result};
use crate::store::{Catalog, Store};
use crate::types::{AlbumId, format_number};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    SetTitle(String),
    AddTag(String),
    RemoveTag(String),
    SetItemCount(u64),
    /// Raw text, `yyyy-mm-dd` or `yyyy-mm-dd--yyyy-mm-dd`
    SetDate(String),
    Delete,
}

/// What an edit did to the album
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditOutcome {
    pub id: AlbumId,
    /// Album title (before the edit)
    pub title: String,
    pub changed: bool,
    pub message: String,
}

/// Apply an edit in memory.
pub fn apply_edit(catalog: &mut Catalog, id: &AlbumId, edit: &Edit) -> Result<Option<EditOutcome>> {
    validate(edit)?;

    let Some(album) = catalog.get_mut(id) else {
        debug!(id = %id, "edit target not found");
        return Ok(None);
    };
    let title = album.title.clone();

    let (changed, message) = match edit {
        Edit::SetTitle(text) => {
            let text = text.trim();
            let changed = album.title != text;
            album.title = text.to_string();
            (changed, format!("Title updated to: {}", text))
        }
        Edit::AddTag(tag) => {
            let tag = tag.trim();
            if album.has_tag(tag) {
                (false, format!("'{}' already on {}", tag, title))
            } else {
                album.tags.push(tag.to_string());
                (true, format!("Added '{}' to {}", tag, title))
            }
        }
        Edit::RemoveTag(tag) => {
            let tag = tag.trim();
            if album.has_tag(tag) {
                album.tags.retain(|t| t != tag);
                (true, format!("Removed '{}' from {}", tag, title))
            } else {
                (false, format!("'{}' not on {}", tag, title))
            }
        }
        Edit::SetItemCount(count) => {
            let old = match album.item_count {
                Some(n) => format_number(n),
                None => "not set".to_string(),
            };
            let changed = album.item_count != Some(*count);
            album.item_count = Some(*count);
            (changed, format!("{}: {} → {}", title, old, format_number(*count)))
        }
        Edit::SetDate(raw) => {
            let span = dates::parse_manual(raw)?;
            let before = album.dates.clone();
            album.dates.set_span(&span);
            let label = if span.end().is_some() {
                "Date range updated to"
            } else {
                "Date updated to"
            };
            (album.dates != before, format!("{}: {}", label, span.display()))
        }
        Edit::Delete => {
            catalog.remove(id);
            (true, format!("Deleted '{}'", title))
        }
    };

    Ok(Some(EditOutcome {
        id: id.clone(),
        title,
        changed,
        message,
    }))
}

/// Load, apply one edit, and rewrite the store once if anything changed.
pub fn run_edit(store: &Store, id: &AlbumId, edit: &Edit) -> Result<Option<EditOutcome>> {
    validate(edit)?;
    let mut catalog = store.load()?;
    let outcome = apply_edit(&mut catalog, id, edit)?;

    let changed = outcome.as_ref().is_some_and(|o| o.changed);
    if changed || catalog.is_dirty() {
        store.save(&catalog)?;
    }
    if let Some(outcome) = &outcome {
        info!(id = %id, changed = outcome.changed, "{}", outcome.message);
    }
    Ok(outcome)
}

fn validate(edit: &Edit) -> Result<()> {
    match edit {
        Edit::SetTitle(text) if text.trim().is_empty() => {
            Err(Error::Parse("Title must not be empty".to_string()))
        }
        Edit::AddTag(tag) | Edit::RemoveTag(tag) if tag.trim().is_empty() => {
            Err(Error::Parse("Tag must not be empty".to_string()))
        }
        Edit::SetDate(raw) => dates::parse_manual(raw).map(|_| ()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::parse_catalog_str;
    use tempfile::TempDir;

    fn catalog() -> Catalog {
        parse_catalog_str(
            r#"{"id":"a1","url":"u1","title":"Paris","tags":["travel"],"itemCount":12,"dateRange":"10-30--11-02","startDate":"10-30","endDate":"11-02"}
{"id":"a2","url":"u2","title":"Rome","tags":[]}
"#,
        )
        .unwrap()
    }

    fn id(s: &str) -> AlbumId {
        AlbumId::from(s)
    }

    #[test]
    fn test_set_title() {
        let mut catalog = catalog();
        let outcome = apply_edit(&mut catalog, &id("a2"), &Edit::SetTitle(" Roma ".into()))
            .unwrap()
            .unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.title, "Rome");
        assert_eq!(catalog.get(&id("a2")).unwrap().title, "Roma");
    }

    #[test]
    fn test_blank_title_is_parse_error() {
        let mut catalog = catalog();
        let result = apply_edit(&mut catalog, &id("a2"), &Edit::SetTitle("  ".into()));
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_add_and_remove_tag() {
        let mut catalog = catalog();
        let added = apply_edit(&mut catalog, &id("a1"), &Edit::AddTag("family".into()))
            .unwrap()
            .unwrap();
        assert!(added.changed);
        assert_eq!(catalog.get(&id("a1")).unwrap().tags, vec!["travel", "family"]);

        let again = apply_edit(&mut catalog, &id("a1"), &Edit::AddTag("family".into()))
            .unwrap()
            .unwrap();
        assert!(!again.changed);
        assert!(again.message.contains("already on"));

        let removed = apply_edit(&mut catalog, &id("a1"), &Edit::RemoveTag("travel".into()))
            .unwrap()
            .unwrap();
        assert!(removed.changed);
        assert_eq!(catalog.get(&id("a1")).unwrap().tags, vec!["family"]);

        let absent = apply_edit(&mut catalog, &id("a1"), &Edit::RemoveTag("travel".into()))
            .unwrap()
            .unwrap();
        assert!(!absent.changed);
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        let mut catalog = catalog();
        let outcome = apply_edit(&mut catalog, &id("a1"), &Edit::AddTag("Travel".into()))
            .unwrap()
            .unwrap();
        assert!(outcome.changed);
        assert_eq!(catalog.get(&id("a1")).unwrap().tags.len(), 2);
    }

    #[test]
    fn test_set_item_count_reports_old_and_new() {
        let mut catalog = catalog();
        let outcome = apply_edit(&mut catalog, &id("a1"), &Edit::SetItemCount(1500))
            .unwrap()
            .unwrap();
        assert_eq!(outcome.message, "Paris: 12 → 1,500");
        let outcome = apply_edit(&mut catalog, &id("a2"), &Edit::SetItemCount(0))
            .unwrap()
            .unwrap();
        assert_eq!(outcome.message, "Rome: not set → 0");
        assert_eq!(catalog.get(&id("a2")).unwrap().item_count, Some(0));
    }

    #[test]
    fn test_set_date_overwrites_existing_dates() {
        let mut catalog = catalog();
        let outcome = apply_edit(
            &mut catalog,
            &id("a1"),
            &Edit::SetDate("2020-11-10--2025-11-10".into()),
        )
        .unwrap()
        .unwrap();
        assert!(outcome.changed);
        assert_eq!(
            outcome.message,
            "Date range updated to: Nov 10, 2020 – Nov 10, 2025"
        );
        let dates = &catalog.get(&id("a1")).unwrap().dates;
        assert_eq!(dates.date_range.as_deref(), Some("2020-11-10--2025-11-10"));
        assert_eq!(dates.start_date.as_deref(), Some("2020-11-10"));
        assert_eq!(dates.end_date.as_deref(), Some("2025-11-10"));

        apply_edit(&mut catalog, &id("a1"), &Edit::SetDate("2021-01-05".into())).unwrap();
        let dates = &catalog.get(&id("a1")).unwrap().dates;
        assert_eq!(dates.date_range.as_deref(), Some("2021-01-05"));
        assert_eq!(dates.end_date, None);
    }

    #[test]
    fn test_set_date_rejects_loose_text() {
        let mut catalog = catalog();
        let before = catalog.get(&id("a1")).unwrap().dates.clone();
        let result = apply_edit(&mut catalog, &id("a1"), &Edit::SetDate("Oct 30 – Nov 2".into()));
        assert!(matches!(result, Err(Error::Parse(_))));
        assert_eq!(catalog.get(&id("a1")).unwrap().dates, before);
    }

    #[test]
    fn test_delete() {
        let mut catalog = catalog();
        let outcome = apply_edit(&mut catalog, &id("a1"), &Edit::Delete).unwrap().unwrap();
        assert_eq!(outcome.message, "Deleted 'Paris'");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_missing_album_is_none() {
        let mut catalog = catalog();
        assert!(apply_edit(&mut catalog, &id("zz"), &Edit::Delete).unwrap().is_none());
        assert!(apply_edit(&mut catalog, &id("zz"), &Edit::SetItemCount(3)).unwrap().is_none());
    }

    #[test]
    fn test_run_edit_persists_once() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("albums.json"));
        store.save(&catalog()).unwrap();

        run_edit(&store, &id("a2"), &Edit::AddTag("italy".into())).unwrap();
        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.get(&id("a2")).unwrap().tags, vec!["italy"]);
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn test_run_edit_invalid_date_leaves_store_untouched() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("albums.json"));
        store.save(&catalog()).unwrap();
        let before = std::fs::read_to_string(store.path()).unwrap();

        assert!(run_edit(&store, &id("a1"), &Edit::SetDate("2025-11-10--".into())).is_err());
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    }
}
