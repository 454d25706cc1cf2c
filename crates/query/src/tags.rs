use album_catalog_core::{Album, AlbumId, Catalog, IdSubset, ReportRow, plural};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// A distinct tag and how many albums carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Every distinct tag, most used first, ties broken lexicographically.
///
/// Tags compare case-sensitively, as stored.
pub fn tag_counts(catalog: &Catalog) -> Vec<TagCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for album in catalog.iter() {
        let distinct: HashSet<&str> = album.tags.iter().map(String::as_str).collect();
        for tag in distinct {
            *counts.entry(tag).or_default() += 1;
        }
    }

    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();
    // BTreeMap already yields lexicographic order; the stable sort keeps it for ties.
    tags.sort_by(|a, b| b.count.cmp(&a.count));
    tags
}

/// Case-insensitive substring match; an empty filter matches everything.
fn tag_matches(tag: &str, filter: &str) -> bool {
    filter.is_empty() || tag.to_lowercase().contains(filter)
}

/// Tag counts whose name contains `filter`.
pub fn list_tags(catalog: &Catalog, filter: Option<&str>) -> Vec<TagCount> {
    let filter = filter.map(|f| f.trim().to_lowercase()).unwrap_or_default();
    tag_counts(catalog)
        .into_iter()
        .filter(|t| tag_matches(&t.tag, &filter))
        .collect()
}

/// Ids of every album carrying `tag`, in store order.
pub fn tag_subset(catalog: &Catalog, tag: &str) -> IdSubset {
    catalog
        .iter()
        .filter(|album| album.has_tag(tag))
        .map(|album| album.id.clone())
        .collect()
}

/// The tag listing as report rows, each carrying its bearers.
pub fn tag_rows(catalog: &Catalog, filter: Option<&str>) -> Vec<ReportRow> {
    list_tags(catalog, filter)
        .into_iter()
        .map(|t| {
            let label = format!("{} ({})", t.tag, plural(t.count, "album", "albums"));
            ReportRow::new(label, tag_subset(catalog, &t.tag))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagAction {
    Add,
    Remove,
}

/// One choice in the tag menu of an album
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagMenuEntry {
    pub tag: String,
    /// Albums currently carrying the tag; 0 for a new tag
    pub count: usize,
    pub action: TagAction,
    pub is_new: bool,
}

/// Tag choices for one album
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagMenu {
    pub id: AlbumId,
    pub title: String,
    pub current_tags: Vec<String>,
    pub entries: Vec<TagMenuEntry>,
}

/// Build the tag menu for `album`.
///
/// Known tags matching `filter` come first, marked remove when the album
/// already carries them. A non-empty filter that equals no known tag
/// (ignoring case) adds a trailing entry creating it.
pub fn tag_menu(catalog: &Catalog, album: &Album, filter: Option<&str>) -> TagMenu {
    let filter = filter.map(|f| f.trim().to_lowercase()).unwrap_or_default();
    let all = tag_counts(catalog);

    let mut entries: Vec<TagMenuEntry> = all
        .iter()
        .filter(|t| tag_matches(&t.tag, &filter))
        .map(|t| TagMenuEntry {
            tag: t.tag.clone(),
            count: t.count,
            action: if album.has_tag(&t.tag) {
                TagAction::Remove
            } else {
                TagAction::Add
            },
            is_new: false,
        })
        .collect();

    if !filter.is_empty() && !all.iter().any(|t| t.tag.to_lowercase() == filter) {
        entries.push(TagMenuEntry {
            tag: filter,
            count: 0,
            action: TagAction::Add,
            is_new: true,
        });
    }

    TagMenu {
        id: album.id.clone(),
        title: album.title.clone(),
        current_tags: album.tags.clone(),
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use album_catalog_core::store::parse_catalog_str;

    fn catalog() -> Catalog {
        parse_catalog_str(
            r#"{"id":"a","url":"u1","title":"Paris","tags":["travel","family"]}
{"id":"b","url":"u2","title":"Rome","tags":["travel"]}
{"id":"c","url":"u3","title":"Home","tags":["family","Travel"]}
{"id":"d","url":"u4","title":"Work","tags":["beach"]}
{"id":"e","url":"u5","title":"Nothing","tags":[]}
"#,
        )
        .unwrap()
    }

    fn names(tags: &[TagCount]) -> Vec<&str> {
        tags.iter().map(|t| t.tag.as_str()).collect()
    }

    #[test]
    fn test_tag_counts_ordering() {
        let tags = tag_counts(&catalog());
        assert_eq!(names(&tags), vec!["family", "travel", "Travel", "beach"]);
        assert_eq!(tags[0].count, 2);
        assert_eq!(tags[1].count, 2);
        assert_eq!(tags[2].count, 1);
    }

    #[test]
    fn test_counts_albums_not_occurrences() {
        let catalog = parse_catalog_str(r#"{"id":"a","url":"u1","title":"A","tags":["x","x"]}"#).unwrap();
        assert_eq!(tag_counts(&catalog)[0].count, 1);
    }

    #[test]
    fn test_list_tags_filter_is_case_insensitive() {
        let tags = list_tags(&catalog(), Some("TRAV"));
        assert_eq!(names(&tags), vec!["travel", "Travel"]);
        assert!(list_tags(&catalog(), Some("zzz")).is_empty());
        assert_eq!(list_tags(&catalog(), None).len(), 4);
    }

    #[test]
    fn test_tag_subset_is_case_sensitive() {
        let catalog = catalog();
        assert_eq!(tag_subset(&catalog, "travel").to_arg(), "a,b");
        assert_eq!(tag_subset(&catalog, "Travel").to_arg(), "c");
        assert!(tag_subset(&catalog, "none").is_empty());
    }

    #[test]
    fn test_tag_rows() {
        let rows = tag_rows(&catalog(), Some("beach"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "beach (1 album)");
        assert_eq!(rows[0].id_subset.to_arg(), "d");
    }

    #[test]
    fn test_tag_menu_actions() {
        let catalog = catalog();
        let album = catalog.get(&AlbumId::from("b")).unwrap();
        let menu = tag_menu(&catalog, album, None);
        assert_eq!(menu.entries.len(), 4);
        let travel = menu.entries.iter().find(|e| e.tag == "travel").unwrap();
        assert_eq!(travel.action, TagAction::Remove);
        let family = menu.entries.iter().find(|e| e.tag == "family").unwrap();
        assert_eq!(family.action, TagAction::Add);
        assert!(menu.entries.iter().all(|e| !e.is_new));
    }

    #[test]
    fn test_tag_menu_offers_new_tag() {
        let catalog = catalog();
        let album = catalog.get(&AlbumId::from("e")).unwrap();

        let menu = tag_menu(&catalog, album, Some("Be"));
        assert_eq!(menu.entries.len(), 2);
        assert_eq!(menu.entries[0].tag, "beach");
        assert_eq!(menu.entries[1].tag, "be");
        assert!(menu.entries[1].is_new);

        let exact = tag_menu(&catalog, album, Some("BEACH"));
        assert_eq!(exact.entries.len(), 1);
        assert!(!exact.entries[0].is_new);
    }
}
