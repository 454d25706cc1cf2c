use crate::search::SearchHit;
use album_catalog_core::{Album, ResultItem, format_number};

/// Display title: suffix stripped, known count appended ("Paris (1,234)").
pub fn display_title(album: &Album, title_suffix: &str) -> String {
    let title = album.clean_title(title_suffix);
    match album.known_item_count() {
        Some(count) => format!("{} ({})", title, format_number(count)),
        None => title.to_string(),
    }
}

/// "3/12 • 📅 Oct 30 – Nov 2 • 🏷️ travel, family", or the url when the album
/// has neither dates nor tags.
pub fn subtitle(album: &Album, position_label: &str) -> String {
    let mut parts = Vec::new();
    if let Some(date) = album.dates.display() {
        parts.push(format!("📅 {}", date));
    }
    if !album.tags.is_empty() {
        parts.push(format!("🏷️ {}", album.tags.join(", ")));
    }
    if parts.is_empty() {
        return format!("{} • {}", position_label, album.url);
    }
    format!("{} • {}", position_label, parts.join(" • "))
}

pub fn result_item(hit: &SearchHit<'_>, title_suffix: &str) -> ResultItem {
    let position_label = hit.position_label();
    ResultItem {
        title: display_title(hit.album, title_suffix),
        subtitle: subtitle(hit.album, &position_label),
        url: hit.album.url.clone(),
        id: hit.album.id.clone(),
        position_label,
    }
}

pub fn result_items(hits: &[SearchHit<'_>], title_suffix: &str) -> Vec<ResultItem> {
    hits.iter().map(|hit| result_item(hit, title_suffix)).collect()
}
