use super::{Session, print_json, print_rows};
use album_catalog_core::AlbumId;
use album_catalog_query::{TagAction, tag_menu, tag_rows};
use anyhow::{Context, Result};

/// All tags with their counts, each browsable through its id list
pub fn list(session: &Session, filter: Option<&str>) -> Result<()> {
    let catalog = session.store.load().context("Failed to load album store")?;
    let rows = tag_rows(&catalog, filter);

    if session.json {
        return print_json(&rows);
    }
    if rows.is_empty() {
        println!("No tags found");
        return Ok(());
    }
    print_rows(&rows);
    Ok(())
}

/// Tag choices for one album
pub fn menu(session: &Session, id: &str, filter: Option<&str>) -> Result<()> {
    let catalog = session.store.load().context("Failed to load album store")?;
    let Some(album) = catalog.get(&AlbumId::from(id)) else {
        // Unknown id is an empty result, not a failure.
        if session.json {
            return print_json(&serde_json::Value::Null);
        }
        println!("No album with id {}", id);
        return Ok(());
    };
    let menu = tag_menu(&catalog, album, filter);

    if session.json {
        return print_json(&menu);
    }

    let current = if menu.current_tags.is_empty() {
        "No tags".to_string()
    } else {
        menu.current_tags.join(", ")
    };
    println!("🏷️  Tags for: {}", menu.title);
    println!("   Currently: {}", current);
    println!();
    for entry in &menu.entries {
        match (entry.is_new, entry.action) {
            (true, _) => println!("➕ Create new tag: {}", entry.tag),
            (false, TagAction::Add) => println!("   add     {} ({})", entry.tag, entry.count),
            (false, TagAction::Remove) => println!("   remove  {} ({})", entry.tag, entry.count),
        }
    }
    if menu.entries.is_empty() {
        println!("No tags found");
    }
    Ok(())
}
