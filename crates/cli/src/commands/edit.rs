use super::{Session, print_json};
use album_catalog_core::{AlbumId, Edit, EditOutcome, run_edit};
use anyhow::{Context, Result};

pub fn set_title(session: &Session, id: &str, title: String) -> Result<()> {
    apply(session, id, Edit::SetTitle(title))
}

pub fn add_tag(session: &Session, id: &str, tag: String) -> Result<()> {
    apply(session, id, Edit::AddTag(tag))
}

pub fn remove_tag(session: &Session, id: &str, tag: String) -> Result<()> {
    apply(session, id, Edit::RemoveTag(tag))
}

pub fn set_count(session: &Session, id: &str, count: u64) -> Result<()> {
    apply(session, id, Edit::SetItemCount(count))
}

pub fn set_date(session: &Session, id: &str, date: String) -> Result<()> {
    apply(session, id, Edit::SetDate(date))
}

pub fn delete(session: &Session, id: &str) -> Result<()> {
    apply(session, id, Edit::Delete)
}

fn apply(session: &Session, id: &str, edit: Edit) -> Result<()> {
    let id = AlbumId::from(id.trim());
    let outcome = run_edit(&session.store, &id, &edit)
        .with_context(|| format!("Failed to edit album {}", id))?;
    report(session, &id, outcome.as_ref())
}

fn report(session: &Session, id: &AlbumId, outcome: Option<&EditOutcome>) -> Result<()> {
    if session.json {
        return match outcome {
            Some(o) => print_json(o),
            None => print_json(&serde_json::Value::Null),
        };
    }
    match outcome {
        Some(o) if o.changed => println!("✓ {}", o.message),
        Some(o) => println!("  {}", o.message),
        None => println!("No album with id {}", id),
    }
    Ok(())
}
