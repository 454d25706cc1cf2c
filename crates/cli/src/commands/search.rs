use super::{Session, print_json};
use album_catalog_core::{IdSubset, SortOrder};
use album_catalog_query::{Query, SearchOptions, result_items, search};
use anyhow::{Context, Result};

pub fn run(
    session: &Session,
    text: &str,
    ids: Option<String>,
    tag: Option<String>,
    sort: Option<SortOrder>,
) -> Result<()> {
    let subset = ids
        .as_deref()
        .map(IdSubset::parse)
        .transpose()
        .context("Invalid --ids")?;
    let catalog = session.store.load().context("Failed to load album store")?;

    let options = SearchOptions {
        subset,
        tag,
        sort: sort.unwrap_or(session.config.sort),
    };
    let hits = search(&catalog, &Query::parse(text), &options);
    let items = result_items(&hits, &session.config.title_suffix);

    if session.json {
        return print_json(&items);
    }
    if items.is_empty() {
        println!("No albums found");
        return Ok(());
    }
    for item in &items {
        println!("{}", item.title);
        println!("   {}", item.subtitle);
        println!("   {}  [{}]", item.url, item.id);
    }
    Ok(())
}
