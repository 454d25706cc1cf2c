use super::{Session, print_json, print_rows};
use album_catalog_core::ReportRow;
use album_catalog_query::compute_stats;
use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
struct StatsOutput {
    rows: Vec<ReportRow>,
    summary: String,
}

pub fn run(session: &Session) -> Result<()> {
    let catalog = session.store.load().context("Failed to load album store")?;
    let stats = compute_stats(&catalog);

    let output = StatsOutput {
        rows: stats.rows(),
        summary: stats.summary(),
    };
    if session.json {
        return print_json(&output);
    }

    println!("📈 {}", output.summary);
    println!();
    print_rows(&output.rows);
    Ok(())
}
