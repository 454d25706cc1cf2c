pub mod edit;
pub mod import;
pub mod search;
pub mod stats;
pub mod tags;

use album_catalog_core::config::default_data_dir;
use album_catalog_core::{Config, ReportRow, Store, load_config};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Resolved configuration and store handle for one invocation
pub struct Session {
    pub config: Config,
    pub store: Store,
    pub json: bool,
}

impl Session {
    pub fn open(data_dir: Option<PathBuf>, store: Option<PathBuf>, json: bool) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir().context("Failed to resolve data directory")?,
        };
        let config = load_config(&data_dir)
            .with_context(|| format!("Failed to load configuration from {}", data_dir.display()))?;
        let store_path = store.unwrap_or_else(|| config.store_path.clone());
        debug!(data_dir = %data_dir.display(), store = %store_path.display(), "session");

        Ok(Self {
            config,
            store: Store::new(store_path),
            json,
        })
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to encode output")?;
    println!("{}", text);
    Ok(())
}

/// Text rendering of report rows: label, then the ids to browse them with.
pub fn print_rows(rows: &[ReportRow]) {
    for row in rows {
        println!("{}", row.label);
        if !row.id_subset.is_empty() {
            println!("   --ids {}", row.id_subset.to_arg());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use album_catalog_core::SortOrder;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_session_uses_config_store_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "store_file = \"albums.jsonl\"\nsort = \"date\"\n",
        )
        .unwrap();

        let session = Session::open(Some(dir.path().to_path_buf()), None, false).unwrap();
        assert_eq!(session.store.path(), dir.path().join("albums.jsonl"));
        assert_eq!(session.config.sort, SortOrder::Date);
    }

    #[test]
    fn test_session_store_override() {
        let dir = TempDir::new().unwrap();
        let other = dir.path().join("elsewhere.json");
        let session =
            Session::open(Some(dir.path().join("data")), Some(other.clone()), true).unwrap();
        assert_eq!(session.store.path(), other);
        assert!(dir.path().join("data").is_dir());
        assert!(session.json);
    }

    #[test]
    fn test_session_rejects_unknown_config_key() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "colour = \"blue\"\n").unwrap();
        assert!(Session::open(Some(dir.path().to_path_buf()), None, false).is_err());
    }
}
