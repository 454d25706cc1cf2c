use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "ALBUM_CATALOG_DATA";
pub const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_STORE_FILE: &str = "photoAlbums.json";
pub const DEFAULT_TITLE_SUFFIX: &str = " - Google Photos";

/// Result ordering for searches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Order albums were added in
    #[default]
    Store,
    /// Most recent start date first, undated last
    Date,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub store_path: PathBuf,
    pub title_suffix: String,
    pub sort: SortOrder,
}

impl Config {
    pub fn with_defaults(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            store_path: data_dir.join(DEFAULT_STORE_FILE),
            data_dir,
            title_suffix: DEFAULT_TITLE_SUFFIX.to_string(),
            sort: SortOrder::default(),
        }
    }
}

/// Raw config.toml structure
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    store_file: Option<String>,
    title_suffix: Option<String>,
    sort: Option<SortOrder>,
}

/// `$HOME/.album-catalog`, or `%USERPROFILE%\.album-catalog`.
pub fn default_data_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| Error::ConfigParse("Could not determine home directory".to_string()))?;
    Ok(PathBuf::from(home).join(".album-catalog"))
}

/// Load `config.toml` from the data directory, creating the directory if needed.
///
/// A missing config file yields the defaults.
pub fn load_config<P: AsRef<Path>>(data_dir: P) -> Result<Config> {
    let data_dir = data_dir.as_ref();
    fs::create_dir_all(data_dir)?;

    let path = data_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::with_defaults(data_dir));
    }
    let content = fs::read_to_string(&path)?;
    parse_config_str(&content, data_dir)
}

/// Parse config.toml content (useful for testing)
pub fn parse_config_str(content: &str, data_dir: &Path) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)?;
    let mut config = Config::with_defaults(data_dir);

    if let Some(store_file) = raw.store_file {
        if store_file.trim().is_empty() {
            return Err(Error::ConfigParse("Empty 'store_file'".to_string()));
        }
        config.store_path = data_dir.join(store_file.trim());
    }
    if let Some(suffix) = raw.title_suffix {
        config.title_suffix = suffix;
    }
    if let Some(sort) = raw.sort {
        config.sort = sort;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = parse_config_str("", Path::new("/data")).unwrap();
        assert_eq!(config.store_path, PathBuf::from("/data/photoAlbums.json"));
        assert_eq!(config.title_suffix, " - Google Photos");
        assert_eq!(config.sort, SortOrder::Store);
    }

    #[test]
    fn test_parse_all_keys() {
        let toml = r#"
store_file = "albums.jsonl"
title_suffix = ""
sort = "date"
"#;
        let config = parse_config_str(toml, Path::new("/data")).unwrap();
        assert_eq!(config.store_path, PathBuf::from("/data/albums.jsonl"));
        assert_eq!(config.title_suffix, "");
        assert_eq!(config.sort, SortOrder::Date);
    }

    #[test]
    fn test_absolute_store_file_wins() {
        let config = parse_config_str("store_file = \"/elsewhere/a.json\"", Path::new("/data")).unwrap();
        assert_eq!(config.store_path, PathBuf::from("/elsewhere/a.json"));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let result = parse_config_str("colour = \"blue\"", Path::new("/data"));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Configuration parse error"));
        assert!(err.contains("colour"));
    }

    #[test]
    fn test_rejects_empty_store_file() {
        assert!(parse_config_str("store_file = \"  \"", Path::new("/data")).is_err());
    }

    #[test]
    fn test_load_config_creates_dir_and_reads_file() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("data");
        let config = load_config(&data_dir).unwrap();
        assert!(data_dir.is_dir());
        assert_eq!(config.store_path, data_dir.join(DEFAULT_STORE_FILE));

        fs::write(data_dir.join(CONFIG_FILE), "sort = \"date\"\n").unwrap();
        assert_eq!(load_config(&data_dir).unwrap().sort, SortOrder::Date);
    }
}
