//! Line-delimited JSON album store.
//!
//! One album object per line. Saving writes the whole catalog to a temporary
//! file next to the store and renames it over the old one, so a failed write
//! leaves the previous file intact.

use crate::error::{Error, Result};
use crate::types::{Album, AlbumDates, AlbumId};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Raw store line as written by any version of the tool
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAlbum {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    item_count: Option<Value>, // Older files hold strings here
    #[serde(default)]
    date_range: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// In-memory, ordered album collection
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    albums: Vec<Album>,
    dirty: bool,
}

impl Catalog {
    pub fn new(albums: Vec<Album>) -> Self {
        Self {
            albums,
            dirty: false,
        }
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn iter(&self) -> impl Iterator<Item = &Album> {
        self.albums.iter()
    }

    pub fn len(&self) -> usize {
        self.albums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    pub fn get(&self, id: &AlbumId) -> Option<&Album> {
        self.albums.iter().find(|a| &a.id == id)
    }

    pub fn get_mut(&mut self, id: &AlbumId) -> Option<&mut Album> {
        self.albums.iter_mut().find(|a| &a.id == id)
    }

    pub fn position_of_url(&self, url: &str) -> Option<usize> {
        self.albums.iter().position(|a| a.url == url)
    }

    pub fn find_by_url(&self, url: &str) -> Option<&Album> {
        self.position_of_url(url).map(|i| &self.albums[i])
    }

    pub fn album_at_mut(&mut self, index: usize) -> Option<&mut Album> {
        self.albums.get_mut(index)
    }

    /// Append a new album. Callers check url uniqueness first.
    pub fn push(&mut self, album: Album) {
        self.albums.push(album);
    }

    pub fn remove(&mut self, id: &AlbumId) -> Option<Album> {
        let index = self.albums.iter().position(|a| &a.id == id)?;
        Some(self.albums.remove(index))
    }

    /// True when loading repaired the data (ids assigned, duplicates dropped).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

/// Handle to the persisted store file
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the catalog. A missing file is an empty catalog.
    pub fn load(&self) -> Result<Catalog> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "store file not found, starting empty");
            return Ok(Catalog::default());
        }
        let content = fs::read_to_string(&self.path)?;
        let catalog = parse_catalog_str(&content)?;
        info!(
            path = %self.path.display(),
            albums = catalog.len(),
            dirty = catalog.is_dirty(),
            "loaded store"
        );
        Ok(catalog)
    }

    /// Replace the store file with the given catalog.
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        // Dropping the temp file on any error path removes it.
        let mut tmp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            write_catalog(&mut writer, catalog)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| Error::StoreIo(e.error))?;

        info!(path = %self.path.display(), albums = catalog.len(), "saved store");
        Ok(())
    }
}

/// Parse store content (useful for testing)
pub fn parse_catalog_str(content: &str) -> Result<Catalog> {
    let mut catalog = Catalog::default();
    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut seen_ids: HashSet<AlbumId> = HashSet::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = index + 1;
        let raw: RawAlbum = serde_json::from_str(line).map_err(|e| Error::StoreFormat {
            line: line_no,
            message: e.to_string(),
        })?;
        let (mut album, assigned_id) = convert_raw(raw, line_no);

        if !album.url.is_empty() && !seen_urls.insert(album.url.clone()) {
            warn!(line = line_no, url = %album.url, "dropping duplicate url");
            catalog.mark_dirty();
            continue;
        }
        if !seen_ids.insert(album.id.clone()) {
            warn!(line = line_no, id = %album.id, "duplicate id, assigning a fresh one");
            album.id = AlbumId::generate();
            seen_ids.insert(album.id.clone());
            catalog.mark_dirty();
        }
        if assigned_id {
            catalog.mark_dirty();
        }
        catalog.push(album);
    }

    Ok(catalog)
}

/// Write every album as one JSON line.
pub fn write_catalog<W: Write>(writer: &mut W, catalog: &Catalog) -> Result<()> {
    for album in catalog.iter() {
        serde_json::to_writer(&mut *writer, album)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Returns the album and whether an id had to be assigned.
fn convert_raw(raw: RawAlbum, line_no: usize) -> (Album, bool) {
    let (id, assigned) = match non_empty(raw.id) {
        Some(id) => (AlbumId::from(id), false),
        None => {
            let id = AlbumId::generate();
            debug!(line = line_no, id = %id, "assigned id to legacy album");
            (id, true)
        }
    };

    let album = Album {
        id,
        url: raw.url.map(|u| u.trim().to_string()).unwrap_or_default(),
        title: raw.title.unwrap_or_default(),
        tags: raw.tags.unwrap_or_default(),
        item_count: raw.item_count.as_ref().and_then(|v| parse_item_count(v, line_no)),
        dates: AlbumDates {
            date_range: non_empty(raw.date_range),
            start_date: non_empty(raw.start_date),
            end_date: non_empty(raw.end_date),
        },
        extra: raw.extra,
    };
    (album, assigned)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn parse_item_count(value: &Value, line_no: usize) -> Option<u64> {
    let parsed = match value {
        Value::Null => return None,
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    if parsed.is_none() {
        warn!(line = line_no, value = %value, "ignoring unreadable itemCount");
    }
    parsed
}
