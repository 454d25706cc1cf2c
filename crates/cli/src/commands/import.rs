use super::{Session, print_json, print_rows};
use album_catalog_core::ReportRow;
use album_catalog_importer::{SingleResult, import_json};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Serialize)]
struct ImportOutput<'a> {
    rows: Vec<ReportRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    single: Option<&'a SingleResult>,
}

/// Run one import and print its report
pub fn run(session: &Session, batch: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let json = read_batch(batch, file, io::stdin().lock())?;
    let report = import_json(&session.store, &json).context("Import failed")?;
    let rows = report.rows();

    if session.json {
        return print_json(&ImportOutput {
            rows,
            single: report.single.as_ref(),
        });
    }

    println!("📥 Imported {} into {}", report.total(), session.store.path().display());
    if let Some(single) = &report.single {
        println!("   {} ({})", single.title, single.url);
    }
    println!();
    print_rows(&rows);
    Ok(())
}

/// Descriptor text from the argument, a file, or `input` for "-" or nothing.
fn read_batch(batch: Option<String>, file: Option<PathBuf>, mut input: impl Read) -> Result<String> {
    if let Some(path) = file {
        return fs::read_to_string(&path)
            .with_context(|| format!("Failed to read batch file {}", path.display()));
    }
    match batch {
        Some(text) if text != "-" => Ok(text),
        _ => {
            let mut text = String::new();
            input
                .read_to_string(&mut text)
                .context("Failed to read batch from stdin")?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_batch_sources() {
        let stdin = r#"{"error":"from stdin"}"#.as_bytes();
        assert_eq!(read_batch(Some("{}".into()), None, stdin).unwrap(), "{}");
        assert_eq!(read_batch(Some("-".into()), None, stdin).unwrap(), r#"{"error":"from stdin"}"#);
        assert_eq!(read_batch(None, None, stdin).unwrap(), r#"{"error":"from stdin"}"#);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("batch.json");
        fs::write(&path, r#"{"mode":"bulk","candidates":[]}"#).unwrap();
        assert_eq!(
            read_batch(None, Some(path), stdin).unwrap(),
            r#"{"mode":"bulk","candidates":[]}"#
        );
        assert!(read_batch(None, Some(dir.path().join("missing.json")), stdin).is_err());
    }
}
