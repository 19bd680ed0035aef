//! Whole-file JSON and CSV artifact helpers
//!
//! Every stage reads its input as one snapshot and writes its output once,
//! so these helpers load or save an entire file at a time.

use crate::error::{BlockgenError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Fail with `FileNotFound` if an input artifact is missing
pub fn require_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(BlockgenError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

/// Read and decode a JSON file
pub fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    require_file(path)?;
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write a value as two-space indented JSON, creating parent directories
pub fn write_json_pretty<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Read every decodable row of a headed CSV file.
///
/// Rows that fail to decode are logged and skipped.
pub fn read_csv_rows<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>> {
    let path = path.as_ref();
    require_file(path)?;

    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for (i, row) in reader.deserialize::<T>().enumerate() {
        match row {
            Ok(row) => rows.push(row),
            // Header is line 1, so data row i sits on line i + 2
            Err(e) => log::warn!("{}:{}: skipping row: {}", path.display(), i + 2, e),
        }
    }
    Ok(rows)
}

/// Write rows under an explicit header; the header is written even with no rows
pub fn write_csv_rows<T: Serialize, P: AsRef<Path>>(
    path: P,
    headers: &[&str],
    rows: &[T],
) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::path::PathBuf;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        name: String,
        file: String,
    }

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("blockgen_io_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_file() {
        let dir = temp_dir();
        let err = read_json::<serde_json::Value, _>(dir.join("nope.json")).unwrap_err();
        assert!(matches!(err, BlockgenError::FileNotFound(_)));
        let err = read_csv_rows::<Row, _>(dir.join("nope.csv")).unwrap_err();
        assert!(matches!(err, BlockgenError::FileNotFound(_)));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_csv_header_written_without_rows() {
        let dir = temp_dir();
        let path = dir.join("out").join("empty.csv");
        write_csv_rows::<Row, _>(&path, &["name", "file"], &[]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "name,file");
        assert!(read_csv_rows::<Row, _>(&path).unwrap().is_empty());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_csv_quoting_survives() {
        let dir = temp_dir();
        let path = dir.join("rows.csv");
        let rows = vec![Row {
            name: "Lamp, Redstone".to_string(),
            file: "lamp.png, lamp_on.png".to_string(),
        }];
        write_csv_rows(&path, &["name", "file"], &rows).unwrap();
        let back: Vec<Row> = read_csv_rows(&path).unwrap();
        assert_eq!(back, rows);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_csv_skips_short_rows() {
        let dir = temp_dir();
        let path = dir.join("rows.csv");
        std::fs::write(&path, "name,file\nstone,stone.png\nbroken\ndirt,dirt.png\n").unwrap();
        let rows: Vec<Row> = read_csv_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "dirt");
        std::fs::remove_dir_all(&dir).ok();
    }
}
