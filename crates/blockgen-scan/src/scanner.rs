//! Recursive texture directory scan

use blockgen_core::{io, BlockgenError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Column order of `block_assets.csv`
pub const ASSET_CSV_HEADERS: [&str; 3] = ["filename", "relative_path", "full_path"];

/// One regular file discovered under the scanned root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Bare file name (e.g. `acacia_log_top.png`)
    pub filename: String,
    /// Path relative to the scanned root
    pub relative_path: String,
    /// Scanned root joined with the relative path
    pub full_path: String,
}

/// Collect every regular file under `root`, sorted by filename.
///
/// Directory entries are visited in name order, so files sharing a filename
/// in different subdirectories keep a stable relative order.
pub fn scan_directory<P: AsRef<Path>>(root: P) -> Result<Vec<AssetRecord>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(BlockgenError::DirectoryNotFound(root.display().to_string()));
    }

    let mut records = Vec::new();
    scan_into(root, root, &mut records)?;
    records.sort_by(|a, b| a.filename.cmp(&b.filename));

    log::debug!("Scanned {} files under {}", records.len(), root.display());
    Ok(records)
}

/// Walk `dir`; only a failure to read `dir` itself is an error.
/// Unreadable subdirectories and entries are logged and skipped.
fn scan_into(root: &Path, dir: &Path, records: &mut Vec<AssetRecord>) -> Result<()> {
    let mut entries: Vec<fs::DirEntry> = fs::read_dir(dir)?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping entry in {}: {}", dir.display(), e);
                None
            }
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();

        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        if file_type.is_dir() {
            if let Err(e) = scan_into(root, &path, records) {
                log::warn!("Skipping unreadable directory {}: {}", path.display(), e);
            }
        } else if path.is_file() {
            let relative = path.strip_prefix(root).unwrap_or(&path);
            records.push(AssetRecord {
                filename: entry.file_name().to_string_lossy().to_string(),
                relative_path: relative.to_string_lossy().to_string(),
                full_path: path.to_string_lossy().to_string(),
            });
        }
    }

    Ok(())
}

/// Write the listing as `filename,relative_path,full_path` CSV
pub fn write_asset_csv<P: AsRef<Path>>(path: P, records: &[AssetRecord]) -> Result<()> {
    io::write_csv_rows(path, &ASSET_CSV_HEADERS, records)
}

/// Read a listing written by [`write_asset_csv`]
pub fn read_asset_csv<P: AsRef<Path>>(path: P) -> Result<Vec<AssetRecord>> {
    io::read_csv_rows(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("blockgen_scan_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"png").unwrap();
    }

    #[test]
    fn test_scan_sorted_and_recursive() {
        let dir = temp_dir();
        touch(&dir.join("stone.png"));
        touch(&dir.join("acacia_log_top.png"));
        touch(&dir.join("logs").join("acacia_log.png"));

        let records = scan_directory(&dir).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, vec!["acacia_log.png", "acacia_log_top.png", "stone.png"]);

        let nested = &records[0];
        assert_eq!(
            PathBuf::from(&nested.relative_path),
            PathBuf::from("logs").join("acacia_log.png")
        );
        assert_eq!(PathBuf::from(&nested.full_path), dir.join("logs").join("acacia_log.png"));

        fs::remove_dir_all(&dir).ok();
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = temp_dir();
        touch(&dir.join("stone.png"));
        touch(&dir.join("locked").join("hidden.png"));
        touch(&dir.join("open").join("sand.png"));
        let locked = dir.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = scan_directory(&dir);
        // root ignores directory permissions
        let locked_readable = fs::read_dir(&locked).is_ok();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let names: Vec<String> = result.unwrap().into_iter().map(|r| r.filename).collect();
        assert!(names.contains(&"stone.png".to_string()));
        assert!(names.contains(&"sand.png".to_string()));
        assert_eq!(names.contains(&"hidden.png".to_string()), locked_readable);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_scan_matches_regular_files() {
        let dir = temp_dir();
        let files = ["a.png", "b/c.png", "b/d/e.png", "f.mcmeta"];
        for f in &files {
            touch(&dir.join(f));
        }
        fs::create_dir_all(dir.join("empty")).unwrap();

        let records = scan_directory(&dir).unwrap();
        assert_eq!(records.len(), files.len());

        let found: HashSet<&str> = records.iter().map(|r| r.filename.as_str()).collect();
        let expected: HashSet<&str> = ["a.png", "c.png", "e.png", "f.mcmeta"].into_iter().collect();
        assert_eq!(found, expected);
        assert!(records.windows(2).all(|w| w[0].filename <= w[1].filename));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_duplicate_filenames_follow_directory_order() {
        let dir = temp_dir();
        touch(&dir.join("b").join("torch.png"));
        touch(&dir.join("a").join("torch.png"));

        let records = scan_directory(&dir).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].relative_path.starts_with('a'));
        assert!(records[1].relative_path.starts_with('b'));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_directory() {
        let dir = temp_dir();
        let err = scan_directory(dir.join("missing")).unwrap_err();
        assert!(matches!(err, BlockgenError::DirectoryNotFound(_)));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_csv_roundtrip() {
        let dir = temp_dir();
        touch(&dir.join("assets").join("dirt.png"));
        touch(&dir.join("assets").join("grass_block_top.png"));

        let records = scan_directory(dir.join("assets")).unwrap();
        let csv_path = dir.join("block_assets.csv");
        write_asset_csv(&csv_path, &records).unwrap();

        let header = fs::read_to_string(&csv_path).unwrap();
        assert!(header.starts_with("filename,relative_path,full_path"));
        assert_eq!(read_asset_csv(&csv_path).unwrap(), records);

        fs::remove_dir_all(&dir).ok();
    }
}
