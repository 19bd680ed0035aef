//! blockgen scan - texture directory listing
//!
//! Walks a texture directory into a filename-sorted list of `AssetRecord`s
//! and persists it as `block_assets.csv`.

mod scanner;

pub use scanner::{read_asset_csv, scan_directory, write_asset_csv, AssetRecord, ASSET_CSV_HEADERS};
