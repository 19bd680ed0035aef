//! Single-texture block extraction

use blockgen_core::{io, BlockMapping, Face, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Column order of `all_texture_blocks.csv`
pub const SINGLE_TEXTURE_CSV_HEADERS: [&str; 3] = ["block_key", "block_name", "texture_file"];

/// One row of `all_texture_blocks.csv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleTextureRow {
    pub block_key: String,
    pub block_name: String,
    /// The `all` texture; several variants are joined with ", "
    pub texture_file: String,
}

/// Select blocks whose only face is `all`, in mapping order
pub fn extract_single_texture(mapping: &BlockMapping) -> Vec<SingleTextureRow> {
    mapping
        .iter()
        .filter(|(_, record)| record.is_single_texture())
        .filter_map(|(key, record)| {
            record.textures.get(&Face::All).map(|all| SingleTextureRow {
                block_key: key.clone(),
                block_name: record.block_name.clone(),
                texture_file: all.joined(),
            })
        })
        .collect()
}

pub fn write_single_texture_csv<P: AsRef<Path>>(path: P, rows: &[SingleTextureRow]) -> Result<()> {
    io::write_csv_rows(path, &SINGLE_TEXTURE_CSV_HEADERS, rows)
}

pub fn read_single_texture_csv<P: AsRef<Path>>(path: P) -> Result<Vec<SingleTextureRow>> {
    io::read_csv_rows(path)
}
