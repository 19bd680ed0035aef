//! Sequential block ID assignment and `blocks_config.json`

use crate::extract::SingleTextureRow;
use blockgen_core::{io, normalize_key, BlockgenError, Face, Result, TextureRef, Textures};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// First ID handed to generated blocks; 0-3 belong to the core blocks
pub const DEFAULT_BASE_ID: u16 = 4;

pub const DEFAULT_DESCRIPTION: &str = "Single-texture blocks from CSV";

/// A block with its assigned numeric type ID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberedBlock {
    pub block_type: u16,
    pub block_name: String,
    pub textures: Textures,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlocksMetadata {
    pub total_blocks: usize,
    pub id_range: String,
    pub description: String,
}

/// Contents of `blocks_config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlocksConfig {
    pub blocks: IndexMap<String, NumberedBlock>,
    pub metadata: BlocksMetadata,
}

impl BlocksConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        io::read_json(path)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        io::write_json_pretty(path, self)
    }

    /// Highest assigned ID, if any block is present
    pub fn max_block_type(&self) -> Option<u16> {
        self.blocks.values().map(|b| b.block_type).max()
    }
}

/// Render an ID range as `"base-last"`
///
/// An empty range keeps the same formula, so 0 blocks from base 4 is "4-3".
pub fn id_range(base: u16, count: usize) -> String {
    let last = i64::from(base) + count as i64 - 1;
    format!("{}-{}", base, last)
}

/// Assign contiguous IDs from `base` in row order.
///
/// Rows missing a key, name or texture are skipped without consuming an ID.
/// A repeated key overwrites the earlier row's name and texture and keeps
/// its ID, so the ID set stays contiguous.
pub fn assign_ids(rows: &[SingleTextureRow], base: u16) -> Result<BlocksConfig> {
    let mut blocks: IndexMap<String, NumberedBlock> = IndexMap::new();
    let mut next = Some(base);

    for row in rows {
        if let Err(e) = validate_row(row) {
            log::warn!("Skipping row: {}", e);
            continue;
        }

        let key = normalize_key(&row.block_key);
        let mut textures = Textures::new();
        textures.insert(Face::All, TextureRef::Single(row.texture_file.trim().to_string()));

        if let Some(existing) = blocks.get_mut(&key) {
            log::debug!("Duplicate key '{}' keeps ID {}", key, existing.block_type);
            existing.block_name = row.block_name.clone();
            existing.textures = textures;
            continue;
        }

        let block_type = next.ok_or_else(|| {
            BlockgenError::ConfigError(format!("No block ID left for '{}'", key))
        })?;
        next = block_type.checked_add(1);

        blocks.insert(
            key,
            NumberedBlock {
                block_type,
                block_name: row.block_name.clone(),
                textures,
            },
        );
    }

    let metadata = BlocksMetadata {
        total_blocks: blocks.len(),
        id_range: id_range(base, blocks.len()),
        description: DEFAULT_DESCRIPTION.to_string(),
    };

    Ok(BlocksConfig { blocks, metadata })
}

fn validate_row(row: &SingleTextureRow) -> Result<()> {
    let missing = [
        ("block_key", &row.block_key),
        ("block_name", &row.block_name),
        ("texture_file", &row.texture_file),
    ]
    .into_iter()
    .find(|(_, value)| value.trim().is_empty());

    match missing {
        Some((field, _)) => Err(BlockgenError::MalformedRecord(format!(
            "row for '{}' has an empty {}",
            row.block_key, field
        ))),
        None => Ok(()),
    }
}
