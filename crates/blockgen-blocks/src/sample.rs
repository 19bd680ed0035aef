//! Spot-check sampler for numbered configs

use crate::numbering::BlocksConfig;
use blockgen_core::{BlockgenError, Face, Result};
use std::fmt;

pub const DEFAULT_SAMPLE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBlock {
    pub key: String,
    pub id: u16,
    pub name: String,
    pub texture: String,
}

impl fmt::Display for SampleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  {} (ID: {}) - {}", self.key, self.id, self.name)?;
        write!(f, "    Texture: {}", self.texture)
    }
}

/// First `count` blocks in config order.
///
/// Every sampled block must carry an `all` texture.
pub fn sample_blocks(config: &BlocksConfig, count: usize) -> Result<Vec<SampleBlock>> {
    config
        .blocks
        .iter()
        .take(count)
        .map(|(key, block)| -> Result<SampleBlock> {
            let texture = block.textures.get(&Face::All).ok_or_else(|| {
                BlockgenError::MissingKey(format!("block '{}' has no 'all' texture", key))
            })?;
            Ok(SampleBlock {
                key: key.clone(),
                id: block.block_type,
                name: block.block_name.clone(),
                texture: texture.joined(),
            })
        })
        .collect()
}
