//! Reserved-key purge
//!
//! The core blocks (stone, dirt, grass, air) have fixed IDs 0-3 in the
//! enum preamble, so generated entries with those keys are removed.

use crate::numbering::{id_range, BlocksConfig};
use blockgen_core::{BlockMapping, BlockgenError, Result, RESERVED_KEYS};

/// What happens to the remaining IDs after a purge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PurgePolicy {
    /// Leave IDs untouched; the range may become sparse
    #[default]
    KeepIds,
    /// Reassign contiguous IDs from `base` in iteration order
    Renumber { base: u16 },
}

/// Remove reserved keys from a mapping, returning the removed keys
pub fn purge_reserved(mapping: &mut BlockMapping) -> Vec<String> {
    RESERVED_KEYS
        .iter()
        .filter(|key| mapping.remove(key).is_some())
        .map(|key| {
            log::info!("Removed reserved block '{}'", key);
            key.to_string()
        })
        .collect()
}

impl BlocksConfig {
    /// Remove reserved keys and refresh the metadata per `policy`.
    ///
    /// `total_blocks` always reflects the remaining count. `id_range` only
    /// changes when renumbering.
    pub fn purge_reserved(&mut self, policy: PurgePolicy) -> Result<Vec<String>> {
        let removed: Vec<String> = RESERVED_KEYS
            .iter()
            .filter(|key| self.blocks.shift_remove(**key).is_some())
            .map(|key| {
                log::info!("Removed reserved block '{}'", key);
                key.to_string()
            })
            .collect();

        self.metadata.total_blocks = self.blocks.len();

        if let PurgePolicy::Renumber { base } = policy {
            self.renumber(base)?;
        }

        Ok(removed)
    }

    fn renumber(&mut self, base: u16) -> Result<()> {
        let mut next = Some(base);
        for (key, block) in self.blocks.iter_mut() {
            let block_type = next.ok_or_else(|| {
                BlockgenError::ConfigError(format!("No block ID left for '{}'", key))
            })?;
            block.block_type = block_type;
            next = block_type.checked_add(1);
        }
        self.metadata.id_range = id_range(base, self.blocks.len());
        Ok(())
    }
}
