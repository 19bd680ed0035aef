//! Reserved-key purge command

use anyhow::Result;
use blockgen_blocks::{purge_reserved, BlocksConfig, PurgePolicy};
use blockgen_core::BlockMapping;

pub fn run(config_path: &str, renumber: bool, base: u16) -> Result<()> {
    let policy = if renumber {
        PurgePolicy::Renumber { base }
    } else {
        PurgePolicy::KeepIds
    };

    let mut config = BlocksConfig::load(config_path)?;
    let removed = config.purge_reserved(policy)?;
    config.save(config_path)?;

    report(&removed, config.blocks.len());
    if renumber {
        println!("  Renumbered IDs {}", config.metadata.id_range);
    }
    Ok(())
}

pub fn run_mapping(mapping_path: &str) -> Result<()> {
    let mut mapping = BlockMapping::load(mapping_path)?;
    let removed = purge_reserved(&mut mapping);
    mapping.save(mapping_path)?;

    report(&removed, mapping.len());
    Ok(())
}

fn report(removed: &[String], remaining: usize) {
    if removed.is_empty() {
        println!("No reserved blocks found ({} blocks)", remaining);
    } else {
        println!(
            "Removed {} reserved blocks: {} ({} remaining)",
            removed.len(),
            removed.join(", "),
            remaining
        );
    }
}
