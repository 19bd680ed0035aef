//! Enum header command

use anyhow::{Context, Result};
use blockgen_blocks::{render_block_enum, BlocksConfig};
use std::path::Path;

pub const DEFAULT_OUTPUT: &str = "include/BlockTypes.h";

pub fn run(config_path: &str, output: &str) -> Result<()> {
    let config = BlocksConfig::load(config_path)?;
    write_header(&config, Path::new(output))?;

    println!("Generated {} with {} block types", output, config.blocks.len());
    if let Some(max) = config.max_block_type() {
        println!("  Block ID range: {}-{}", min_block_type(&config), max);
    }
    Ok(())
}

pub fn write_header(config: &BlocksConfig, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(output, render_block_enum(config))
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(())
}

fn min_block_type(config: &BlocksConfig) -> u16 {
    config
        .blocks
        .values()
        .map(|b| b.block_type)
        .min()
        .unwrap_or_default()
}
