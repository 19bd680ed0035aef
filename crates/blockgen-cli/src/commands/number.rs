//! Block ID assignment command

use anyhow::Result;
use blockgen_blocks::{assign_ids, read_single_texture_csv};

pub const DEFAULT_OUTPUT: &str = "blocks_config.json";

pub fn run(input: &str, output: &str, base: u16) -> Result<()> {
    let rows = read_single_texture_csv(input)?;
    let config = assign_ids(&rows, base)?;
    config.save(output)?;

    println!(
        "Numbered {} blocks (IDs {})",
        config.metadata.total_blocks, config.metadata.id_range
    );
    println!("  Saved: {}", output);
    Ok(())
}
