//! Single-texture extraction command

use anyhow::Result;
use blockgen_blocks::{extract_single_texture, write_single_texture_csv};
use blockgen_core::BlockMapping;

pub const DEFAULT_OUTPUT: &str = "all_texture_blocks.csv";

pub fn run(input: &str, output: &str) -> Result<()> {
    let mapping = BlockMapping::load(input)?;
    let rows = extract_single_texture(&mapping);
    write_single_texture_csv(output, &rows)?;

    println!(
        "Extracted {} single-texture blocks out of {}",
        rows.len(),
        mapping.len()
    );
    println!("  Saved: {}", output);
    Ok(())
}
