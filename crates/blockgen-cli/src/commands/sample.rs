//! Sample command

use anyhow::Result;
use blockgen_blocks::{sample_blocks, BlocksConfig};

pub fn run(config_path: &str, count: usize) -> Result<()> {
    let config = BlocksConfig::load(config_path)?;
    print_samples(&config, count)
}

pub fn print_samples(config: &BlocksConfig, count: usize) -> Result<()> {
    let samples = sample_blocks(config, count)?;
    println!("Sample blocks for testing:");
    for block in &samples {
        println!("{}", block);
        println!();
    }
    Ok(())
}
