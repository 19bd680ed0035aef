//! Directory scan command

use anyhow::Result;
use blockgen_scan::{scan_directory, write_asset_csv};

pub const DEFAULT_OUTPUT: &str = "block_assets.csv";

pub fn run(dir: &str, output: &str) -> Result<()> {
    let assets = scan_directory(dir)?;
    write_asset_csv(output, &assets)?;

    println!("Found {} files in '{}'", assets.len(), dir);
    for asset in assets.iter().take(5) {
        log::info!("  {}", asset.filename);
    }
    if assets.len() > 5 {
        log::info!("  ... and {} more", assets.len() - 5);
    }
    println!("  Saved: {}", output);
    Ok(())
}
