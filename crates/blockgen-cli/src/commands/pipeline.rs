//! Full pipeline command
//!
//! Runs scan, classify, purge, extract, number, header and sample in order.
//! Every stage writes its artifact to disk and the next stage reads it back.

use super::classify::{classify_listing, prepare, ClassifyOptions};
use super::header::write_header;
use super::sample::print_samples;
use super::{classify, extract, header, number, scan};
use anyhow::Result;
use blockgen_blocks::{
    assign_ids, extract_single_texture, purge_reserved, read_single_texture_csv,
    write_single_texture_csv, BlocksConfig, DEFAULT_SAMPLE_SIZE,
};
use blockgen_classify::{ClassificationConfig, Classifier};
use blockgen_core::BlockMapping;
use blockgen_scan::{read_asset_csv, scan_directory, write_asset_csv};
use std::path::Path;

pub struct PipelineArgs {
    pub dir: String,
    pub out_dir: String,
    pub base: u16,
    pub options: ClassifyOptions,
}

/// Counts reported after a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    pub assets: usize,
    pub blocks: usize,
    pub reserved_removed: Vec<String>,
    pub single_texture: usize,
    pub numbered: usize,
}

pub fn run(args: PipelineArgs) -> Result<()> {
    let (classifier, settings) = prepare(&args.options)?;
    let summary = run_stages(
        classifier.as_ref(),
        &settings,
        Path::new(&args.dir),
        Path::new(&args.out_dir),
        args.base,
    )?;

    println!(
        "Pipeline complete: {} assets -> {} blocks -> {} numbered",
        summary.assets, summary.blocks, summary.numbered
    );
    Ok(())
}

/// Run every stage against `dir`, writing artifacts under `out_dir`.
///
/// Reserved blocks are purged from the mapping before extraction, so the
/// numbered IDs come out contiguous.
pub fn run_stages(
    classifier: &dyn Classifier,
    settings: &ClassificationConfig,
    dir: &Path,
    out_dir: &Path,
    base: u16,
) -> Result<PipelineSummary> {
    let assets_path = out_dir.join(scan::DEFAULT_OUTPUT);
    let mapping_path = out_dir.join(classify::DEFAULT_OUTPUT);
    let single_path = out_dir.join(extract::DEFAULT_OUTPUT);
    let config_path = out_dir.join(number::DEFAULT_OUTPUT);
    let header_path = out_dir.join(header::DEFAULT_OUTPUT);

    log::info!("Stage 1/6: scan {}", dir.display());
    write_asset_csv(&assets_path, &scan_directory(dir)?)?;

    log::info!("Stage 2/6: classify");
    let assets = read_asset_csv(&assets_path)?;
    let run = classify_listing(classifier, &assets, settings)?;
    run.mapping.save(&mapping_path)?;

    log::info!("Stage 3/6: purge reserved blocks");
    let mut mapping = BlockMapping::load(&mapping_path)?;
    let blocks = mapping.len();
    let reserved_removed = purge_reserved(&mut mapping);
    mapping.save(&mapping_path)?;

    log::info!("Stage 4/6: extract single-texture blocks");
    write_single_texture_csv(&single_path, &extract_single_texture(&mapping))?;

    log::info!("Stage 5/6: number blocks from {}", base);
    let rows = read_single_texture_csv(&single_path)?;
    assign_ids(&rows, base)?.save(&config_path)?;

    log::info!("Stage 6/6: render {}", header_path.display());
    let config = BlocksConfig::load(&config_path)?;
    write_header(&config, &header_path)?;

    print_samples(&config, DEFAULT_SAMPLE_SIZE)?;

    Ok(PipelineSummary {
        assets: assets.len(),
        blocks,
        reserved_removed,
        single_texture: rows.len(),
        numbered: config.blocks.len(),
    })
}
