//! Batch classification command

use anyhow::{Context, Result};
use blockgen_classify::providers::create_classifier;
use blockgen_classify::{classify_assets, BlockgenConfig, ClassificationConfig, Classifier, ClassifyRun, DispatchMode};
use blockgen_scan::{read_asset_csv, AssetRecord};
use std::path::Path;

pub const DEFAULT_OUTPUT: &str = "organized_block_assets.json";

/// Classification overrides shared by `classify` and `pipeline`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ClassifyOptions {
    /// Read settings from this TOML file instead of ~/.blockgen and .blockgen
    #[arg(long)]
    pub config_file: Option<String>,

    /// Classifier provider (openai, mock)
    #[arg(long)]
    pub provider: Option<String>,

    /// Model name sent to the provider
    #[arg(long)]
    pub model: Option<String>,

    /// Filenames per classifier call
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Dispatch mode (serial or parallel)
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<DispatchMode>,

    /// Worker threads in parallel mode
    #[arg(long)]
    pub workers: Option<usize>,

    /// Pause between calls in serial mode
    #[arg(long)]
    pub delay_secs: Option<u64>,
}

fn parse_mode(s: &str) -> Result<DispatchMode, String> {
    match s {
        "serial" => Ok(DispatchMode::Serial),
        "parallel" => Ok(DispatchMode::Parallel),
        _ => Err(format!("unknown mode '{}'; valid values: serial, parallel", s)),
    }
}

impl ClassifyOptions {
    fn apply(&self, settings: &mut ClassificationConfig) {
        if let Some(ref provider) = self.provider {
            settings.provider = provider.clone();
        }
        if let Some(ref model) = self.model {
            settings.model = model.clone();
        }
        if let Some(batch_size) = self.batch_size {
            settings.batch_size = batch_size;
        }
        if let Some(mode) = self.mode {
            settings.mode = mode;
        }
        if let Some(workers) = self.workers {
            settings.workers = workers;
        }
        if let Some(delay_secs) = self.delay_secs {
            settings.delay_secs = delay_secs;
        }
    }
}

/// Resolve settings and build the classifier.
///
/// Runs before any input is read so a missing credential stops the
/// command up front.
pub fn prepare(options: &ClassifyOptions) -> Result<(Box<dyn Classifier>, ClassificationConfig)> {
    let config = match options.config_file {
        Some(ref path) => BlockgenConfig::load_from_file(Path::new(path))
            .with_context(|| format!("Failed to load config {}", path))?,
        None => BlockgenConfig::load().context("Failed to load blockgen config")?,
    };
    let mut settings = config.classification.clone();
    options.apply(&mut settings);

    let classifier = create_classifier(&settings.provider, &config)?;
    Ok((classifier, settings))
}

/// Classify a listing and print the batch summary
pub fn classify_listing(
    classifier: &dyn Classifier,
    assets: &[AssetRecord],
    settings: &ClassificationConfig,
) -> Result<ClassifyRun> {
    let run = classify_assets(classifier, assets, settings)?;

    println!(
        "Classified {} assets via {}: {} blocks",
        assets.len(),
        classifier.name(),
        run.mapping.len()
    );
    println!(
        "  Batches: {} succeeded, {} failed",
        run.successful_batches, run.failed_batches
    );
    if run.skipped_records > 0 {
        println!("  Skipped {} malformed block entries", run.skipped_records);
    }

    if run.successful_batches == 0 && run.failed_batches > 0 {
        anyhow::bail!("Every classification batch failed; no blocks were organized");
    }
    Ok(run)
}

pub fn run(input: &str, output: &str, options: &ClassifyOptions) -> Result<()> {
    let (classifier, settings) = prepare(options)?;
    let assets = read_asset_csv(input)?;

    let run = classify_listing(classifier.as_ref(), &assets, &settings)?;
    run.mapping.save(output)?;
    println!("  Saved: {}", output);
    Ok(())
}
