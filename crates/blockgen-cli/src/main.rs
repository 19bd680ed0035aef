//! blockgen CLI - Minecraft block texture pipeline
//!
//! Each subcommand runs one stage and exchanges whole files with the next;
//! `pipeline` runs them all in order.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{classify, extract, header, number, pipeline, purge, sample, scan};

#[derive(Parser)]
#[command(name = "blockgen")]
#[command(about = "Turn block texture folders into numbered block configs and a C++ enum", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every texture file under a directory
    Scan {
        /// Directory to scan
        #[arg(long, default_value = "assets/block")]
        dir: String,

        /// Output CSV path
        #[arg(short, long, default_value = scan::DEFAULT_OUTPUT)]
        output: String,
    },

    /// Group texture files into blocks using a classifier
    Classify {
        /// Asset listing CSV
        #[arg(short, long, default_value = scan::DEFAULT_OUTPUT)]
        input: String,

        /// Output mapping JSON
        #[arg(short, long, default_value = classify::DEFAULT_OUTPUT)]
        output: String,

        #[command(flatten)]
        options: classify::ClassifyOptions,
    },

    /// Extract blocks that use one texture on every face
    Extract {
        /// Block mapping JSON
        #[arg(short, long, default_value = classify::DEFAULT_OUTPUT)]
        input: String,

        /// Output CSV path
        #[arg(short, long, default_value = extract::DEFAULT_OUTPUT)]
        output: String,
    },

    /// Assign sequential block IDs
    Number {
        /// Single-texture CSV
        #[arg(short, long, default_value = extract::DEFAULT_OUTPUT)]
        input: String,

        /// Output blocks config JSON
        #[arg(short, long, default_value = number::DEFAULT_OUTPUT)]
        output: String,

        /// First assigned ID
        #[arg(long, default_value_t = blockgen_blocks::DEFAULT_BASE_ID)]
        base: u16,
    },

    /// Remove the reserved core blocks (stone, dirt, grass, air)
    Purge {
        /// Blocks config JSON, rewritten in place
        #[arg(long, default_value = number::DEFAULT_OUTPUT)]
        config: String,

        /// Purge a block mapping JSON instead of a blocks config
        #[arg(long, conflicts_with = "renumber")]
        mapping: Option<String>,

        /// Reassign contiguous IDs after removal
        #[arg(long)]
        renumber: bool,

        /// First ID when renumbering
        #[arg(long, default_value_t = blockgen_blocks::DEFAULT_BASE_ID)]
        base: u16,
    },

    /// Render the BlockType enum header
    Header {
        /// Blocks config JSON
        #[arg(long, default_value = number::DEFAULT_OUTPUT)]
        config: String,

        /// Output header path
        #[arg(short, long, default_value = header::DEFAULT_OUTPUT)]
        output: String,
    },

    /// Print the first few numbered blocks
    Sample {
        /// Blocks config JSON
        #[arg(long, default_value = number::DEFAULT_OUTPUT)]
        config: String,

        /// Number of blocks to show
        #[arg(long, default_value_t = blockgen_blocks::DEFAULT_SAMPLE_SIZE)]
        count: usize,
    },

    /// Run every stage from scan to header
    Pipeline {
        /// Directory to scan
        #[arg(long, default_value = "assets/block")]
        dir: String,

        /// Directory for intermediate and final artifacts
        #[arg(long, default_value = ".")]
        out_dir: String,

        /// First assigned ID
        #[arg(long, default_value_t = blockgen_blocks::DEFAULT_BASE_ID)]
        base: u16,

        #[command(flatten)]
        options: classify::ClassifyOptions,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { dir, output } => scan::run(&dir, &output),
        Commands::Classify {
            input,
            output,
            options,
        } => classify::run(&input, &output, &options),
        Commands::Extract { input, output } => extract::run(&input, &output),
        Commands::Number {
            input,
            output,
            base,
        } => number::run(&input, &output, base),
        Commands::Purge {
            config,
            mapping,
            renumber,
            base,
        } => match mapping {
            Some(mapping) => purge::run_mapping(&mapping),
            None => purge::run(&config, renumber, base),
        },
        Commands::Header { config, output } => header::run(&config, &output),
        Commands::Sample { config, count } => sample::run(&config, count),
        Commands::Pipeline {
            dir,
            out_dir,
            base,
            options,
        } => pipeline::run(pipeline::PipelineArgs {
            dir,
            out_dir,
            base,
            options,
        }),
    }
}
