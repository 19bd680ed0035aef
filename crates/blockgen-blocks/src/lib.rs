//! blockgen blocks - derived block artifacts
//!
//! Turns a canonical `BlockMapping` into the downstream artifacts:
//! - `all_texture_blocks.csv` - blocks whose only face is `all`
//! - `blocks_config.json` - those blocks numbered from a base ID
//! - `BlockTypes.h` - the numbered blocks as a C++ enum
//!
//! plus the reserved-key purge and a sampler for spot checks.

pub mod extract;
pub mod header;
pub mod numbering;
pub mod purge;
pub mod sample;

pub use extract::{extract_single_texture, read_single_texture_csv, write_single_texture_csv, SingleTextureRow};
pub use header::{constant_name, render_block_enum, CORE_BLOCKS};
pub use numbering::{assign_ids, id_range, BlocksConfig, BlocksMetadata, NumberedBlock, DEFAULT_BASE_ID};
pub use purge::{purge_reserved, PurgePolicy};
pub use sample::{sample_blocks, SampleBlock, DEFAULT_SAMPLE_SIZE};
