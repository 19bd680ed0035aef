//! blockgen core - shared model and utilities for the block pipeline
//!
//! This crate provides the types every stage depends on:
//! - `BlockRecord`, `BlockMapping` - canonical block records keyed by snake_case key
//! - `Face`, `TextureRef` - per-face texture references
//! - Whole-file JSON/CSV helpers
//! - Error types and Result alias

mod error;
pub mod io;
mod types;

pub use error::{BlockgenError, Result};
pub use types::{normalize_key, BlockMapping, BlockRecord, Face, TextureRef, Textures};

/// Block keys that are built into the engine and never generated
pub const RESERVED_KEYS: [&str; 4] = ["stone", "dirt", "grass", "air"];
