//! CLI command implementations

pub mod classify;
pub mod extract;
pub mod header;
pub mod number;
pub mod pipeline;
pub mod purge;
pub mod sample;
pub mod scan;
