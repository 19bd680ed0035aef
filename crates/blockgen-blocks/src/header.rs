//! C++ `BlockType` enum rendering

use crate::numbering::BlocksConfig;

/// Core blocks that always lead the enum
pub const CORE_BLOCKS: [(&str, u16); 4] = [("AIR", 0), ("STONE", 1), ("DIRT", 2), ("GRASS", 3)];

const PREAMBLE: &str = "#pragma once\n\n#include <cstdint>\n\n";

/// Upper-case a block key and turn hyphens into underscores
pub fn constant_name(key: &str) -> String {
    key.to_uppercase().replace('-', "_")
}

/// Render the header text for a numbered config.
///
/// Generated constants are ordered by ID; blocks sharing an ID keep their
/// config order.
pub fn render_block_enum(config: &BlocksConfig) -> String {
    let mut entries: Vec<(String, u16)> = config
        .blocks
        .iter()
        .map(|(key, block)| (constant_name(key), block.block_type))
        .collect();
    entries.sort_by_key(|(_, id)| *id);

    let mut lines = vec![
        "enum class BlockType : uint16_t {".to_string(),
        "    // Core blocks (unchanged for compatibility)".to_string(),
    ];
    lines.extend(
        CORE_BLOCKS
            .iter()
            .map(|(name, id)| format!("    {} = {},", name, id)),
    );
    lines.push(String::new());
    lines.push("    // Generated blocks from CSV".to_string());
    lines.extend(entries.iter().map(|(name, id)| format!("    {} = {},", name, id)));
    lines.push("};".to_string());

    format!("{}{}\n", PREAMBLE, lines.join("\n"))
}
