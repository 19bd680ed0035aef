//! Categorization prompt construction

use crate::config::ClassificationConfig;
use crate::provider::ClassifyRequest;
use blockgen_core::Face;
use blockgen_scan::AssetRecord;

/// System instruction sent with every batch
pub const SYSTEM_INSTRUCTION: &str =
    "You are a helpful assistant that organizes Minecraft texture files into structured JSON format.";

/// Build the user prompt listing `filenames` verbatim, comma-joined
pub fn build_prompt(filenames: &[String]) -> String {
    let faces = Face::ALL
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"
You are organizing Minecraft block texture files. I need you to categorize these {count} texture filenames into a JSON structure.

Return the data as a flat object where each key is a unique block identifier and each value is a block object like this:

{{
    "acacia_door": {{
        "block_name": "Acacia Door",
        "textures": {{
            "top": "acacia_door_top.png",
            "bottom": "acacia_door_bottom.png"
        }}
    }},
    "acacia_log": {{
        "block_name": "Acacia Log",
        "textures": {{
            "sides": "acacia_log.png",
            "top": "acacia_log_top.png"
        }}
    }}
}}

Texture types to use: {faces}

Rules:
1. Group related textures by block type
2. Use descriptive block names (e.g., "Acacia Door" not "acacia_door")
3. Use snake_case for the object keys
4. Only include texture properties that actually apply to each file
5. If a texture doesn't clearly fit a face type, use "other"
6. Return ONLY valid JSON, no other text

Files to categorize:
{files}
"#,
        count = filenames.len(),
        files = filenames.join(", "),
    )
}

/// Assemble the full request for one batch of assets
pub fn build_request(assets: &[AssetRecord], settings: &ClassificationConfig) -> ClassifyRequest {
    let filenames: Vec<String> = assets.iter().map(|a| a.filename.clone()).collect();

    ClassifyRequest {
        model: settings.model.clone(),
        system: SYSTEM_INSTRUCTION.to_string(),
        prompt: build_prompt(&filenames),
        temperature: settings.temperature,
        max_tokens: settings.max_tokens,
        filenames,
    }
}
