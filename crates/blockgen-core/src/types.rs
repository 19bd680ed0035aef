//! Block record model shared by every pipeline stage

use crate::error::{BlockgenError, Result};
use crate::io;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A texture-mapping position on a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
    Sides,
    Top,
    Bottom,
    All,
    Other,
}

impl Face {
    /// Every recognized face, in the order they are listed to the classifier
    pub const ALL: [Face; 9] = [
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
        Face::Sides,
        Face::Top,
        Face::Bottom,
        Face::All,
        Face::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Face::Front => "front",
            Face::Back => "back",
            Face::Left => "left",
            Face::Right => "right",
            Face::Sides => "sides",
            Face::Top => "top",
            Face::Bottom => "bottom",
            Face::All => "all",
            Face::Other => "other",
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A face's texture: one filename or several variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextureRef {
    Single(String),
    Multiple(Vec<String>),
}

impl TextureRef {
    /// All filenames referenced by this entry
    pub fn files(&self) -> Vec<&str> {
        match self {
            TextureRef::Single(file) => vec![file.as_str()],
            TextureRef::Multiple(files) => files.iter().map(|f| f.as_str()).collect(),
        }
    }

    /// Single-cell rendering used by the CSV artifacts
    pub fn joined(&self) -> String {
        self.files().join(", ")
    }
}

impl From<&str> for TextureRef {
    fn from(file: &str) -> Self {
        TextureRef::Single(file.to_string())
    }
}

/// Face-name to texture mapping, in the order the classifier produced it
pub type Textures = IndexMap<Face, TextureRef>;

/// Canonical description of one block: display name plus per-face textures.
///
/// The block key is not stored here; it is the key under which the record
/// lives in a [`BlockMapping`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub block_name: String,
    pub textures: Textures,
}

impl BlockRecord {
    pub fn new(block_name: impl Into<String>, textures: Textures) -> Self {
        Self {
            block_name: block_name.into(),
            textures,
        }
    }

    /// Decode a record from untrusted JSON.
    ///
    /// Rejects entries without a name, without any texture, with an
    /// unrecognized face, or with non-string texture values.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let record: BlockRecord = serde_json::from_value(value)
            .map_err(|e| BlockgenError::MalformedRecord(e.to_string()))?;

        if record.block_name.trim().is_empty() {
            return Err(BlockgenError::MalformedRecord(
                "block_name is empty".to_string(),
            ));
        }
        if record.textures.is_empty() {
            return Err(BlockgenError::MalformedRecord(format!(
                "'{}' has no textures",
                record.block_name
            )));
        }

        Ok(record)
    }

    /// True when the only face entry is `all`
    pub fn is_single_texture(&self) -> bool {
        self.textures.len() == 1 && self.textures.contains_key(&Face::All)
    }
}

/// Normalize a raw identifier into a snake_case block key
pub fn normalize_key(raw: &str) -> String {
    raw.trim().replace([' ', '-'], "_").to_lowercase()
}

/// Insertion-ordered mapping from block key to block record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BlockMapping {
    blocks: IndexMap<String, BlockRecord>,
}

impl BlockMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from raw JSON entries, skipping malformed ones.
    ///
    /// Returns the mapping and the number of entries skipped.
    pub fn from_values<I>(entries: I) -> (Self, usize)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        let mut mapping = Self::new();
        let mut skipped = 0;

        for (key, value) in entries {
            match BlockRecord::from_value(value) {
                Ok(record) => {
                    mapping.insert(&key, record);
                }
                Err(e) => {
                    log::warn!("Skipping block '{}': {}", key, e);
                    skipped += 1;
                }
            }
        }

        (mapping, skipped)
    }

    /// Load a mapping JSON file, skipping entries that are not block records
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let entries: IndexMap<String, serde_json::Value> = io::read_json(path)?;
        let (mapping, skipped) = Self::from_values(entries);
        if skipped > 0 {
            log::warn!("{}: skipped {} malformed blocks", path.display(), skipped);
        }
        Ok(mapping)
    }

    /// Save as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        io::write_json_pretty(path, self)
    }

    /// Insert under the normalized key, replacing any existing record.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: &str, record: BlockRecord) -> Option<BlockRecord> {
        self.blocks.insert(normalize_key(key), record)
    }

    /// Fold another mapping into this one; entries in `other` win on collision
    pub fn merge(&mut self, other: BlockMapping) {
        for (key, record) in other.blocks {
            self.blocks.insert(key, record);
        }
    }

    pub fn get(&self, key: &str) -> Option<&BlockRecord> {
        self.blocks.get(key)
    }

    /// Remove a record, preserving the order of the remaining ones
    pub fn remove(&mut self, key: &str) -> Option<BlockRecord> {
        self.blocks.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.blocks.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BlockRecord)> {
        self.blocks.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(name: &str, faces: &[(Face, &str)]) -> BlockRecord {
        let textures = faces.iter().map(|(f, t)| (*f, TextureRef::from(*t))).collect();
        BlockRecord::new(name, textures)
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  Acacia Log "), "acacia_log");
        assert_eq!(normalize_key("Jack-o-Lantern"), "jack_o_lantern");
        assert_eq!(normalize_key("stone"), "stone");
    }

    #[test]
    fn test_record_from_value() {
        let value = json!({
            "block_name": "Acacia Log",
            "textures": {"sides": "acacia_log.png", "top": "acacia_log_top.png"}
        });
        let rec = BlockRecord::from_value(value).unwrap();
        assert_eq!(rec.block_name, "Acacia Log");
        assert_eq!(rec.textures.len(), 2);
        assert!(!rec.is_single_texture());
    }

    #[test]
    fn test_record_with_texture_list() {
        let value = json!({
            "block_name": "Redstone Lamp",
            "textures": {"other": ["redstone_lamp.png", "redstone_lamp_on.png"]}
        });
        let rec = BlockRecord::from_value(value).unwrap();
        let other = rec.textures.get(&Face::Other).unwrap();
        assert_eq!(other.files(), vec!["redstone_lamp.png", "redstone_lamp_on.png"]);
        assert_eq!(other.joined(), "redstone_lamp.png, redstone_lamp_on.png");
    }

    #[test]
    fn test_record_rejects_malformed() {
        assert!(BlockRecord::from_value(json!({"textures": {"all": "a.png"}})).is_err());
        assert!(BlockRecord::from_value(json!({"block_name": "A", "textures": {}})).is_err());
        assert!(
            BlockRecord::from_value(json!({"block_name": "A", "textures": {"inside": "a.png"}}))
                .is_err()
        );
        assert!(BlockRecord::from_value(json!({"block_name": "A", "textures": {"all": 3}})).is_err());
        assert!(BlockRecord::from_value(json!("stone.png")).is_err());
    }

    #[test]
    fn test_single_texture() {
        assert!(record("Stone", &[(Face::All, "stone.png")]).is_single_texture());
        assert!(!record("Log", &[(Face::Top, "log_top.png")]).is_single_texture());
        assert!(!record(
            "Grass",
            &[(Face::All, "grass.png"), (Face::Top, "grass_top.png")]
        )
        .is_single_texture());
    }

    #[test]
    fn test_merge_last_write_wins_keeps_position() {
        let mut base = BlockMapping::new();
        base.insert("torch", record("Torch", &[(Face::All, "torch.png")]));
        base.insert("stone", record("Stone", &[(Face::All, "stone.png")]));

        let mut later = BlockMapping::new();
        later.insert("torch", record("Torch", &[(Face::Other, "torch_on.png")]));
        base.merge(later);

        assert_eq!(base.len(), 2);
        assert_eq!(base.keys().collect::<Vec<_>>(), vec!["torch", "stone"]);
        let torch = base.get("torch").unwrap();
        assert!(torch.textures.contains_key(&Face::Other));
        assert!(!torch.textures.contains_key(&Face::All));
    }

    #[test]
    fn test_from_values_skips_malformed() {
        let entries = vec![
            ("Stone".to_string(), json!({"block_name": "Stone", "textures": {"all": "stone.png"}})),
            ("broken".to_string(), json!({"textures": {"all": "x.png"}})),
        ];
        let (mapping, skipped) = BlockMapping::from_values(entries);
        assert_eq!(mapping.len(), 1);
        assert_eq!(skipped, 1);
        assert!(mapping.contains_key("stone"));
    }

    #[test]
    fn test_load_save() {
        let dir = std::env::temp_dir().join(format!("blockgen_types_test_{}", uuid::Uuid::new_v4()));
        let path = dir.join("organized_block_assets.json");

        let mut mapping = BlockMapping::new();
        mapping.insert("oak_log", record("Oak Log", &[(Face::Top, "oak_log_top.png"), (Face::Sides, "oak_log.png")]));
        mapping.insert("dirt", record("Dirt", &[(Face::All, "dirt.png")]));
        mapping.save(&path).unwrap();

        let loaded = BlockMapping::load(&path).unwrap();
        assert_eq!(loaded.keys().collect::<Vec<_>>(), vec!["oak_log", "dirt"]);
        let faces: Vec<Face> = loaded.get("oak_log").unwrap().textures.keys().copied().collect();
        assert_eq!(faces, vec![Face::Top, Face::Sides]);

        std::fs::write(&path, r#"{"dirt": {"block_name": "Dirt", "textures": {"all": "dirt.png"}}, "note": "hand edited"}"#).unwrap();
        let loaded = BlockMapping::load(&path).unwrap();
        assert_eq!(loaded.len(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_normalizes_hand_edited_keys() {
        let dir = std::env::temp_dir().join(format!("blockgen_types_test_{}", uuid::Uuid::new_v4()));
        let path = dir.join("organized_block_assets.json");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            &path,
            r#"{"Jack-o Lantern": {"block_name": "Jack o'Lantern", "textures": {"front": "jack_o_lantern.png"}},
                "sand": {"block_name": "Sand", "textures": {}}}"#,
        )
        .unwrap();

        let loaded = BlockMapping::load(&path).unwrap();
        assert_eq!(loaded.keys().collect::<Vec<_>>(), vec!["jack_o_lantern"]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_mapping_json_shape() {
        let mut mapping = BlockMapping::new();
        mapping.insert("acacia_log", record("Acacia Log", &[(Face::Sides, "acacia_log.png")]));
        let json = serde_json::to_value(&mapping).unwrap();
        assert_eq!(
            json,
            json!({"acacia_log": {"block_name": "Acacia Log", "textures": {"sides": "acacia_log.png"}}})
        );
    }
}
