//! Classifier response parsing
//!
//! Classifiers answer in one of three shapes: a flat object keyed by block
//! key, a list of block objects, or a wrapper object whose `blocks` field
//! holds either of those. [`ResponseShape`] names every accepted shape and
//! [`ResponseShape::normalize`] turns any of them into a [`BlockMapping`].

use blockgen_core::{normalize_key, BlockMapping, BlockRecord, BlockgenError, Result};
use serde_json::{Map, Value};

/// A decoded response, before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// `{ "acacia_log": { "block_name": ..., "textures": ... }, ... }`
    Flat(Map<String, Value>),
    /// `[ { "block_name": ..., "textures": ... }, ... ]`
    List(Vec<Value>),
    /// `{ "blocks": <flat or list> }`; `ignored` names any other top-level keys
    Wrapped {
        inner: Box<ResponseShape>,
        ignored: Vec<String>,
    },
}

/// A normalized batch result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedBatch {
    pub mapping: BlockMapping,
    /// Entries dropped as malformed records
    pub skipped: usize,
}

impl ResponseShape {
    /// Classify a decoded JSON document into one of the accepted shapes
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(ResponseShape::List(items)),
            Value::Object(mut map) => match take_wrapped(&mut map) {
                Some(inner) => Ok(ResponseShape::Wrapped {
                    inner: Box::new(inner),
                    ignored: map.keys().cloned().collect(),
                }),
                None => Ok(ResponseShape::Flat(map)),
            },
            other => Err(BlockgenError::ClassificationParseError(format!(
                "expected a JSON object or array, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Flatten into a block mapping, skipping malformed entries
    pub fn normalize(self) -> ParsedBatch {
        match self {
            ResponseShape::Flat(map) => {
                let (mapping, skipped) = BlockMapping::from_values(map);
                ParsedBatch { mapping, skipped }
            }
            ResponseShape::List(items) => {
                let mut mapping = BlockMapping::new();
                let mut skipped = 0;
                for item in items {
                    match BlockRecord::from_value(item) {
                        Ok(record) => {
                            let key = normalize_key(&record.block_name);
                            mapping.insert(&key, record);
                        }
                        Err(e) => {
                            log::warn!("Skipping list entry: {}", e);
                            skipped += 1;
                        }
                    }
                }
                ParsedBatch { mapping, skipped }
            }
            ResponseShape::Wrapped { inner, ignored } => {
                let mut parsed = inner.normalize();
                if !ignored.is_empty() {
                    log::warn!("Ignoring keys beside the blocks wrapper: {}", ignored.join(", "));
                    parsed.skipped += ignored.len();
                }
                parsed
            }
        }
    }
}

/// A `blocks` field makes an object a wrapper, unless that field is itself
/// a block entry (a block whose key happens to be "blocks").
fn take_wrapped(map: &mut Map<String, Value>) -> Option<ResponseShape> {
    let is_wrapper = match map.get("blocks") {
        Some(Value::Array(_)) => true,
        Some(Value::Object(inner)) => !inner.contains_key("block_name"),
        _ => false,
    };
    if !is_wrapper {
        return None;
    }

    match map.remove("blocks")? {
        Value::Array(items) => Some(ResponseShape::List(items)),
        Value::Object(blocks) => Some(ResponseShape::Flat(blocks)),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Remove optional Markdown code-fence markers around a response
pub fn strip_code_fences(raw: &str) -> &str {
    let mut content = raw.trim();
    if let Some(rest) = content.strip_prefix("```json") {
        content = rest;
    } else if let Some(rest) = content.strip_prefix("```") {
        content = rest;
    }
    if let Some(rest) = content.strip_suffix("```") {
        content = rest;
    }
    content.trim()
}

/// Parse raw classifier output into a normalized batch result
pub fn parse_response(raw: &str) -> Result<ParsedBatch> {
    let content = strip_code_fences(raw);
    let value: Value = serde_json::from_str(content)
        .map_err(|e| BlockgenError::ClassificationParseError(e.to_string()))?;
    Ok(ResponseShape::from_value(value)?.normalize())
}
