//! Mock classifier for offline runs
//!
//! Groups filenames by stem and maps common face suffixes without any
//! network calls. Useful for exercising the pipeline end-to-end.

use crate::provider::{ClassifyRequest, Classifier};
use blockgen_core::{Face, Result, TextureRef};
use indexmap::IndexMap;
use serde_json::{json, Map, Value};

const FACE_SUFFIXES: [(&str, Face); 7] = [
    ("_top", Face::Top),
    ("_bottom", Face::Bottom),
    ("_side", Face::Sides),
    ("_front", Face::Front),
    ("_back", Face::Back),
    ("_left", Face::Left),
    ("_right", Face::Right),
];

/// A classifier that groups textures by filename heuristics
#[derive(Default)]
pub struct MockClassifier;

impl MockClassifier {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Default)]
struct Group {
    base: Vec<String>,
    faces: IndexMap<Face, Vec<String>>,
}

impl Classifier for MockClassifier {
    fn name(&self) -> &str {
        "mock"
    }

    fn classify(&self, request: &ClassifyRequest) -> Result<String> {
        let mut groups: IndexMap<String, Group> = IndexMap::new();

        for filename in &request.filenames {
            let stem = filename
                .rsplit_once('.')
                .map(|(stem, _)| stem)
                .unwrap_or(filename);

            match split_face_suffix(stem) {
                Some((block, face)) => groups
                    .entry(block.to_string())
                    .or_default()
                    .faces
                    .entry(face)
                    .or_default()
                    .push(filename.clone()),
                None => groups
                    .entry(stem.to_string())
                    .or_default()
                    .base
                    .push(filename.clone()),
            }
        }

        let mut blocks = Map::new();
        for (key, group) in groups {
            let textures = group_textures(group);
            blocks.insert(
                key.clone(),
                json!({
                    "block_name": display_name(&key),
                    "textures": textures,
                }),
            );
        }

        Ok(serde_json::to_string_pretty(&Value::Object(blocks))?)
    }
}

fn split_face_suffix(stem: &str) -> Option<(&str, Face)> {
    FACE_SUFFIXES.iter().find_map(|(suffix, face)| {
        stem.strip_suffix(suffix)
            .filter(|block| !block.is_empty())
            .map(|block| (block, *face))
    })
}

/// A lone base texture covers every face; next to face textures it is the sides
fn group_textures(group: Group) -> IndexMap<Face, TextureRef> {
    let mut textures = IndexMap::new();

    if group.faces.is_empty() {
        textures.insert(Face::All, texture_ref(group.base));
        return textures;
    }

    let mut faces = group.faces;
    if !group.base.is_empty() {
        let slot = if faces.contains_key(&Face::Sides) {
            Face::Other
        } else {
            Face::Sides
        };
        faces.entry(slot).or_default().extend(group.base);
    }

    for (face, files) in faces {
        textures.insert(face, texture_ref(files));
    }
    textures
}

fn texture_ref(mut files: Vec<String>) -> TextureRef {
    if files.len() == 1 {
        TextureRef::Single(files.remove(0))
    } else {
        TextureRef::Multiple(files)
    }
}

fn display_name(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
