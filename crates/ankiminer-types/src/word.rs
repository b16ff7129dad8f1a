use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of a word entry, generated once when the word is added
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(String);

impl WordId {
    /// Fresh random (v4) identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Example sentence from the corpus
///
/// `original` keeps the trimmed corpus text for the card source, `line` is the
/// working copy the user may edit. Fields the corpus sends that we do not model
/// are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub line: String,
    #[serde(default)]
    pub original: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Sentence {
    pub fn new(line: impl Into<String>, series: Option<String>) -> Self {
        let line = line.into();
        Self {
            original: line.clone(),
            line,
            series,
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentencesResult {
    pub results: Vec<Sentence>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub meaning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence: Option<Sentence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_english: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_japanese: Option<String>,
    /// Standalone vocab card instead of a sentence card
    #[serde(default)]
    pub vocab_card: bool,
}

/// A word being studied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    value: String,
    pub done: bool,
    pub meta: WordMeta,
}

impl Word {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            done: false,
            meta: WordMeta::default(),
        }
    }

    /// Surface form, fixed at creation
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Words keyed by id. Sorted by key, so iteration order is deterministic.
pub type WordCollection = BTreeMap<WordId, Word>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    #[serde(default)]
    pub words: WordCollection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_id: Option<WordId>,
}

impl Collection {
    pub fn selected(&self) -> Option<(&WordId, &Word)> {
        let id = self.selected_id.as_ref()?;
        self.words.get_key_value(id)
    }
}
