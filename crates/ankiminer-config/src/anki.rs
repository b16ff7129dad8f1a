use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_url() -> String {
    "http://127.0.0.1:8765".to_string()
}

fn default_deck() -> String {
    "3. Japanese::3. Vocab".to_string()
}

fn default_model() -> String {
    "ankiminer_jp".to_string()
}

fn default_tags() -> Vec<String> {
    ["ankiminer", "japanese", "mined", "native"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnkiConfig {
    /// Enable Anki integration
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// AnkiConnect URL
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_deck")]
    pub deck: String,
    /// Note type, must have the ankiminer fields
    #[serde(default = "default_model")]
    pub model: String,
    /// Tags put on every exported note
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,
}

impl AnkiConfig {
    pub fn new() -> Self {
        let url = env::var("ANKI_URL").unwrap_or_else(|_| default_url());

        Self {
            url,
            ..Self::default()
        }
    }
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            url: default_url(),
            deck: default_deck(),
            model: default_model(),
            tags: default_tags(),
        }
    }
}
