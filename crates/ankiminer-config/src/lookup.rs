use std::env;

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://localhost:5555".to_string()
}

/// Where the dictionary and corpus services live
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Base endpoint, service paths (`/jisho`, `/goo`, `/corpus`) are appended
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl LookupConfig {
    pub fn new() -> Self {
        let base_url = env::var("LOOKUP_BASE_URL").unwrap_or_else(|_| default_base_url());

        Self { base_url }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}
