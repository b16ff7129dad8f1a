use std::env;

use serde::{Deserialize, Serialize};

use self::anki::AnkiConfig;
use self::lookup::LookupConfig;
use self::storage::StorageConfig;

pub mod anki;
pub mod lookup;
pub mod storage;

fn default_channel_capacity() -> usize {
    64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lookup: LookupConfig,
    pub anki: AnkiConfig,
    pub storage: StorageConfig,

    /// Capacity of the command and output channels
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn new() -> Self {
        let channel_capacity = env::var("CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_channel_capacity);

        Config {
            lookup: LookupConfig::new(),
            anki: AnkiConfig::new(),
            storage: StorageConfig::new(),

            channel_capacity,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookup: LookupConfig::default(),
            anki: AnkiConfig::default(),
            storage: StorageConfig::default(),
            channel_capacity: default_channel_capacity(),
        }
    }
}
