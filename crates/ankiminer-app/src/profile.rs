use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use ankiminer_config::Config;
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Named settings stored as JSON
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Profile from `path`, or defaults from the environment without one
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::new());
    };

    tracing::info!("Loading profile {}", path.display());
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let profile: Profile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid profile {}", path.display()))?;

    tracing::info!("Using profile '{}'", profile.name);
    Ok(profile.value)
}

pub fn write_profile(path: &Path, name: &str, config: &Config) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let profile = Profile {
        name: name.into(),
        value: config.clone(),
    };
    fs::write(path, serde_json::to_string_pretty(&profile)?)?;
    tracing::info!("Wrote profile '{}' to {}", name, path.display());
    Ok(())
}
