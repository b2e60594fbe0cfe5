use anyhow::{anyhow, Context, Result};
use std::{fs, path::Path};

use crate::analysis::AnalysisConfig;
use crate::log_info;

const ENABLE_LOGS: bool = true;

/// Load analysis thresholds from a JSON file.
///
/// Missing keys keep their defaults, so a file may override just one
/// threshold. A missing path yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read analysis config from {}", path.display()))?;
    let config = parse_config(&contents)
        .with_context(|| format!("Invalid analysis config in {}", path.display()))?;

    log_info!("Loaded analysis config from {}", path.display());
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<AnalysisConfig> {
    let config: AnalysisConfig = serde_json::from_str(contents)?;
    config.validate().map_err(|reason| anyhow!(reason))?;
    Ok(config)
}

/// Write a config file, e.g. to give users a template with every threshold.
pub fn save_config(path: &Path, config: &AnalysisConfig) -> Result<()> {
    let serialized = serde_json::to_string_pretty(config)?;
    fs::write(path, serialized)
        .with_context(|| format!("Failed to write analysis config to {}", path.display()))
}
