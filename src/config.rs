use serde::{Deserialize, Serialize};
use std::path::Path;
use anyhow::{Context, Result};

use crate::engine::SumCheck;

pub const DEFAULT_CONFIG_FILE: &str = "huffpress.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Name of the sum-check policy applied by `decode`.
    pub sum_check: String,
    pub log_filter: String,
    pub json_output: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            sum_check: SumCheck::default().to_string(),
            log_filter: "huffpress=info".to_string(),
            json_output: false,
        }
    }
}

impl CodecConfig {
    /// Reads the config file if present, otherwise falls back to defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let config_file = config_path.unwrap_or(DEFAULT_CONFIG_FILE);

        if Path::new(config_file).exists() {
            let content = std::fs::read_to_string(config_file)
                .with_context(|| format!("reading {}", config_file))?;
            Self::from_toml(&content).with_context(|| format!("parsing {}", config_file))
        } else if config_path.is_some() {
            anyhow::bail!("config file not found: {}", config_file)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: CodecConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn save(&self, config_path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        tracing::info!("Wrote config to {}", config_path);
        Ok(())
    }

    /// Parsed policy. Unknown names surface as `UnsupportedPolicy`.
    pub fn policy(&self) -> Result<SumCheck> {
        Ok(self.sum_check.parse::<SumCheck>()?)
    }
}
