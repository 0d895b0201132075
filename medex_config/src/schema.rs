use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

// Shared with the extraction and provider crates
use medex_core::{DateConfig, NerConfig};

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub ner: NerConfig,
    #[serde(default)]
    pub dates: DateConfig,
    /// JSON keyword definitions replacing the built-in inventory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords_path: Option<PathBuf>,
}

const CONFIG_TEMPLATE: &str = r#"{
  "ner": {
    "backend": "none",
    "host": "localhost",
    "port": 8080,
    "url": "http://localhost:9000",
    "timeout_secs": 10,
    "retry_delays_ms": [200, 500]
  },
  "dates": {
    "century_pivot": 69,
    "unknown_day": 15
  }
}
"#;

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("medex"))
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load `path`, or `~/medex/config.json` when no path is given.
    ///
    /// A missing default file means built-in settings; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("Config file not found at: {}", path.display());
            }
            return Self::from_file(path);
        }

        let default_path = Self::default_path()?;
        if !default_path.exists() {
            info!(
                "No config at {}, using defaults. Run 'medex init' to create one.",
                default_path.display()
            );
            return Ok(Self::default());
        }
        Self::from_file(&default_path)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_path = Self::ensure_config_dir()?.join("config.json");
        Self::write_template(&config_path)?;

        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Next steps:");
        println!("   1. Set ner.backend to \"socket\" or \"core_nlp\" if a tagger is running");
        println!("   2. Optionally point keywords_path at a JSON keyword file");
        println!("   3. Run 'medex extract report.txt'");
        println!();
        Ok(())
    }

    /// Write the template to `path`, refusing to overwrite.
    pub fn write_template(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }
        std::fs::write(path, CONFIG_TEMPLATE)?;
        Ok(())
    }
}
