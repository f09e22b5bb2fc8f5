use crate::assets::ModelId;
use crate::generation::llamafile::DEFAULT_LAUNCHER;
use crate::generation::{SamplingConfig, GENERATION_TIMEOUT};
use crate::pipeline::SuggestOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "config.yml";
const CONFIG_FOLDER: &str = "config";
const APP_FOLDER: &str = "clai";
/// Overrides the whole data root, mainly for tests and portable installs
pub const HOME_ENV: &str = "CLAI_HOME";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: ModelId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_path: Option<PathBuf>,
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    #[serde(flatten)]
    pub sampling: SamplingConfig,
    pub timeout_secs: u64,
    pub launcher: PathBuf,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingConfig::default(),
            timeout_secs: GENERATION_TIMEOUT.as_secs(),
            launcher: PathBuf::from(DEFAULT_LAUNCHER),
        }
    }
}

impl GenerationConfig {
    pub fn suggest_options(&self) -> SuggestOptions {
        SuggestOptions {
            sampling: self.sampling.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// `$CLAI_HOME`, else `<data dir>/clai`
    pub fn data_root() -> Result<PathBuf> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(home));
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_FOLDER))
            .ok_or_else(|| anyhow::anyhow!("No data directory for this platform"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::data_root()?.join(CONFIG_FOLDER).join(CONFIG_FILE_NAME))
    }

    /// Missing file means defaults; a broken file is an error
    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            return Self::load_from_file(&config_path);
        }
        Ok(Self::default())
    }

    pub fn save(&self) -> Result<()> {
        self.save_to_file(Self::config_path()?)
    }
}
