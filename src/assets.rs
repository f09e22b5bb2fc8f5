//! Engine binary and model weight locations
//!
//! Resolution only: files are expected to be installed already. When one is
//! missing the error names the expected path and where to get it.

use crate::config::Config;
use crate::utils::error::ClaiError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ENGINE_FILENAME: &str = "llamafile";
pub const ENGINE_URL: &str =
    "https://github.com/Mozilla-Ocho/llamafile/releases/download/0.9.3/llamafile-0.9.3";

const BIN_FOLDER: &str = "bin";
const MODELS_FOLDER: &str = "models";

/// Selectable model weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModelId {
    #[default]
    #[serde(rename = "gemma-3-1b-it-q6.llamafile")]
    Gemma3_1B,
    #[serde(rename = "llama-3.2-3b-it-q6.llamafile")]
    Llama32_3B,
    #[serde(rename = "gemma-3-4b-it-q6.llamafile")]
    Gemma3_4B,
}

/// Catalog entry for a model
#[derive(Debug, Clone, Copy)]
pub struct ModelInfo {
    pub id: ModelId,
    pub description: &'static str,
    pub download_size: &'static str,
    pub url: &'static str,
}

pub static MODEL_CATALOG: [ModelInfo; 3] = [
    ModelInfo {
        id: ModelId::Gemma3_1B,
        description: "Gemma3 1B. low resource usage. low accuracy.",
        download_size: "1.32 GB",
        url: "https://huggingface.co/Mozilla/gemma-3-1b-it-llamafile/resolve/main/google_gemma-3-1b-it-Q6_K.llamafile?download=true",
    },
    ModelInfo {
        id: ModelId::Llama32_3B,
        description: "Llama 3.2 3B. moderate resource usage. better accuracy.",
        download_size: "2.62 GB",
        url: "https://huggingface.co/Mozilla/Llama-3.2-3B-Instruct-llamafile/resolve/main/Llama-3.2-3B-Instruct.Q6_K.llamafile",
    },
    ModelInfo {
        id: ModelId::Gemma3_4B,
        description: "Gemma3 4B. high resource usage. best accuracy.",
        download_size: "3.50 GB",
        url: "https://huggingface.co/Mozilla/gemma-3-4b-it-llamafile/resolve/main/google_gemma-3-4b-it-Q6_K.llamafile?download=true",
    },
];

impl ModelId {
    /// File name of the weights, also the id stored in the config file
    pub fn filename(self) -> &'static str {
        match self {
            ModelId::Gemma3_1B => "gemma-3-1b-it-q6.llamafile",
            ModelId::Llama32_3B => "llama-3.2-3b-it-q6.llamafile",
            ModelId::Gemma3_4B => "gemma-3-4b-it-q6.llamafile",
        }
    }

    pub fn info(self) -> &'static ModelInfo {
        MODEL_CATALOG
            .iter()
            .find(|info| info.id == self)
            .unwrap_or(&MODEL_CATALOG[0])
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filename())
    }
}

impl FromStr for ModelId {
    type Err = anyhow::Error;

    /// Accepts the full file name or the same without `.llamafile`
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().trim_end_matches(".llamafile");
        MODEL_CATALOG
            .iter()
            .map(|info| info.id)
            .find(|id| id.filename().trim_end_matches(".llamafile") == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = MODEL_CATALOG.iter().map(|i| i.id.filename()).collect();
                anyhow::anyhow!("Unknown model '{}'. Available: {}", s, known.join(", "))
            })
    }
}

/// What [`AssetStore::resolve`] can look up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Engine,
    Model(ModelId),
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Engine => write!(f, "generation engine"),
            AssetKind::Model(id) => write!(f, "model {}", id),
        }
    }
}

/// Local asset layout under the data root
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
    engine_override: Option<PathBuf>,
    model_override: Option<PathBuf>,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            engine_override: None,
            model_override: None,
        }
    }

    /// Store rooted at the data directory, honoring path overrides from `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let root = Config::data_root().context("Failed to locate data directory")?;
        Ok(Self {
            root,
            engine_override: config.engine_path.clone(),
            model_override: config.model_path.clone(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where `kind` is expected to live, whether or not it exists
    pub fn expected_path(&self, kind: AssetKind) -> PathBuf {
        match kind {
            AssetKind::Engine => self
                .engine_override
                .clone()
                .unwrap_or_else(|| self.root.join(BIN_FOLDER).join(ENGINE_FILENAME)),
            AssetKind::Model(id) => self
                .model_override
                .clone()
                .unwrap_or_else(|| self.root.join(MODELS_FOLDER).join(id.filename())),
        }
    }

    /// Local path of an installed asset
    pub fn resolve(&self, kind: AssetKind) -> Result<PathBuf> {
        let path = self.expected_path(kind);
        if path.is_file() {
            return Ok(path);
        }
        let url = match kind {
            AssetKind::Engine => ENGINE_URL,
            AssetKind::Model(id) => id.info().url,
        };
        Err(ClaiError::AssetMissing {
            kind: kind.to_string(),
            path,
        })
        .with_context(|| format!("Download it from {}", url))
    }
}
