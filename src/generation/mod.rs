//! Grammar-constrained generation
//!
//! The pipeline hands a [`GenerationRequest`] to a [`GenerationEngine`] and
//! parses whatever comes back with [`parse_suggestions`].

use crate::utils::error::ClaiResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod grammar;
pub mod llamafile;
pub mod prompt;
pub mod response;

pub use grammar::COMMAND_GRAMMAR;
pub use llamafile::LlamafileEngine;
pub use prompt::build_prompt;
pub use response::{parse_suggestions, CommandSuggestion};

pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Decoding settings passed to the engine on every call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub temperature: f32,
    pub max_new_tokens: u32,
    pub context_window: u32,
    pub threads: u32,
    /// Layers to offload to the GPU; `None` leaves the engine default
    pub gpu_layers: Option<u32>,
    pub mlock: bool,
    /// Pass `--fast` to the engine
    pub fast: bool,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_new_tokens: 400,
            context_window: 2048,
            threads: 4,
            gpu_layers: Some(32),
            mlock: true,
            fast: true,
        }
    }
}

/// One call to the generation engine
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub grammar: String,
    pub sampling: SamplingConfig,
    /// Absolute limit measured from the start of the call
    pub timeout: Duration,
}

impl GenerationRequest {
    pub fn new(prompt: String, sampling: SamplingConfig, timeout: Duration) -> Self {
        Self {
            prompt,
            grammar: COMMAND_GRAMMAR.to_string(),
            sampling,
            timeout,
        }
    }
}

/// Something that turns a prompt into grammar-conforming text
#[async_trait]
pub trait GenerationEngine: Send + Sync {
    /// Returns the raw stdout of a successful run.
    ///
    /// Dropping the returned future must stop any work in flight.
    async fn generate(&self, request: &GenerationRequest) -> ClaiResult<String>;
}
