// Library exports for CLAI components

pub mod assets;
pub mod config;
pub mod docs;
pub mod generation;
pub mod output;
pub mod pipeline;
pub mod reference;
pub mod utils;

pub use assets::{AssetKind, AssetStore, ModelId};
pub use config::Config;
pub use docs::{DocumentationSource, ManPages};
pub use generation::{CommandSuggestion, GenerationEngine, GenerationRequest, LlamafileEngine, SamplingConfig};
pub use output::OutputHandler;
pub use pipeline::{suggest, SuggestOptions};
pub use utils::error::{ClaiError, ClaiResult, DocError};
