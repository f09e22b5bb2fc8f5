//! Task text in, ordered command suggestions out
//!
//! [`suggest`] holds no state of its own; everything it touches belongs to
//! the one request and both capabilities are passed in.

use crate::docs::DocumentationSource;
use crate::generation::{
    build_prompt, parse_suggestions, CommandSuggestion, GenerationEngine, GenerationRequest,
    SamplingConfig, GENERATION_TIMEOUT,
};
use crate::reference::build_reference;
use crate::utils::error::{ClaiError, ClaiResult};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Per-request generation settings
#[derive(Debug, Clone)]
pub struct SuggestOptions {
    pub sampling: SamplingConfig,
    pub timeout: Duration,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        Self {
            sampling: SamplingConfig::default(),
            timeout: GENERATION_TIMEOUT,
        }
    }
}

/// Build the prompt for `input`, grounded in whatever documentation `docs`
/// can provide. Documentation problems only shrink the reference block.
pub async fn prepare_prompt<D>(
    input: &str,
    docs: &D,
    cancel: &CancellationToken,
) -> ClaiResult<String>
where
    D: DocumentationSource + ?Sized,
{
    let reference = build_reference(docs, input, cancel).await?;
    debug!(reference_chars = reference.chars().count(), "reference context assembled");
    Ok(build_prompt(input, &reference))
}

/// Run the whole pipeline for one task description.
///
/// Fatal outcomes are generation timeout, engine failure, malformed output
/// and cancellation. On any of them no suggestions are returned.
pub async fn suggest<D, E>(
    input: &str,
    docs: &D,
    engine: &E,
    options: &SuggestOptions,
    cancel: &CancellationToken,
) -> ClaiResult<Vec<CommandSuggestion>>
where
    D: DocumentationSource + ?Sized,
    E: GenerationEngine + ?Sized,
{
    let prompt = prepare_prompt(input, docs, cancel).await?;
    generate_suggestions(prompt, engine, options, cancel).await
}

/// Generate and parse for an already assembled prompt
pub async fn generate_suggestions<E>(
    prompt: String,
    engine: &E,
    options: &SuggestOptions,
    cancel: &CancellationToken,
) -> ClaiResult<Vec<CommandSuggestion>>
where
    E: GenerationEngine + ?Sized,
{
    let request = GenerationRequest::new(prompt, options.sampling.clone(), options.timeout);

    let raw = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(ClaiError::Cancelled),
        result = engine.generate(&request) => result?,
    };

    let suggestions = parse_suggestions(&raw)?;
    debug!(count = suggestions.len(), "parsed command suggestions");
    Ok(suggestions)
}
