//! Reference context built from local man pages
//!
//! keywords → command candidates → per-command excerpts → one text block
//! capped at [`MAX_REFERENCE_CHARACTERS`]. Every documentation failure in
//! here is recovered; the worst outcome is an empty reference.

use crate::docs::DocumentationSource;
use crate::utils::error::{ClaiError, ClaiResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub mod candidates;
pub mod keywords;
pub mod sections;

pub use candidates::{select_command_candidates, CommandCandidate, Provenance};
pub use keywords::extract_keywords;
pub use sections::{fallback_excerpt, is_section_header, slice_man_sections};

pub const MAX_REFERENCE_COMMANDS: usize = 2;
pub const MAX_REFERENCE_CHARACTERS: usize = 2000;
pub const DOC_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared deadline and cancellation for all documentation lookups of one request
#[derive(Debug, Clone)]
pub struct LookupBudget {
    deadline: Instant,
    cancel: CancellationToken,
}

impl LookupBudget {
    pub fn new(timeout: Duration, cancel: CancellationToken) -> Self {
        Self {
            deadline: Instant::now() + timeout,
            cancel,
        }
    }

    /// Run `fut` against the budget.
    ///
    /// `Ok(None)` when the deadline passed first, `Err(Cancelled)` when the
    /// token fired. The future is dropped in both cases.
    pub async fn bound<F: Future>(&self, fut: F) -> ClaiResult<Option<F::Output>> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ClaiError::Cancelled),
            result = tokio::time::timeout_at(self.deadline, fut) => Ok(result.ok()),
        }
    }
}

/// Documentation excerpt for one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManExcerpt {
    pub command: String,
    pub text: String,
}

impl ManExcerpt {
    fn entry(&self) -> String {
        format!("COMMAND: {}\n{}", self.command, self.text)
    }
}

/// Render `name` and slice it down to at most about `budget` characters.
/// `None` when the page is missing, unrenderable, late or empty.
pub async fn fetch_man_excerpt<D>(
    docs: &D,
    name: &str,
    budget: usize,
    lookup: &LookupBudget,
) -> ClaiResult<Option<ManExcerpt>>
where
    D: DocumentationSource + ?Sized,
{
    let page = match lookup.bound(docs.render(name)).await? {
        Some(Ok(page)) => page,
        Some(Err(e)) => {
            debug!(command = %name, error = %e, "documentation unavailable");
            return Ok(None);
        }
        None => {
            debug!(command = %name, "documentation render missed the lookup deadline");
            return Ok(None);
        }
    };

    let text = slice_man_sections(&page, budget);
    if text.is_empty() {
        return Ok(None);
    }
    Ok(Some(ManExcerpt {
        command: name.to_string(),
        text,
    }))
}

/// Concatenate excerpts for `candidates` in order until the running total
/// reaches [`MAX_REFERENCE_CHARACTERS`]. The excerpt that crosses the limit
/// is kept whole and nothing is added after it.
pub async fn assemble_reference<D>(
    docs: &D,
    candidates: &[CommandCandidate],
    lookup: &LookupBudget,
) -> ClaiResult<String>
where
    D: DocumentationSource + ?Sized,
{
    let mut entries: Vec<String> = Vec::new();
    let mut total = 0usize;

    for candidate in candidates {
        let remaining = MAX_REFERENCE_CHARACTERS.saturating_sub(total);
        let Some(excerpt) = fetch_man_excerpt(docs, &candidate.name, remaining, lookup).await?
        else {
            continue;
        };

        let entry = excerpt.entry();
        total += entry.chars().count();
        entries.push(entry);
        if total >= MAX_REFERENCE_CHARACTERS {
            break;
        }
    }

    Ok(entries.join("\n\n").trim().to_string())
}

/// Full reference path for one task description. Empty when nothing
/// useful was found.
pub async fn build_reference<D>(
    docs: &D,
    input: &str,
    cancel: &CancellationToken,
) -> ClaiResult<String>
where
    D: DocumentationSource + ?Sized,
{
    let keywords = extract_keywords(input);
    if keywords.is_empty() {
        return Ok(String::new());
    }

    let lookup = LookupBudget::new(DOC_LOOKUP_TIMEOUT, cancel.clone());
    let candidates = select_command_candidates(docs, &keywords, &lookup).await?;
    if candidates.is_empty() {
        debug!("no documented commands matched the task");
        return Ok(String::new());
    }
    debug!(
        candidates = ?candidates.iter().map(|c| format!("{} ({})", c.name, c.provenance)).collect::<Vec<_>>(),
        "reference candidates"
    );

    assemble_reference(docs, &candidates, &lookup).await
}
