//! Local command documentation
//!
//! The pipeline only talks to documentation through [`DocumentationSource`],
//! so tests can substitute an in-memory source for the system man pages.

use crate::utils::error::DocError;
use async_trait::async_trait;

pub mod man;

pub use man::ManPages;

/// Read access to installed command documentation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentationSource: Send + Sync {
    /// Whether a documentation entry exists for `name`
    async fn exists(&self, name: &str) -> bool;

    /// Render the entry for `name` as plain text
    async fn render(&self, name: &str) -> Result<String, DocError>;

    /// Keyword search over documentation summaries, at most `limit` names.
    /// "Nothing appropriate" is an empty list, not an error.
    async fn search(&self, keyword: &str, limit: usize) -> Result<Vec<String>, DocError>;
}
