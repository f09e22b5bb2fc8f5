use super::{LookupBudget, MAX_REFERENCE_COMMANDS};
use crate::docs::DocumentationSource;
use crate::utils::error::ClaiResult;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

const MAX_COMMAND_NAME_LEN: usize = 32;

/// How a candidate was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// The keyword itself has a documentation entry
    DirectMatch,
    /// Returned by a summary search for a keyword
    SearchMatch,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::DirectMatch => write!(f, "direct"),
            Provenance::SearchMatch => write!(f, "search"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCandidate {
    pub name: String,
    pub provenance: Provenance,
}

impl CommandCandidate {
    fn new(name: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            name: name.into(),
            provenance,
        }
    }
}

pub fn is_likely_command(token: &str) -> bool {
    let len = token.chars().count();
    len > 0 && len <= MAX_COMMAND_NAME_LEN && !token.chars().any(char::is_whitespace)
}

/// Narrow keywords down to at most [`MAX_REFERENCE_COMMANDS`] command names.
///
/// Keywords with their own documentation entry win; remaining slots are
/// filled from summary searches, in keyword order. Lookups that fail or miss
/// the budget deadline are skipped. Only cancellation is an error.
pub async fn select_command_candidates<D>(
    docs: &D,
    keywords: &[String],
    budget: &LookupBudget,
) -> ClaiResult<Vec<CommandCandidate>>
where
    D: DocumentationSource + ?Sized,
{
    let mut candidates: Vec<CommandCandidate> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for token in keywords {
        if candidates.len() >= MAX_REFERENCE_COMMANDS {
            break;
        }
        if !is_likely_command(token) || seen.contains(token) {
            continue;
        }
        if budget.bound(docs.exists(token)).await?.unwrap_or(false) {
            debug!(command = %token, "documentation entry found for keyword");
            seen.insert(token.clone());
            candidates.push(CommandCandidate::new(token.as_str(), Provenance::DirectMatch));
        }
    }

    for token in keywords {
        if candidates.len() >= MAX_REFERENCE_COMMANDS {
            break;
        }
        let remaining = MAX_REFERENCE_COMMANDS - candidates.len();
        let matches = match budget.bound(docs.search(token, remaining)).await? {
            Some(Ok(matches)) => matches,
            Some(Err(e)) => {
                debug!(keyword = %token, error = %e, "summary search failed");
                continue;
            }
            None => {
                debug!(keyword = %token, "summary search missed the lookup deadline");
                continue;
            }
        };

        for name in matches {
            if seen.contains(&name) {
                continue;
            }
            debug!(command = %name, keyword = %token, "search match");
            seen.insert(name.clone());
            candidates.push(CommandCandidate::new(name, Provenance::SearchMatch));
            if candidates.len() >= MAX_REFERENCE_COMMANDS {
                break;
            }
        }
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::MockDocumentationSource;
    use crate::utils::error::DocError;
    use tokio_util::sync::CancellationToken;

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn budget() -> LookupBudget {
        LookupBudget::new(std::time::Duration::from_secs(5), CancellationToken::new())
    }

    fn names(candidates: &[CommandCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_is_likely_command() {
        assert!(is_likely_command("tar"));
        assert!(is_likely_command(&"a".repeat(32)));
        assert!(!is_likely_command(&"a".repeat(33)));
        assert!(!is_likely_command(""));
        assert!(!is_likely_command("two words"));
    }

    #[tokio::test]
    async fn test_direct_matches_fill_quota_without_search() {
        let mut docs = MockDocumentationSource::new();
        docs.expect_exists().returning(|name| name != "the");
        docs.expect_search().never();

        let result = select_command_candidates(&docs, &keywords(&["the", "tar", "gzip", "find"]), &budget())
            .await
            .unwrap();

        assert_eq!(names(&result), vec!["tar", "gzip"]);
        assert!(result.iter().all(|c| c.provenance == Provenance::DirectMatch));
    }

    #[tokio::test]
    async fn test_search_fills_remaining_slot() {
        let mut docs = MockDocumentationSource::new();
        docs.expect_exists().returning(|name| name == "sha256sum");
        docs.expect_search().returning(|keyword, limit| {
            assert_eq!(limit, 1);
            Ok(match keyword {
                "checksum" => vec!["sha256sum".to_string()],
                "file" => vec!["stat".to_string()],
                _ => Vec::new(),
            })
        });

        let result = select_command_candidates(&docs, &keywords(&["checksum", "sha256sum", "file"]), &budget())
            .await
            .unwrap();

        assert_eq!(
            result,
            vec![
                CommandCandidate::new("sha256sum", Provenance::DirectMatch),
                CommandCandidate::new("stat", Provenance::SearchMatch),
            ]
        );
    }

    #[tokio::test]
    async fn test_search_failure_counts_as_no_matches() {
        let mut docs = MockDocumentationSource::new();
        docs.expect_exists().returning(|_| false);
        docs.expect_search().returning(|keyword, _| match keyword {
            "compress" => Err(DocError::Spawn {
                program: "man".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            }),
            _ => Ok(vec![
                "logrotate".to_string(),
                "journalctl".to_string(),
                "dmesg".to_string(),
            ]),
        });

        let result = select_command_candidates(&docs, &keywords(&["compress", "logs"]), &budget())
            .await
            .unwrap();

        assert_eq!(names(&result), vec!["logrotate", "journalctl"]);
    }

    #[tokio::test]
    async fn test_no_keywords_no_candidates() {
        let mut docs = MockDocumentationSource::new();
        docs.expect_exists().never();
        docs.expect_search().never();

        let result = select_command_candidates(&docs, &[], &budget()).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_budget_aborts_selection() {
        let mut docs = MockDocumentationSource::new();
        docs.expect_exists().returning(|_| true);

        let cancel = CancellationToken::new();
        cancel.cancel();
        let budget = LookupBudget::new(std::time::Duration::from_secs(5), cancel);

        let result = select_command_candidates(&docs, &keywords(&["tar"]), &budget).await;
        assert!(matches!(result, Err(crate::utils::error::ClaiError::Cancelled)));
    }
}
