use crate::utils::text::is_decimal_digit;
use std::collections::HashSet;

/// Split free-form text into lowercase keywords.
///
/// Anything other than letters, digits, `-` and `_` separates tokens. The
/// result keeps first-occurrence order with duplicates removed.
pub fn extract_keywords(input: &str) -> Vec<String> {
    let lowered = input.to_lowercase();
    let mut seen = HashSet::new();

    lowered
        .split(|c: char| !(c.is_alphabetic() || is_decimal_digit(c) || c == '-' || c == '_'))
        .filter(|token| !token.is_empty())
        .filter(|token| seen.insert(*token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_keywords_lowercases_and_dedups() {
        assert_eq!(
            extract_keywords("Get SHA256 checksum of a file, then get the FILE size"),
            vec!["get", "sha256", "checksum", "of", "a", "file", "then", "the", "size"]
        );
    }

    #[test]
    fn test_extract_keywords_keeps_hyphen_and_underscore() {
        assert_eq!(
            extract_keywords("run ssh-keygen / update_rc.d!"),
            vec!["run", "ssh-keygen", "update_rc", "d"]
        );
    }

    #[test]
    fn test_extract_keywords_empty_input() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("  ?!  ... ").is_empty());
    }

    #[test]
    fn test_extract_keywords_splits_on_non_decimal_numerics() {
        assert_eq!(
            extract_keywords("x² grep½ tail٣"),
            vec!["x", "grep", "tail٣"]
        );
    }
}
