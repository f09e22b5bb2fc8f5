use crate::utils::error::{ClaiError, ClaiResult};
use serde::{Deserialize, Serialize};

/// One suggested command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSuggestion {
    pub cmd: String,
    pub args: Vec<String>,
    pub explain: String,
}

impl CommandSuggestion {
    /// `cmd` followed by its arguments, space separated
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.cmd.clone()
        } else {
            format!("{} {}", self.cmd, self.args.join(" "))
        }
    }
}

/// Parse engine stdout strictly. Anything but a JSON array of complete
/// command objects is [`ClaiError::MalformedResponse`] carrying `raw` as-is.
pub fn parse_suggestions(raw: &str) -> ClaiResult<Vec<CommandSuggestion>> {
    serde_json::from_str(raw.trim()).map_err(|source| ClaiError::MalformedResponse {
        raw: raw.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_keeps_emission_order() {
        let raw = r#"
  [ {"cmd": "sha256sum", "args": ["file.iso"], "explain": "Print the SHA256 checksum"},
    {"cmd":"openssl","args":["dgst","-sha256","file.iso"],"explain":"Same via \"openssl\""} ]
"#;
        let suggestions = parse_suggestions(raw).unwrap();
        assert_eq!(
            suggestions,
            vec![
                CommandSuggestion {
                    cmd: "sha256sum".to_string(),
                    args: vec!["file.iso".to_string()],
                    explain: "Print the SHA256 checksum".to_string(),
                },
                CommandSuggestion {
                    cmd: "openssl".to_string(),
                    args: vec!["dgst".to_string(), "-sha256".to_string(), "file.iso".to_string()],
                    explain: "Same via \"openssl\"".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_empty_array_is_no_commands() {
        assert_eq!(parse_suggestions(" []\n").unwrap(), Vec::new());
    }

    #[test]
    fn test_malformed_responses_keep_raw_text() {
        let cases = [
            r#"[{"cmd":"ls","args":[],"explain":"list"},]"#,
            r#"[{"cmd":"ls","args":[]}]"#,
            r#"{"cmd":"ls","args":[],"explain":"list"}"#,
            r#"[{"cmd":"ls","args":"-la","explain":"list"}]"#,
            r#"[{"cmd":"ls","args":[],"explain":"list","shell":"bash"}]"#,
            "  not json at all\n",
            "",
        ];
        for raw in cases {
            assert_matches!(
                parse_suggestions(raw),
                Err(ClaiError::MalformedResponse { raw: captured, .. }) if captured == raw
            );
        }
    }

    #[test]
    fn test_command_line() {
        let suggestion = CommandSuggestion {
            cmd: "du".to_string(),
            args: vec!["-sh".to_string(), ".".to_string()],
            explain: String::new(),
        };
        assert_eq!(suggestion.command_line(), "du -sh .");
    }
}
