/// GBNF grammar for `[{"cmd": string, "args": [string, ...], "explain": string}, ...]`.
///
/// The `hex` rule completes the `\u` escape so the engine accepts the file.
pub const COMMAND_GRAMMAR: &str = r#"root   ::= ws "[" ws (object (ws "," ws object)*)? ws "]" ws
object ::= "{" ws "\"cmd\"" ws ":" ws string ws "," ws "\"args\"" ws ":" ws array ws "," ws "\"explain\"" ws ":" ws string ws "}"
array  ::= "[" ws (string (ws "," ws string)*)? ws "]"
string ::= "\"" char* "\""
char   ::= [^"\\] | "\\" (["\\/bfnrt] | "u" hex hex hex hex)
ws     ::= [ \t\n\r]*
hex    ::= [0-9a-fA-F]
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_text_is_exact() {
        let lines: Vec<&str> = COMMAND_GRAMMAR.lines().collect();
        assert_eq!(
            lines[..6],
            [
                r#"root   ::= ws "[" ws (object (ws "," ws object)*)? ws "]" ws"#,
                r#"object ::= "{" ws "\"cmd\"" ws ":" ws string ws "," ws "\"args\"" ws ":" ws array ws "," ws "\"explain\"" ws ":" ws string ws "}""#,
                r#"array  ::= "[" ws (string (ws "," ws string)*)? ws "]""#,
                r#"string ::= "\"" char* "\"""#,
                r#"char   ::= [^"\\] | "\\" (["\\/bfnrt] | "u" hex hex hex hex)"#,
                r#"ws     ::= [ \t\n\r]*"#,
            ]
        );
        assert_eq!(lines[6..], ["hex    ::= [0-9a-fA-F]"]);
        assert!(COMMAND_GRAMMAR.ends_with("[0-9a-fA-F]\n"));
    }

    #[test]
    fn test_grammar_defines_every_referenced_rule() {
        let defined: Vec<&str> = COMMAND_GRAMMAR
            .lines()
            .filter_map(|line| line.split("::=").next())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();
        assert_eq!(defined, vec!["root", "object", "array", "string", "char", "ws", "hex"]);
    }

    #[test]
    fn test_grammar_names_required_fields_in_order() {
        let object = COMMAND_GRAMMAR
            .lines()
            .find(|line| line.starts_with("object"))
            .unwrap();
        let cmd = object.find(r#"\"cmd\""#).unwrap();
        let args = object.find(r#"\"args\""#).unwrap();
        let explain = object.find(r#"\"explain\""#).unwrap();
        assert!(cmd < args && args < explain);
    }
}
