/// Output shape shown to the model
const JSON_EXAMPLE: &str = r#"[{"cmd":"command","args":["arg1","arg2"],"explain":"description"}]"#;

/// Compose the instruction text for one task. The reference block is only
/// included when non-empty.
pub fn build_prompt(task: &str, reference: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str("Generate shell commands as JSON array.\n\n");
    prompt.push_str(&format!("Task: {}\n\n", task));

    if !reference.is_empty() {
        prompt.push_str("Reference material from relevant man pages:\n");
        prompt.push_str("[MANPAGE EXCERPT]\n");
        prompt.push_str(reference);
        prompt.push_str("\n[/MANPAGE EXCERPT]\n\n");
    }

    prompt.push_str("Rules:\n");
    prompt.push_str("- Return 1-4 real Linux commands only\n");
    prompt.push_str("- Use actual commands\n");
    prompt.push_str("- Most common solution first\n");
    prompt.push_str("- Args as separate array elements\n\n");
    prompt.push_str("JSON format:\n");
    prompt.push_str(JSON_EXAMPLE);
    prompt.push_str("\n\nOutput:");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prompt_without_reference() {
        let prompt = build_prompt("list all python files", "");
        assert_eq!(
            prompt,
            "Generate shell commands as JSON array.\n\n\
             Task: list all python files\n\n\
             Rules:\n\
             - Return 1-4 real Linux commands only\n\
             - Use actual commands\n\
             - Most common solution first\n\
             - Args as separate array elements\n\n\
             JSON format:\n\
             [{\"cmd\":\"command\",\"args\":[\"arg1\",\"arg2\"],\"explain\":\"description\"}]\n\n\
             Output:"
        );
    }

    #[test]
    fn test_prompt_with_reference_block() {
        let prompt = build_prompt("show disk usage", "COMMAND: du\nNAME\n       du - estimate file space usage");
        assert!(prompt.contains(
            "Reference material from relevant man pages:\n[MANPAGE EXCERPT]\n\
             COMMAND: du\nNAME\n       du - estimate file space usage\n[/MANPAGE EXCERPT]\n\nRules:\n"
        ));
        assert!(prompt.ends_with("Output:"));
    }
}
