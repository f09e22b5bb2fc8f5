//! System man pages via `man`, `man -w` and `man -k`

use super::DocumentationSource;
use crate::utils::error::DocError;
use async_trait::async_trait;
use std::process::{Output, Stdio};
use tokio::process::Command;

const MAN_PROGRAM: &str = "man";
const TAB_WIDTH: usize = 8;

/// [`DocumentationSource`] backed by the local `man` installation.
///
/// Every child is spawned with `kill_on_drop`, so dropping a lookup future
/// (deadline or cancellation) tears the process down.
#[derive(Debug, Clone)]
pub struct ManPages {
    program: String,
}

impl ManPages {
    pub fn new() -> Self {
        Self {
            program: MAN_PROGRAM.to_string(),
        }
    }

    /// Use a different `man` executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Names and keywords always follow `--` so a token like `-h` is never
    /// read as an option.
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.env("LANG", "C")
            .env("MANPAGER", "cat")
            .env("MANWIDTH", "80")
            .stdin(Stdio::null())
            .kill_on_drop(true);
        cmd
    }

    async fn run(&self, args: &[&str]) -> Result<Output, DocError> {
        let output = self
            .command()
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|source| DocError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DocError::Failed {
                program: self.program.clone(),
                status: output.status,
            });
        }
        Ok(output)
    }
}

impl Default for ManPages {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentationSource for ManPages {
    async fn exists(&self, name: &str) -> bool {
        self.run(&["-w", "--", name]).await.is_ok()
    }

    async fn render(&self, name: &str) -> Result<String, DocError> {
        let output = self.run(&["--", name]).await?;
        Ok(strip_overstrikes(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn search(&self, keyword: &str, limit: usize) -> Result<Vec<String>, DocError> {
        if limit == 0 || keyword.is_empty() {
            return Ok(Vec::new());
        }
        // man -k exits non-zero for "nothing appropriate"
        let output = match self.run(&["-k", "--", keyword]).await {
            Ok(output) => output,
            Err(DocError::Failed { .. }) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        Ok(parse_apropos(&String::from_utf8_lossy(&output.stdout), limit))
    }
}

/// Collect command names from `man -k` output, keeping order.
pub fn parse_apropos(output: &str, limit: usize) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains("nothing appropriate"))
        .filter_map(parse_apropos_line)
        .take(limit)
        .collect()
}

/// `ls (1)               - list directory contents` → `ls`
pub fn parse_apropos_line(line: &str) -> Option<String> {
    match line.find(" (") {
        Some(idx) if idx > 0 => Some(line[..idx].trim().to_string()),
        _ => None,
    }
}

/// Remove backspace overstrikes and expand tabs, like `col -bx`.
pub fn strip_overstrikes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let mut chars: Vec<char> = Vec::with_capacity(line.len());
        for c in line.chars() {
            match c {
                '\u{8}' => {
                    chars.pop();
                }
                '\t' => {
                    let column = chars.len();
                    let pad = TAB_WIDTH - column % TAB_WIDTH;
                    chars.extend(std::iter::repeat(' ').take(pad));
                }
                _ => chars.push(c),
            }
        }
        out.extend(chars);
    }
    out
}
