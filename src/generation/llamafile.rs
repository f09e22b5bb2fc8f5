//! llamafile subprocess engine

use super::{GenerationEngine, GenerationRequest};
use crate::utils::error::{ClaiError, ClaiResult};
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub const DEFAULT_LAUNCHER: &str = "/bin/sh";

/// Runs a llamafile binary once per request.
///
/// The binary is started through `launcher` (a POSIX shell by default) so
/// that APE executables work without being registered with the kernel.
#[derive(Debug, Clone)]
pub struct LlamafileEngine {
    launcher: PathBuf,
    binary: PathBuf,
    model: PathBuf,
}

impl LlamafileEngine {
    pub fn new(binary: impl Into<PathBuf>, model: impl Into<PathBuf>) -> Self {
        Self {
            launcher: PathBuf::from(DEFAULT_LAUNCHER),
            binary: binary.into(),
            model: model.into(),
        }
    }

    pub fn with_launcher(mut self, launcher: impl Into<PathBuf>) -> Self {
        self.launcher = launcher.into();
        self
    }

    /// Engine arguments, in the order they are passed after the binary path
    pub fn engine_args(&self, request: &GenerationRequest, grammar_path: &Path) -> Vec<String> {
        let sampling = &request.sampling;
        let mut args = vec![
            "-m".to_string(),
            self.model.display().to_string(),
            "--no-display-prompt".to_string(),
        ];
        if sampling.fast {
            args.push("--fast".to_string());
        }
        if let Some(layers) = sampling.gpu_layers {
            args.push("-ngl".to_string());
            args.push(layers.to_string());
        }
        if sampling.mlock {
            args.push("--mlock".to_string());
        }
        args.extend([
            "--grammar-file".to_string(),
            grammar_path.display().to_string(),
            "-p".to_string(),
            request.prompt.clone(),
            "--temp".to_string(),
            sampling.temperature.to_string(),
            "--n-predict".to_string(),
            sampling.max_new_tokens.to_string(),
            "--ctx-size".to_string(),
            sampling.context_window.to_string(),
            "--threads".to_string(),
            sampling.threads.to_string(),
        ]);
        args
    }
}

fn write_grammar(grammar: &str) -> ClaiResult<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("command_")
        .suffix(".gbnf")
        .tempfile()
        .map_err(ClaiError::GrammarFile)?;
    file.write_all(grammar.as_bytes())
        .and_then(|_| file.flush())
        .map_err(ClaiError::GrammarFile)?;
    Ok(file)
}

/// Kills the engine's process group on drop unless disarmed.
///
/// The engine runs as the leader of its own group, so one `killpg` also
/// takes down anything it spawned.
struct ProcessGroup {
    pgid: Option<u32>,
}

impl ProcessGroup {
    fn new(pgid: Option<u32>) -> Self {
        Self { pgid }
    }

    fn disarm(mut self) {
        self.pgid = None;
    }
}

impl Drop for ProcessGroup {
    fn drop(&mut self) {
        #[cfg(unix)]
        if let Some(pgid) = self.pgid.take() {
            // SAFETY: killpg has no memory-safety preconditions
            let rc = unsafe { libc::killpg(pgid as libc::pid_t, libc::SIGKILL) };
            if rc != 0 {
                debug!(pgid, error = %std::io::Error::last_os_error(), "engine process group already gone");
            }
        }
    }
}

#[async_trait]
impl GenerationEngine for LlamafileEngine {
    async fn generate(&self, request: &GenerationRequest) -> ClaiResult<String> {
        let deadline = Instant::now() + request.timeout;

        // Removed when dropped, on every return path and on cancellation
        let grammar = write_grammar(&request.grammar)?;

        let mut command = Command::new(&self.launcher);
        command
            .arg(&self.binary)
            .args(self.engine_args(request, grammar.path()))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(unix)]
        command.process_group(0);

        info!(binary = %self.binary.display(), model = %self.model.display(), "starting generation engine");
        let child = command.spawn().map_err(ClaiError::EngineSpawn)?;
        // Kills whatever the engine forked if this future ends early
        let group = ProcessGroup::new(child.id());

        let output = match tokio::time::timeout_at(deadline, child.wait_with_output()).await {
            Ok(result) => {
                let output = result.map_err(ClaiError::EngineSpawn)?;
                group.disarm();
                output
            }
            Err(_) => {
                warn!(timeout_secs = request.timeout.as_secs_f32(), "generation engine timed out, killed");
                return Err(ClaiError::GenerationTimeout {
                    timeout: request.timeout,
                });
            }
        };

        if !output.status.success() {
            return Err(ClaiError::process_failure(output.status, &output.stderr));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(bytes = stdout.len(), "generation engine finished");
        Ok(stdout)
    }
}
