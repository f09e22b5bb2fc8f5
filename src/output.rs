use crate::assets::{ModelId, MODEL_CATALOG};
use crate::config::Config;
use crate::generation::CommandSuggestion;
use console::style;
use std::io::{self, Write};
use std::path::Path;

const RULE_WIDTH: usize = 60;

/// Terminal rendering of results and configuration
pub struct OutputHandler<W: Write> {
    out: W,
}

impl OutputHandler<io::Stdout> {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for OutputHandler<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> OutputHandler<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn print_suggestions(&mut self, suggestions: &[CommandSuggestion]) -> io::Result<()> {
        if suggestions.is_empty() {
            writeln!(self.out, "{}", style("No commands generated").yellow())?;
            return Ok(());
        }

        writeln!(self.out, "\n{}", style("Generated Commands:").cyan().bold())?;
        writeln!(self.out, "{}", "─".repeat(RULE_WIDTH))?;

        for (i, suggestion) in suggestions.iter().enumerate() {
            writeln!(self.out, "\n{}. {}", i + 1, suggestion.explain)?;
            writeln!(
                self.out,
                "   {} {}",
                style("$").dim(),
                style(suggestion.command_line()).green().bold()
            )?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    pub fn print_config(&mut self, config: &Config, config_path: &Path) -> io::Result<()> {
        let info = config.model.info();
        writeln!(self.out, "{}", style("Current Configuration:").cyan().bold())?;
        writeln!(self.out, "─────────────────────")?;
        writeln!(self.out, "Model: {}", config.model)?;
        writeln!(self.out, "Config file: {}", config_path.display())?;
        writeln!(self.out, "Description: {}", info.description)?;
        writeln!(self.out, "Download size: {}", info.download_size)?;
        if let Some(path) = &config.engine_path {
            writeln!(self.out, "Engine path: {}", path.display())?;
        }
        if let Some(path) = &config.model_path {
            writeln!(self.out, "Model path: {}", path.display())?;
        }
        Ok(())
    }

    pub fn print_models(&mut self, selected: ModelId) -> io::Result<()> {
        for info in MODEL_CATALOG.iter() {
            let marker = if info.id == selected { "*" } else { " " };
            writeln!(
                self.out,
                "{} {}  {} (Size: {})",
                marker,
                style(info.id).bold(),
                info.description,
                info.download_size
            )?;
        }
        Ok(())
    }

    pub fn print_model_changed(&mut self, model: ModelId) -> io::Result<()> {
        writeln!(self.out, "{} Model changed to: {}", style("✓").green(), model)?;
        writeln!(
            self.out,
            "{}",
            style("Install the weights before the next query if they are not present yet.").dim()
        )
    }
}
