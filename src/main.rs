use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clai::pipeline::{generate_suggestions, prepare_prompt};
use clai::utils::logger;
use clai::{AssetKind, AssetStore, Config, LlamafileEngine, ManPages, ModelId, OutputHandler};
use console::style;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Parser)]
#[command(name = "clai")]
#[command(about = "Convert natural language to shell commands using a local model", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// What you want to do, e.g. `clai compress the logs folder`.
    /// Words starting with `-` go after `--`: `clai -- explain ls -la`
    query: Vec<String>,

    /// Log pipeline decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Generation timeout in seconds (overrides the config file)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Print the assembled prompt to stderr before generating
    #[arg(long)]
    show_prompt: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage clai configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Display current configuration
    Show,
    /// List available models
    Models,
    /// Change the model used for generation
    SetModel {
        /// Model id, e.g. gemma-3-4b-it-q6.llamafile
        model: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_global_logger(cli.verbose) {
        eprintln!("{}", e);
    }

    if let Err(err) = run(cli).await {
        eprintln!("{} {:#}", style("Error:").red().bold(), err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Config { action }) => run_config(action),
        None => {
            if cli.query.is_empty() {
                anyhow::bail!("Please provide a query\nUsage: clai \"your query here\"");
            }
            let input = cli.query.join(" ");
            ask(&input, cli.timeout, cli.show_prompt).await
        }
    }
}

async fn ask(input: &str, timeout: Option<u64>, show_prompt: bool) -> Result<()> {
    let config = Config::load_or_default()?;
    let store = AssetStore::from_config(&config)?;
    let engine_path = store.resolve(AssetKind::Engine)?;
    let model_path = store.resolve(AssetKind::Model(config.model))?;
    debug!(engine = %engine_path.display(), model = %model_path.display(), "assets resolved");

    let engine = LlamafileEngine::new(engine_path, model_path)
        .with_launcher(config.generation.launcher.clone());
    let mut options = config.generation.suggest_options();
    if let Some(secs) = timeout {
        options.timeout = Duration::from_secs(secs);
    }

    let cancel = CancellationToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let docs = ManPages::new();
    let result = async {
        let prompt = prepare_prompt(input, &docs, &cancel).await?;
        if show_prompt {
            eprintln!("{}\n{}\n", style("Prompt:").dim(), prompt);
        }
        generate_suggestions(prompt, &engine, &options, &cancel).await
    }
    .await;
    ctrl_c.abort();

    let suggestions = result.context("Error processing query")?;
    OutputHandler::new().print_suggestions(&suggestions)?;
    Ok(())
}

fn run_config(action: ConfigCommand) -> Result<()> {
    let mut output = OutputHandler::new();
    match action {
        ConfigCommand::Show => {
            let config = Config::load_or_default()?;
            output.print_config(&config, &Config::config_path()?)?;
        }
        ConfigCommand::Models => {
            let config = Config::load_or_default()?;
            output.print_models(config.model)?;
        }
        ConfigCommand::SetModel { model } => {
            let model: ModelId = model.parse()?;
            let mut config = Config::load_or_default()?;
            config.model = model;
            config.save().context("Failed to save config")?;
            output.print_model_changed(model)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_after_query_words_are_flags() {
        let cli = Cli::try_parse_from(["clai", "show", "disk", "usage", "--show-prompt", "-v"]).unwrap();
        assert_eq!(cli.query, vec!["show", "disk", "usage"]);
        assert!(cli.show_prompt);
        assert!(cli.verbose);
    }

    #[test]
    fn test_dash_words_after_separator_stay_in_query() {
        let cli = Cli::try_parse_from(["clai", "--timeout", "30", "--", "what", "does", "ls", "-la", "do"]).unwrap();
        assert_eq!(cli.query, vec!["what", "does", "ls", "-la", "do"]);
        assert_eq!(cli.timeout, Some(30));
        assert!(!cli.show_prompt);
    }

    #[test]
    fn test_config_subcommand() {
        let cli = Cli::try_parse_from(["clai", "config", "set-model", "gemma-3-4b-it-q6"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config { action: ConfigCommand::SetModel { ref model } }) if model == "gemma-3-4b-it-q6"
        ));
    }
}
