mod classify_cmd;
mod config_cmd;
mod lookup_cmd;
mod serve_cmd;
mod setup;
mod status_cmd;
mod terminal_output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use krishimitra_logging::{init_logger, LogOptions};

#[derive(Parser)]
#[command(name = "krishimitra")]
#[command(about = "KrishiMitra - plant leaf disease detection and farming advice")]
#[command(version)]
struct Cli {
    /// Config file (default: $KRISHIMITRA_CONFIG_DIR/config.yaml or ~/.krishimitra/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Check whether a local server is up
    Status {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Classify a leaf photo with the configured classifier
    Classify {
        /// Path to the image
        image: PathBuf,
    },
    /// Ask the farming assistant a question
    Chat {
        #[arg(required = true, trailing_var_arg = true)]
        question: Vec<String>,
    },
    /// Print the advice record for a disease label
    Advice {
        /// Label as the classifier names it, e.g. "Tomato Late Blight"
        label: String,
    },
    /// List every label the classifier can emit
    Labels,
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a config file with every default filled in
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective config with secrets masked
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = setup::config_path(cli.config);

    match cli.command {
        Commands::Serve { port } => {
            // Logging comes up after env substitution but before validation,
            // so `${VAR}` log dirs resolve and config warnings are visible.
            let raw = krishimitra_config::load_config(&config_path).await?;
            let resolved = krishimitra_config::resolve_config(raw)?;
            init_logger(&setup::log_options(&resolved))
                .context("Failed to open the log directory")?;
            let config = krishimitra_config::finalize(resolved)?;
            serve_cmd::run(config, port).await?;
        }
        Commands::Status { port } => {
            init_logger(&quiet_logging())?;
            let config = krishimitra_config::load_and_prepare(&config_path).await?;
            status_cmd::run(port.unwrap_or(config.port())).await?;
        }
        Commands::Classify { image } => {
            init_logger(&quiet_logging())?;
            let config = krishimitra_config::load_and_prepare(&config_path).await?;
            classify_cmd::run(&config, &image).await?;
        }
        Commands::Chat { question } => lookup_cmd::chat(&question.join(" ")),
        Commands::Advice { label } => lookup_cmd::advice(&label)?,
        Commands::Labels => lookup_cmd::labels(),
        Commands::Config { action } => {
            init_logger(&quiet_logging())?;
            match action {
                ConfigAction::Init { force } => config_cmd::init(&config_path, force).await?,
                ConfigAction::Show => config_cmd::show(&config_path).await?,
            }
        }
    }

    Ok(())
}

/// One-shot commands print results on stdout; keep logs to warnings.
fn quiet_logging() -> LogOptions {
    LogOptions {
        level: "warn".to_string(),
        ..LogOptions::default()
    }
}
