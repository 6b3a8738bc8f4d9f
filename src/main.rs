use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use prompt_wizard::core::config::{Config, DEFAULT_CONFIG_PATH};
use prompt_wizard::services::llm::create_llm;
use prompt_wizard::services::optimizer::{create_optimizer, Optimizer};
use prompt_wizard::services::{server, session};

#[derive(Parser)]
#[command(name = "prompt-wizard")]
#[command(about = "Build structured AI prompts step by step", long_about = None)]
struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through the six prompt steps interactively (default)
    Wizard,

    /// Serve the optimization endpoint over HTTP
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Write a config file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Wizard) {
        Commands::Init { force } => {
            if cli.config.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", cli.config.display());
            }
            Config::default().save(&cli.config)?;
            println!("Wrote {}", cli.config.display());
        }
        Commands::Serve { host, port } => {
            let mut config = Config::load(&cli.config)?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            // The gateway always talks to the completion API itself.
            let optimizer = Arc::new(Optimizer::new(create_llm(&config.llm)?));
            server::serve(&config.server, optimizer).await?;
        }
        Commands::Wizard => {
            let config = Config::load(&cli.config)?;
            let optimizer = create_optimizer(&config)?;
            session::run_session(optimizer.as_ref()).await?;
        }
    }

    Ok(())
}
