use std::path::PathBuf;

use clap::{Parser, Subcommand};
use medreport_config::{AppConfig, ConfigError};
use tracing_subscriber::EnvFilter;

mod commands;

/// Environment variable naming a configuration file.
const CONFIG_ENV_VAR: &str = "MEDREPORT_CONFIG";

#[derive(Parser)]
#[command(name = "medreport", version, about = "Medical report keyword analyzer")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API server
    Serve {
        /// Host to bind to (overrides server.host)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Analyze a report file, or text (reads stdin if neither is given)
    Analyze {
        /// Report file (pdf, doc, docx, txt)
        path: Option<PathBuf>,
        /// Text to analyze instead of a file
        #[arg(short, long, conflicts_with = "path")]
        text: Option<String>,
    },
    /// Show effective configuration
    Config,
    /// Show the effective keyword table
    Keywords,
}

fn find_config() -> Option<PathBuf> {
    // 1. MEDREPORT_CONFIG environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. medreport.yaml in current directory
    let cwd_config = PathBuf::from("medreport.yaml");
    if cwd_config.exists() {
        return Some(cwd_config);
    }

    // 3. ~/.config/medreport/config.yaml
    if let Some(home) = dirs_next::home_dir() {
        let home_config = home.join(".config/medreport/config.yaml");
        if home_config.exists() {
            return Some(home_config);
        }
    }

    None
}

/// Load the explicit or discovered config file, falling back to defaults.
fn load_config(explicit: Option<PathBuf>) -> Result<AppConfig, ConfigError> {
    match explicit.or_else(find_config) {
        Some(path) => AppConfig::from_file(&path),
        None => Ok(AppConfig::default()),
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured filter.
fn init_logging(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config)?.effective();
    init_logging(&config.log.filter);

    match cli.command {
        Commands::Serve { host, port } => {
            commands::serve::run(config, host, port).await?;
        }
        Commands::Analyze { path, text } => {
            commands::analyze::run(&config, path, text).await?;
        }
        Commands::Config => {
            commands::config::run(&config)?;
        }
        Commands::Keywords => {
            commands::keywords::run(&config)?;
        }
    }

    Ok(())
}
