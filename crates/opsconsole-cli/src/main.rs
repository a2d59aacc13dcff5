//! opsconsole: console preferences and settings from a terminal
//!
//! ## Usage
//!
//! ```bash
//! # Store the bearer token used by every request
//! opsconsole login --token eyJhbGciOi...
//!
//! # Read and write preferences (optionally scoped to a module)
//! opsconsole prefs get theme
//! opsconsole --module dashboard prefs set itemsPerPage 50
//!
//! # Back up and restore preferences
//! opsconsole prefs export --output prefs.json
//! opsconsole prefs import prefs.json
//!
//! # Inspect and change admin settings
//! opsconsole settings list --category Email
//! opsconsole settings set email_port=2525 email_use_tls=true
//! ```

mod cli;

use clap::Parser;
use opsconsole_client::{default_config_path, ClientConfig};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "opsconsole")]
#[command(about = "Operations console preferences and settings")]
struct Args {
    /// Path to config file
    #[arg(short, long, env = "OPSCONSOLE_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the REST API (overrides config file)
    #[arg(long, env = "OPSCONSOLE_BASE_URL")]
    base_url: Option<String>,

    /// Bearer token (overrides the stored token)
    #[arg(long, env = "OPSCONSOLE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Module scope for preferences (overrides config file)
    #[arg(short, long)]
    module: Option<String>,

    #[command(subcommand)]
    command: cli::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("opsconsole=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let mut config = if config_path.exists() {
        ClientConfig::load(&config_path)?
    } else {
        debug!(path = %config_path.display(), "Config file not found, using defaults");
        ClientConfig::default()
    };

    // Apply CLI overrides
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(module) = args.module {
        config.module_id = Some(module);
    }

    let ctx = cli::Context {
        config,
        config_path,
        token: args.token,
    };
    let output = cli::execute(&ctx, args.command).await?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
