//! Unified CLI for cweb-config
//!
//! Submits a guild configuration by default, or runs the config endpoint
//! with the `server` subcommand.
//!
//! # Usage
//!
//! ## Submit Mode
//! ```bash
//! cweb-config --gid 1234 --file guild.toml --token secret
//! cat guild.toml | cweb-config --gid 1234 --file -
//! ```
//!
//! ## Server Mode
//! ```bash
//! cweb-config server --port 4417 --host 0.0.0.0
//! ```
//!
//! ## Help and Version
//! ```bash
//! cweb-config --version
//! cweb-config --help
//! cweb-config server --help
//! ```

use clap::{Parser, Subcommand};

use cweb_config::cli::{
    server::{ServerArgs, run_server_mode},
    submit::{SubmitArgs, run_submit_mode},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "cweb-config")]
#[command(subcommand_negates_reqs = true, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    // Submit mode options (when no subcommand is provided)
    /// Guild ID whose configuration is replaced
    #[arg(short, long, value_name = "GID", required = true, allow_hyphen_values = true)]
    gid: Option<String>,

    /// File holding the configuration text, or `-` for stdin
    #[arg(short, long, value_name = "PATH", default_value = "-")]
    file: String,

    /// Base URL of the web panel
    #[arg(short, long, value_name = "URL")]
    base_url: Option<String>,

    /// Bearer token sent with the update
    #[arg(short, long, value_name = "TOKEN")]
    token: Option<String>,

    /// Configuration file path
    #[arg(long)]
    config: Option<String>,

    /// Report 400 and 403 with the generic error banner
    #[arg(long)]
    generic_errors_only: bool,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server mode
    Server {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Configuration file path
        #[arg(long)]
        config: Option<String>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Server {
            port,
            host,
            config,
            verbose,
        }) => {
            let args = ServerArgs {
                port,
                host,
                config,
                verbose,
            };
            run_server_mode(args).await
        }
        None => {
            let Some(gid) = cli.gid else {
                anyhow::bail!("--gid is required");
            };
            let args = SubmitArgs {
                gid,
                file: cli.file,
                base_url: cli.base_url,
                token: cli.token,
                config: cli.config,
                generic_errors_only: cli.generic_errors_only,
                verbose: cli.verbose,
            };

            let outcome = run_submit_mode(args).await?;
            if !outcome.is_success() {
                std::process::exit(outcome.exit_code());
            }
            Ok(())
        }
    }
}
