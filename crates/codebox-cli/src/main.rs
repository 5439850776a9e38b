//! codebox — run code snippets through the execution sandbox
//!
//! Usage:
//!   codebox run <file>    - Execute a source file
//!   codebox serve         - Serve the HTTP gateway
//!   codebox doctor        - Check host toolchain health
//!   codebox languages     - List supported languages

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "codebox")]
#[command(version)]
#[command(about = "Multi-language code execution sandbox", long_about = None)]
struct Cli {
    /// Path to a TOML config file; defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a source file through the sandbox
    Run {
        /// Source file to execute
        file: PathBuf,

        /// Language tag; inferred from the file extension when omitted
        #[arg(long)]
        language: Option<String>,

        /// File whose contents are piped to the program's stdin
        #[arg(long)]
        stdin: Option<PathBuf>,

        /// Strip Markdown fences and synthesize an entrypoint first
        #[arg(long)]
        wrap: bool,

        /// Execute on the configured remote judge instead of this host
        #[arg(long)]
        remote: bool,
    },

    /// Serve the HTTP gateway
    Serve {
        /// Listen address; overrides the config file
        #[arg(long)]
        bind: Option<String>,
    },

    /// Check that the host toolchains are ready
    Doctor,

    /// List supported languages and their toolchains
    Languages,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr so `run` output stays pipeable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("codebox_core=info,codebox_gateway=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = codebox_core::CodeboxConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            file,
            language,
            stdin,
            wrap,
            remote,
        } => commands::run::execute(config, file, language, stdin, wrap, remote).await,
        Commands::Serve { bind } => commands::serve::execute(config, bind).await,
        Commands::Doctor => commands::doctor::execute(&config),
        Commands::Languages => commands::languages::execute(),
    }
}
