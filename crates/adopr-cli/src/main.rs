//! adopr - MCP server exposing Azure DevOps pull requests.

use std::path::PathBuf;
use std::sync::Arc;

use adopr_azure::AzureDevOpsClient;
use adopr_core::Settings;
use adopr_mcp::{McpServer, ResourceHandler};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "adopr")]
#[command(author, version, about = "Azure DevOps pull request MCP server", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server on stdio
    Serve,

    /// Detect Azure DevOps coordinates from a local git remote
    Detect {
        /// Directory to detect from (defaults to the current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging goes to stderr: stdout carries the JSON-RPC frames.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Configuration is materialized exactly once and passed down.
    let settings = Settings::from_env();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let client = AzureDevOpsClient::from_settings(&settings);
            let handler = ResourceHandler::new(settings, Arc::new(client));
            let mut server = McpServer::new(handler);
            server.run().await?;
        }
        Commands::Detect { path } => {
            let start = match path {
                Some(path) => path,
                None => std::env::current_dir()?,
            };

            let info = adopr_git::detect(&start)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "remoteUrl": info.raw_url,
                    "organization": info.organization,
                    "project": info.project,
                    "repository": info.repository,
                }))?
            );
        }
    }

    Ok(())
}
