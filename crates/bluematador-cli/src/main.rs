//! Blue Matador MCP server entry point
//!
//! Two transports: stdio (the default, for local MCP clients) and HTTP
//! JSON-RPC (for remote access). Logs always go to stderr so the stdio
//! protocol stream on stdout stays clean.

use anyhow::Context;
use bluematador_mcp::credentials::CredentialDefaults;
use bluematador_mcp::http::HttpServer;
use bluematador_mcp::mcp::BluematadorServer;
use clap::{Parser, Subcommand};
use rmcp::transport::stdio;
use rmcp::ServiceExt;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bluematador-mcp",
    version,
    about = "MCP server for the Blue Matador monitoring API"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve MCP over stdio (default)
    Stdio,
    /// Serve MCP over HTTP JSON-RPC
    Http {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(long, default_value_t = 3000, env = "PORT")]
        port: u16,
        /// Require the X-Bluematador-Api-Key header on every request
        #[arg(long)]
        header_auth: bool,
    },
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli.command.unwrap_or(Command::Stdio) {
        Command::Stdio => serve_stdio().await,
        Command::Http {
            host,
            port,
            header_auth,
        } => serve_http(&host, port, header_auth).await,
    }
}

async fn serve_stdio() -> anyhow::Result<()> {
    info!("Starting Blue Matador MCP server on stdio");

    let service = BluematadorServer::new().serve(stdio()).await?;

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm =
            signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?;
        let mut sigint =
            signal(SignalKind::interrupt()).context("Failed to install SIGINT handler")?;

        tokio::select! {
            result = service.waiting() => {
                result?;
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down MCP server");
            }
            _ = sigint.recv() => {
                info!("Received SIGINT (Ctrl+C), shutting down MCP server");
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::select! {
            result = service.waiting() => {
                result?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down MCP server");
            }
        }
    }

    Ok(())
}

async fn serve_http(host: &str, port: u16, header_auth: bool) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("Invalid listen address {host}:{port}"))?;

    let server = HttpServer::new(addr, CredentialDefaults::from_env(), header_auth);
    server.run_until(shutdown_signal()).await
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down HTTP server");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down HTTP server");
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received Ctrl+C, shutting down HTTP server");
    }
}
