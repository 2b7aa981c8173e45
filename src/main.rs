use std::path::PathBuf;

use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

use requiem_lsp::Backend;
use requiem_lsp::config::Config;

/// Module-path completion language server for CommonJS `require()` calls.
#[derive(Parser)]
#[command(name = "requiem-lsp", version, about)]
struct Args {
    /// Path to a requiem.toml configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset, e.g. "requiem_lsp=debug".
    #[arg(long, default_value = "info")]
    log: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // stdout carries the LSP transport; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = Config::load(args.config.as_deref());

    let (service, socket) = LspService::new(move |client| Backend::new(client, config));
    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
        .serve(service)
        .await;
}
