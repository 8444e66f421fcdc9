//! studykit validation server
//!
//! Serves the default student and patient schemas over HTTP.
//!
//! Usage:
//!   studykit-server --port 8000

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use studykit_server::{build_router, AppState, SchemaRegistry};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "studykit-server")]
#[command(about = "HTTP validation service for studykit record schemas")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let registry = SchemaRegistry::with_defaults().context("Failed to build default schemas")?;
    info!("Serving schemas: {}", registry.names().collect::<Vec<_>>().join(", "));

    let app = build_router(Arc::new(AppState::new(registry)));
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("HTTP API listening on http://{}", addr);
    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}
