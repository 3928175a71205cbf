//! HTTP server command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing_subscriber::EnvFilter;

use crate::libs::config::Config;
use crate::server;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on, overrides the configured value
    #[arg(long)]
    port: Option<u16>,

    /// Path to the SQLite database file, overrides the configured value
    #[arg(long)]
    db: Option<PathBuf>,
}

#[actix_web::main]
pub async fn cmd(serve_args: ServeArgs) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::read()?;
    let port = serve_args.port.unwrap_or(config.port);
    let db_path = match serve_args.db {
        Some(path) => path,
        None => config.db_path()?,
    };

    server::run(port, db_path).await
}
