use clap::Parser;
use scanner_server::{AppState, ServerConfig, logging, router};
use tracing::info;

/// Stock scanner API server
#[derive(Debug, Parser)]
#[command(name = "scanner-server", version, about)]
struct Args {
    /// Bind address (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    let args = Args::parse();
    let mut config = ServerConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let addr = config.bind_addr();
    let state = AppState::from_config(config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "scanner server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
