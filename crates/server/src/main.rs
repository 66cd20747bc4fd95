use clap::Parser;
use staymap::{Catalog, Config};
use staymap_server::run_server;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Listings file: a JSON array, or JSON Lines for .jsonl/.ndjson
    #[arg(short, long)]
    dataset: PathBuf,

    /// Engine configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "staymap_server=info,staymap=info,info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            Config::from_toml(&std::fs::read_to_string(path)?)?
        }
        None => Config::default(),
    };

    info!("Loading listings from {}", args.dataset.display());
    let catalog = Catalog::builder()
        .dataset(&args.dataset)
        .config(config)
        .build()?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl_c signal: {}", e);
            std::future::pending::<()>().await;
        }
    };

    run_server(listener, Arc::new(catalog), shutdown).await?;

    Ok(())
}
