use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kyobo_catalog::config::{AppConfig, StoreKind};
use kyobo_catalog::infra::json_store::JsonCatalogRepository;
use kyobo_catalog::infra::memory_store::MemoryCatalog;
use kyobo_catalog::interface::http;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let addr = config.socket_addr();
    match config.store {
        StoreKind::Memory => {
            info!("Using in-memory store");
            http::run(addr, Arc::new(MemoryCatalog::new())).await
        }
        StoreKind::Json => {
            info!("Using JSON store at {}", config.data_file.display());
            http::run(addr, Arc::new(JsonCatalogRepository::new(&config.data_file))).await
        }
    }
}
