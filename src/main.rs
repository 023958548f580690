use std::sync::Arc;

use artshop_products::{http, Config, InMemoryProductStore, ProductService, Seed};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;

    info!("Initializing store...");
    let store = InMemoryProductStore::new();
    if let Some(path) = &config.seed_path {
        info!("Loading seed from {}", path.display());
        Seed::from_file(path)?.apply(&store).await?;
    }

    let service = Arc::new(ProductService::new(store));

    info!("Starting server...");
    http::serve(service, &config.address()).await?;

    info!("Server shut down");
    Ok(())
}
