use depgraph::{AppConfig, AppState, HttpServer};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("depgraph v{}", depgraph::version());

    let config = AppConfig::from_env()?;
    let dataset = Arc::new(config.dataset.load()?);
    let state = AppState::new(dataset).with_lineage(config.load_lineage()?);

    let server = HttpServer::new(config.server.clone(), state);
    server.start().await?;

    Ok(())
}
