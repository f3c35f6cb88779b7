use bookstore_api::config::Config;
use bookstore_api::http::{AppState, HttpServer, HttpServerConfig};
use bookstore_api::sqlite::Sqlite;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let sqlite = Sqlite::new(config.database_url()).await?;
    let state = AppState::new(sqlite);
    let server_config = HttpServerConfig::new(config.server_port());
    let http_server = HttpServer::new(state, server_config).await?;
    http_server.run().await
}
