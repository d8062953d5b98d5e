use cardiograph_api::Server;
use cardiograph_core::{CardioError, ConfigManager};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> cardiograph_core::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cardiograph_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config =
        Arc::new(ConfigManager::load().map_err(|e| CardioError::Config(e.to_string()))?);

    let host: IpAddr = config
        .config()
        .server
        .host
        .parse()
        .map_err(|e| CardioError::Config(format!("invalid server.host: {e}")))?;
    let addr = SocketAddr::new(host, config.config().server.port);

    let server = Server::new(addr, config).await?;
    server.run().await
}
