use std::sync::Arc;

use dotenv::dotenv;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tictactoe_server::{GameServer, Settings};

#[tokio::main]
async fn main() -> tictactoe_server::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    // Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded successfully");

    let listener = TcpListener::bind((settings.host.as_str(), settings.port)).await?;
    info!("Serving on ws://{}:{}", settings.host, settings.port);

    let server = Arc::new(GameServer::new());

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let server = server.clone();
                tokio::spawn(async move {
                    server.handle_connection(stream, addr).await;
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}
