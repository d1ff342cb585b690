use std::sync::Arc;

use taxi_fleet::{
    create_app,
    state::{AppConfig, AppState},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let bind_addr = config.bind_addr.clone();
    let app = create_app(Arc::new(AppState::new(config)));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("taxi-fleet listening on {}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
