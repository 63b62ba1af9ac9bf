mod config;
mod error;
mod flash;
mod method_override;
mod routes;
mod session;
mod views;


use std::sync::Arc;

use config::AppConfig;
use jotter_core::NoteService;
use routes::{app, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Only load .env in development; production uses platform-native env injection.
    #[cfg(debug_assertions)]
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jotter_web=info".parse().expect("valid directive")),
        )
        .init();

    let config = Arc::new(AppConfig::from_env()?);
    tracing::info!("Starting jotter with config: {:?}", config);

    let notes = NoteService::open_path(&config.database_path).await?;
    let state = AppState::new(config, notes)?;
    let bind_addr = state.config.bind_addr.clone();
    let router = app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("jotter listening on {}", bind_addr);
    axum::serve(listener, router).await?;
    Ok(())
}
