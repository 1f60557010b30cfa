use anyhow::Context;
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app;
mod common;
mod config;
mod docs;
mod infrastructure;
mod modules;
mod routes;
mod state;
mod workers;

use config::settings::AppConfig;
use infrastructure::db::pool;
use infrastructure::queue::rabbitmq::RabbitMqService;
use infrastructure::storage::s3::StorageService;
use modules::video::publisher::EncoderRequestPublisher;
use modules::video::repository::VideoRepository;
use modules::video::storage::S3MediaResourceGateway;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting video catalog...");

    let config = AppConfig::new().context("Missing required environment variable")?;

    let db = pool::connect_to_db(&config.database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;
    pool::run_migrations(&db).await.context("Failed to run migrations")?;

    let storage = StorageService::new(
        &config.minio_url,
        &config.minio_bucket,
        &config.minio_access_key,
        &config.minio_secret_key,
    )
    .await;

    let rabbit = RabbitMqService::new(&config.rabbitmq_url).await?;

    let state = AppState::new(
        config.clone(),
        Arc::new(VideoRepository::new(db)),
        Arc::new(S3MediaResourceGateway::new(storage)),
        Arc::new(EncoderRequestPublisher::new(rabbit.clone(), config.encoder_request_queue.clone())),
    );

    let listener_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = workers::encoder_listener::start_encoder_listener(listener_state, rabbit).await {
            error!("❌ Encoder listener failed: {}", e);
        }
    });

    let app = app::create_app(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
