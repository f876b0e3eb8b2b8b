use duoscope::{
    config::AppConfig,
    duo::InMemoryDuoRepository,
    shared::{cors_layer, router, AppState},
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "duoscope=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Invalid configuration");
            std::process::exit(1);
        }
    };

    info!(
        port = config.port,
        origins = config.allowed_origins.len(),
        "Starting duo analytics server"
    );

    let duo_repository = Arc::new(InMemoryDuoRepository::with_limits(config.retention));
    let cors = cors_layer(&config);
    let port = config.port;
    let app_state = AppState::new(duo_repository, config);

    let app = router(app_state).layer(cors);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .unwrap();
    info!("Server running on http://localhost:{}", port);
    axum::serve(listener, app).await.unwrap();
}
