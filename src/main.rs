use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use pes_buddy::adapters::auth::JwtTokenVerifier;
use pes_buddy::adapters::http::{self, AppState};
use pes_buddy::adapters::postgres::{
    PgBookingRepository, PgCatalogReader, PgExpenseRepository, PgNotificationRepository,
    PgOrderRepository, PgScooterRepository,
};
use pes_buddy::adapters::ws::{self, ConnectionRegistry, LiveState};
use pes_buddy::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let registry = Arc::new(ConnectionRegistry::new());
    let verifier = Arc::new(JwtTokenVerifier::new(&config.auth.jwt_secret));

    let state = AppState::assemble(
        verifier.clone(),
        registry.clone(),
        Arc::new(PgOrderRepository::new(pool.clone())),
        Arc::new(PgCatalogReader::new(pool.clone())),
        Arc::new(PgScooterRepository::new(pool.clone())),
        Arc::new(PgBookingRepository::new(pool.clone())),
        Arc::new(PgExpenseRepository::new(pool.clone())),
        Arc::new(PgNotificationRepository::new(pool)),
    );

    let live = LiveState {
        registry,
        verifier,
    };

    let app = http::router(state)
        .merge(ws::routes(live))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "pes-buddy listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
