use contact_front::config::AppConfig;
use contact_front::db::MySqlConnector;
use contact_front::error::AppError;
use contact_front::pages::Pages;
use contact_front::router::{AppState, app_router};
use contact_front::service::{Environment, Resolver, SessionGuard};
use mimalloc::MiMalloc;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let cfg = AppConfig::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        bind_host = %cfg.bind_host,
        port = cfg.port,
        loglevel = %cfg.loglevel,
        templates = %cfg.templates_dir.display()
    );

    let resolver = Resolver::new(MySqlConnector, Environment::from_process());
    let guard = SessionGuard::new(resolver);
    if !guard.start().await {
        warn!("datastore unavailable at startup; serving pages in degraded mode");
    }

    let state = AppState::new(guard, Pages::new(cfg.templates_dir.clone()));
    let app = app_router(state);

    let addr = SocketAddr::new(cfg.bind_host, cfg.port);
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
