use mimalloc::MiMalloc;
use skillharbour::config::{Config, StorageBackend};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        listen_addr = %cfg.basic.listen_addr,
        backend = ?cfg.storage.backend,
        data_dir = %cfg.storage.data_dir.display(),
        enforce_course_exists = cfg.catalog.enforce_course_exists,
        loglevel = %cfg.basic.loglevel,
    );
    if cfg.basic.cookie_secret.is_none() {
        warn!("basic.cookie_secret not set; sessions will not survive a restart");
    }
    if cfg.storage.backend == StorageBackend::Csv {
        warn!("CSV storage is not safe to share between several server processes");
    }

    let state = skillharbour::router::AppState::build(&cfg).await?;
    let sessions = state.sessions.clone();
    let app = skillharbour::router::app_router(state);

    let listener = TcpListener::bind(&cfg.basic.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.basic.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sessions.stop();
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
