use std::{future::Future, sync::Arc};

use axum::http::HeaderValue;
use axum::Router;
use configs::{AppConfig, CorsConfig, ServerConfig};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::{info, warn};

use crate::routes;
use crate::state::AppState;
use service::{
    store::{DocumentStore, SeaOrmDocumentStore},
    RecordService,
};

/// CORS from the configured allow-list; `"*"` mirrors any origin.
pub fn build_cors(cfg: &CorsConfig) -> anyhow::Result<CorsLayer> {
    if cfg.allows_any() {
        return Ok(CorsLayer::very_permissive());
    }
    let origins = cfg
        .allowed_origins
        .iter()
        .map(|o| o.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// `host` may be an IP literal or a name such as `localhost`.
async fn bind_listener(server: &ServerConfig) -> anyhow::Result<TcpListener> {
    Ok(TcpListener::bind((server.host.as_str(), server.port)).await?)
}

/// Router over an already-open store.
pub fn build_app(store: Arc<dyn DocumentStore>, cors: &CorsConfig) -> anyhow::Result<Router> {
    let state = AppState::new(RecordService::new(store));
    Ok(routes::build_router(state, build_cors(cors)?))
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(event = "shutdown_signal", "shutdown signal received");
}

/// Connect the store, serve until `shutdown` resolves, then close the pool.
pub async fn serve<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let db = models::db::connect_with_config(&cfg.database).await?;
    let seaorm = SeaOrmDocumentStore::new(db);
    seaorm.ensure_schema().await?;
    let store: Arc<dyn DocumentStore> = Arc::new(seaorm);

    let app = build_app(Arc::clone(&store), &cfg.cors)?;

    let listener = bind_listener(&cfg.server).await?;
    let addr = listener.local_addr()?;
    info!(%addr, host = %cfg.server.host, origins = ?cfg.cors.allowed_origins, "starting aviation api");
    let served = axum::serve(listener, app).with_graceful_shutdown(shutdown).await;

    // 无论 serve 是否出错都释放连接池
    match store.close().await {
        Ok(()) => info!(event = "db_closed", "database pool closed"),
        Err(e) => warn!(error = %e, "closing database pool failed"),
    }
    served?;
    Ok(())
}

/// Public entry: serve with the given config until Ctrl+C / SIGTERM.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    serve(cfg, shutdown_signal()).await
}
