mod routes;
mod services;
mod state;

use std::sync::Arc;

use backend::{Backend, BackendConfig, MemoryBackend, RestBackend};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let backend = build_backend().expect("backend init failed");
    let state = state::AppState::new(backend);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "site api listening");
    axum::serve(listener, app).await.expect("server failed");
}

/// REST client from env, or an empty in-memory schema when
/// `BACKEND_MODE=memory` (local development without a hosted project).
fn build_backend() -> Result<Arc<dyn Backend>, String> {
    if std::env::var("BACKEND_MODE").is_ok_and(|m| m.eq_ignore_ascii_case("memory")) {
        tracing::warn!("BACKEND_MODE=memory: data is kept in-process and lost on exit");
        return Ok(Arc::new(MemoryBackend::with_site_schema()));
    }

    let config = BackendConfig::from_env().map_err(|e| e.to_string())?;
    let role = config.strongest_role();
    let client = RestBackend::new(&config, role).map_err(|e| e.to_string())?;
    tracing::info!(url = %config.url, role = ?role, "hosted backend configured");
    Ok(Arc::new(client))
}
