use std::{error::Error, sync::Arc};

use tasklist_server::{
    app_state::{AppState, SharedState},
    map_routes,
    settings::Settings,
    task_store::TaskStore,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // ── Settings ───────────────────────────────────────────────
    let settings = Settings::load()?;

    // ── Task store ─────────────────────────────────────────────
    let task_store = TaskStore::new(&settings.data_file);
    match task_store.load().await {
        Ok(existing) => tracing::info!(
            path = %task_store.path().display(),
            tasks = existing.len(),
            "task store ready"
        ),
        // Requests surface this as 500s until the file is fixed
        Err(e) => tracing::warn!(
            path = %task_store.path().display(),
            error = %e,
            "backing file unreadable"
        ),
    }

    // ── Shared state + router ──────────────────────────────────
    let state: SharedState = Arc::new(AppState { task_store });
    let app = map_routes(state, &settings);

    // ── Start ──────────────────────────────────────────────────
    let addr = settings.socket_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{addr}");
    if let Some(dir) = &settings.static_dir {
        tracing::info!(dir = %dir.display(), "serving client assets");
    }

    axum::serve(listener, app).await?;
    Ok(())
}
