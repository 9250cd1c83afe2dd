pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use dialback_core::CallScheduler;
use tower_http::cors::{Any, CorsLayer};

/// Build the axum Router with all routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(scheduler: CallScheduler) -> Router {
    let app_state = state::AppState::new(scheduler);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index::index_page))
        .route("/schedule", post(routes::schedule::schedule_call))
        .route("/status", get(routes::status::get_status))
        .layer(cors)
        .with_state(app_state)
}

/// Start the dialback HTTP server.
pub async fn serve(scheduler: CallScheduler, port: u16) -> anyhow::Result<()> {
    let app = build_router(scheduler);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("dialback listening on http://localhost:{port}");

    axum::serve(listener, app).await?;
    Ok(())
}
