pub mod error;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use chirp_core::store::StateStore;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with the management route and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(store: Arc<dyn StateStore>, bot_name: &str) -> Router {
    let app_state = state::AppState::new(store, bot_name);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/manage",
            get(routes::manage::manage).post(routes::manage::manage),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the management API server.
pub async fn serve(store: Arc<dyn StateStore>, bot_name: &str, port: u16) -> anyhow::Result<()> {
    let app = build_router(store, bot_name);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("management API listening on http://localhost:{port}/api/manage");

    axum::serve(listener, app).await?;
    Ok(())
}
