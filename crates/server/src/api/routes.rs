use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::{convert, formats, handlers, middleware::metrics_middleware};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let ui_dir = state.config().ui.dir.clone();

    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Format catalog and sniffing
        .route("/formats", get(formats::list_formats))
        .route("/format", get(formats::resolve_format))
        // Conversion
        .route("/convert", post(convert::convert))
        .route("/pmc", get(convert::fetch_pmc))
        .with_state(state);

    // Serve the UI bundle with index fallback
    let serve_dir = ServeDir::new(&ui_dir).fallback(ServeFile::new(ui_dir.join("index.html")));

    Router::new()
        .nest("/api", api_routes)
        .route("/metrics", get(handlers::metrics))
        .fallback_service(serve_dir)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
