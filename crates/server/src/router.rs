use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/sessions", post(handlers::create_session_handler))
        .route("/sessions/{id}/chat", post(handlers::chat_handler))
        .route("/sessions/{id}/history", get(handlers::history_handler))
        .route("/sessions/{id}/answer", get(handlers::download_answer_handler))
        .route("/sessions/{id}/feedback", post(handlers::feedback_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
