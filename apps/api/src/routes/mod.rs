pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/generate-training-program",
            post(handlers::handle_generate_program),
        )
        .route(
            "/test-ai-connection",
            post(handlers::handle_test_connection),
        )
        .route("/simple-question", post(handlers::handle_simple_question))
        .with_state(state)
}
