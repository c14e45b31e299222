// HTTP routes configuration

use crate::core::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Public endpoints
        .route("/signup", post(crate::handlers::signup::signup_handler))
        .route("/signin", post(crate::handlers::signin::signin_handler))
        .route("/checksteamauth", get(crate::handlers::steam_check::steam_check_handler))
        .route("/checkcreds", get(crate::handlers::check_creds::check_creds_handler))
        .route("/checkauth", get(crate::handlers::check_auth::check_auth_handler))
        .route("/health", get(crate::handlers::health::health_handler))

        // Operator endpoint (requires API key)
        .route("/metrics", get(crate::handlers::metrics::metrics_handler))

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state)
}
