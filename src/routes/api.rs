use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, speak};
use crate::middleware::with_cors_headers;
use crate::state::AppState;
use std::sync::Arc;

/// Create the API router.
///
/// The speak endpoint is mounted at `/speak` and at `/`, so a function URL
/// pointed at the root behaves the same as the named route.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(api::health_check)
                .post(speak::speak_handler)
                .options(speak::preflight_handler),
        )
        .route(
            "/speak",
            post(speak::speak_handler).options(speak::preflight_handler),
        )
        .layer(TraceLayer::new_for_http())
}

/// Router with state and the CORS header layer applied, ready to serve.
pub fn create_app(state: Arc<AppState>) -> Router {
    with_cors_headers(create_api_router().with_state(state))
}
