// routes.rs
use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        auction::auction_handler, auth::auth_handler, chat::chat_handler,
        contract::contract_handler, contractor::contractor_handler, review::review_handler,
        users::users_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/users", users_handler().layer(middleware::from_fn(auth)))
        .nest(
            "/contractor",
            contractor_handler().layer(middleware::from_fn(auth)),
        )
        .nest("/auction", auction_handler().layer(middleware::from_fn(auth)))
        .nest(
            "/contract",
            contract_handler().layer(middleware::from_fn(auth)),
        )
        .nest("/chat", chat_handler().layer(middleware::from_fn(auth)))
        .nest("/review", review_handler().layer(middleware::from_fn(auth)))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
