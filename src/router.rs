use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, health, users},
    middleware::auth::{require_admin, require_auth},
    state::AppState,
};

/// Builds the full HTTP application.
///
/// - `/healthz`, `/health/*` and `/auth/*` are public
/// - `/api/v1/*` requires a bearer token
/// - `/api/v1/admin/*` additionally requires the administrator
pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/users/set-password", post(auth::admin_set_password))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let api_routes = Router::new()
        .route("/users", post(users::create_user).get(users::list_users))
        .route("/users/me", get(users::me))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .nest("/admin", admin_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    Router::new()
        .route("/healthz", get(health::health_check))
        .route("/health/liveness", get(health::health_check))
        .route("/health/readiness", get(health::readiness))
        .nest("/auth", auth_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
