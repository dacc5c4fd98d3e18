//! Router configuration.

use axum::routing::{delete, get, post, put};
use axum::Router;
use surrealdb::Connection;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod auth;
mod health;
mod organization;

/// Build the full application router.
pub fn app<C: Connection>(state: AppState<C>) -> Router {
    Router::new()
        .route("/org/create", post(organization::create_organization::<C>))
        .route("/org/get", get(organization::get_organization::<C>))
        .route("/org/update", put(organization::update_organization::<C>))
        .route("/org/delete", delete(organization::delete_organization::<C>))
        .route("/admin/login", post(auth::login::<C>))
        .route("/admin/me", get(auth::me::<C>))
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
