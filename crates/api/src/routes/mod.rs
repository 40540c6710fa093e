pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree.
///
/// ```text
/// /                     liveness message
/// /health               service + database health
/// /projects/            list, create
/// /projects/{id}        get, patch, delete
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(project::router())
}
