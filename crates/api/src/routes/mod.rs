pub mod health;
pub mod students;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /students                 list, create
/// /students/{id}            update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/students", students::router())
}
