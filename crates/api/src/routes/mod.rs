pub mod health;
pub mod lesson_plan;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /lessonplans                      list, create, update (id in body)
/// /lessonplans/{id}                 get, delete
/// /lessonplans/{id}/activities      linked activities
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/lessonplans", lesson_plan::router())
}
