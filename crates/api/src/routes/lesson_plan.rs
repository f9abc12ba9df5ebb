//! Route definitions for the `/lessonplans` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::lesson_plan;
use crate::state::AppState;

/// Routes mounted at `/lessonplans`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// PUT    /                  -> update
/// GET    /{id}              -> get_by_id
/// DELETE /{id}              -> delete
/// GET    /{id}/activities   -> list_activities
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(lesson_plan::list)
                .post(lesson_plan::create)
                .put(lesson_plan::update),
        )
        .route(
            "/{id}",
            get(lesson_plan::get_by_id).delete(lesson_plan::delete),
        )
        .route("/{id}/activities", get(lesson_plan::list_activities))
}
