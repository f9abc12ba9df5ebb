//! Handlers for the `/lessonplans` resource.
//!
//! Reads go through the lesson plan cache first and fall back to the
//! service, populating the cache on a miss. Writes refresh the cached entry
//! with the stored value. Deletes purge the entry only after the service
//! has confirmed the deletion.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lessonplans_core::error::CoreError;
use lessonplans_core::lesson_plan::LessonPlan;
use lessonplans_core::types::DbId;

use crate::dto::{ActivityDto, LessonPlanDto};
use crate::error::AppResult;
use crate::middleware::rbac::RequireLessonPlanManager;
use crate::state::AppState;

/// Unwrap the result of `store`, which only yields `None` for `None` input.
fn stored(plan: Option<LessonPlan>) -> AppResult<LessonPlan> {
    plan.ok_or_else(|| CoreError::Internal("store returned no lesson plan".into()).into())
}

/// POST /lessonplans
pub async fn create(
    State(state): State<AppState>,
    RequireLessonPlanManager(user): RequireLessonPlanManager,
    payload: Result<Json<LessonPlanDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<LessonPlanDto>)> {
    let Json(input) = payload?;
    input.validate_payload()?;

    let mut plan = LessonPlan::from(input);
    plan.id = None;
    let plan = stored(state.service.store(Some(plan)).await?)?;

    if let Some(id) = plan.id {
        state.cache.put(id, plan.clone()).await;
        tracing::info!(lesson_plan_id = id, user_id = user.user_id, "Lesson plan created");
    }
    Ok((StatusCode::CREATED, Json(plan.into())))
}

/// GET /lessonplans
pub async fn list(
    State(state): State<AppState>,
    RequireLessonPlanManager(_user): RequireLessonPlanManager,
) -> AppResult<Json<Vec<LessonPlanDto>>> {
    let plans = state.service.get_all().await?;
    Ok(Json(plans.into_iter().map(LessonPlanDto::from).collect()))
}

/// GET /lessonplans/{id}
///
/// A miss racing a concurrent DELETE can re-cache the deleted plan until the
/// entry expires; reads and deletes of one id are not coordinated.
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireLessonPlanManager(_user): RequireLessonPlanManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<LessonPlanDto>> {
    if let Some(plan) = state.cache.get(&id).await {
        tracing::debug!(lesson_plan_id = id, "Lesson plan cache hit");
        return Ok(Json(plan.into()));
    }

    tracing::debug!(lesson_plan_id = id, "Lesson plan cache miss");
    let plan = state.service.get(id).await?;
    state.cache.put(id, plan.clone()).await;
    Ok(Json(plan.into()))
}

/// PUT /lessonplans
///
/// The plan id travels in the body.
pub async fn update(
    State(state): State<AppState>,
    RequireLessonPlanManager(user): RequireLessonPlanManager,
    payload: Result<Json<LessonPlanDto>, JsonRejection>,
) -> AppResult<Json<LessonPlanDto>> {
    let Json(input) = payload?;
    let id = input.validate_for_update()?;

    let plan = stored(state.service.store(Some(LessonPlan::from(input))).await?)?;
    // `store` already reconciled the links; this pass reports the counts.
    let summary = state.service.link_activities(id, &plan.activities).await?;

    state.cache.put(id, plan.clone()).await;
    tracing::info!(
        lesson_plan_id = id,
        user_id = user.user_id,
        links_created = summary.created,
        links_removed = summary.removed,
        "Lesson plan updated"
    );
    Ok(Json(plan.into()))
}

/// DELETE /lessonplans/{id}
///
/// Responds with the plan as it was before deletion.
pub async fn delete(
    State(state): State<AppState>,
    RequireLessonPlanManager(user): RequireLessonPlanManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<LessonPlanDto>> {
    let deleted = state.service.delete(id).await?;
    state.cache.remove(&id).await;
    tracing::info!(lesson_plan_id = id, user_id = user.user_id, "Lesson plan deleted");
    Ok(Json(deleted.into()))
}

/// GET /lessonplans/{id}/activities
pub async fn list_activities(
    State(state): State<AppState>,
    RequireLessonPlanManager(_user): RequireLessonPlanManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<ActivityDto>>> {
    let activities = state.service.get_activities_for_lesson_plan(id).await?;
    Ok(Json(activities.into_iter().map(ActivityDto::from).collect()))
}
