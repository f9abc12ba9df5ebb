//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the requirement, so handlers enforce authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lessonplans_core::error::CoreError;
use lessonplans_core::roles::can_manage_lesson_plans;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires `admin` or `instructor` role. Rejects with 403 otherwise.
///
/// ```ignore
/// async fn handler(RequireLessonPlanManager(user): RequireLessonPlanManager) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireLessonPlanManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireLessonPlanManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_manage_lesson_plans(&user.role) {
            tracing::warn!(user_id = user.user_id, role = %user.role, "Lesson plan access denied");
            return Err(AppError::Core(CoreError::AccessDenied(format!(
                "User {} with role '{}' requires admin or instructor role",
                user.user_id, user.role
            ))));
        }
        Ok(RequireLessonPlanManager(user))
    }
}
