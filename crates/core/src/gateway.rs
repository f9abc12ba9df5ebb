//! Persistence gateway abstraction.
//!
//! The service layer only talks to storage through [`LessonPlanGateway`].
//! Nothing is loaded implicitly: every association (a plan's activities, a
//! plan's links) is fetched by its own explicit call.

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::lesson_plan::{Activity, LessonPlan, LessonPlanActivity, NewLessonPlanActivity};
use crate::types::DbId;

#[async_trait]
pub trait LessonPlanGateway: Send + Sync {
    /// Cheap round-trip used by health checks.
    async fn ping(&self) -> CoreResult<()>;

    // --- Lesson plans ---

    /// Find a plan row by id. The returned plan's `activities` is empty.
    async fn find_lesson_plan(&self, id: DbId) -> CoreResult<Option<LessonPlan>>;

    /// All plan rows ordered by id, without activities.
    async fn find_all_lesson_plans(&self) -> CoreResult<Vec<LessonPlan>>;

    /// Insert the plan when `id` is `None`, otherwise update it in place.
    ///
    /// Only scalar fields are written; `activities` is ignored. Updating an
    /// id that does not exist fails with `NotFound`.
    async fn save_lesson_plan(&self, plan: &LessonPlan) -> CoreResult<LessonPlan>;

    /// Delete a plan row. Returns `true` if a row was removed.
    async fn delete_lesson_plan(&self, id: DbId) -> CoreResult<bool>;

    // --- Activities ---

    async fn find_activity(&self, id: DbId) -> CoreResult<Option<Activity>>;

    /// Activities whose owning plan is `lesson_plan_id`, ordered by id.
    async fn find_activities_by_lesson_plan(&self, lesson_plan_id: DbId)
        -> CoreResult<Vec<Activity>>;

    /// Insert or update an activity. `updated_at` is refreshed on every save;
    /// `created_at` is set once on insert. Updating an unknown id fails with
    /// `NotFound`.
    async fn save_activity(&self, activity: &Activity) -> CoreResult<Activity>;

    async fn delete_activity(&self, id: DbId) -> CoreResult<bool>;

    // --- Links ---

    /// Link rows for a plan, ordered by id.
    async fn find_links_by_lesson_plan(
        &self,
        lesson_plan_id: DbId,
    ) -> CoreResult<Vec<LessonPlanActivity>>;

    /// Link rows pointing at an activity, ordered by id.
    async fn find_links_by_activity(&self, activity_id: DbId)
        -> CoreResult<Vec<LessonPlanActivity>>;

    async fn save_link(&self, link: &NewLessonPlanActivity) -> CoreResult<LessonPlanActivity>;

    async fn delete_link(&self, id: DbId) -> CoreResult<bool>;
}
