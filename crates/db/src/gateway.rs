//! [`LessonPlanGateway`] backed by PostgreSQL.

use async_trait::async_trait;
use lessonplans_core::error::{CoreError, CoreResult};
use lessonplans_core::gateway::LessonPlanGateway;
use lessonplans_core::lesson_plan::{
    Activity, LessonPlan, LessonPlanActivity, NewLessonPlanActivity,
};
use lessonplans_core::types::DbId;

use crate::repositories::{ActivityRepo, LessonPlanActivityRepo, LessonPlanRepo};
use crate::DbPool;

/// Wrap a sqlx failure as a storage error, logging the underlying cause.
fn storage_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Database error");
    CoreError::Storage(err.to_string())
}

/// Persistence gateway over a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgGateway {
    pool: DbPool,
}

impl PgGateway {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl LessonPlanGateway for PgGateway {
    async fn ping(&self) -> CoreResult<()> {
        crate::health_check(&self.pool).await.map_err(storage_error)
    }

    async fn find_lesson_plan(&self, id: DbId) -> CoreResult<Option<LessonPlan>> {
        let row = LessonPlanRepo::find_by_id(&self.pool, id)
            .await
            .map_err(storage_error)?;
        Ok(row.map(LessonPlan::from))
    }

    async fn find_all_lesson_plans(&self) -> CoreResult<Vec<LessonPlan>> {
        let rows = LessonPlanRepo::list(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(rows.into_iter().map(LessonPlan::from).collect())
    }

    async fn save_lesson_plan(&self, plan: &LessonPlan) -> CoreResult<LessonPlan> {
        let row = match plan.id {
            None => LessonPlanRepo::create(&self.pool, plan)
                .await
                .map_err(storage_error)?,
            Some(id) => LessonPlanRepo::update(&self.pool, id, plan)
                .await
                .map_err(storage_error)?
                .ok_or(CoreError::NotFound {
                    entity: "LessonPlan",
                    id,
                })?,
        };
        Ok(row.into())
    }

    async fn delete_lesson_plan(&self, id: DbId) -> CoreResult<bool> {
        LessonPlanRepo::delete(&self.pool, id)
            .await
            .map_err(storage_error)
    }

    async fn find_activity(&self, id: DbId) -> CoreResult<Option<Activity>> {
        ActivityRepo::find_by_id(&self.pool, id)
            .await
            .map_err(storage_error)?
            .map(Activity::try_from)
            .transpose()
    }

    async fn find_activities_by_lesson_plan(
        &self,
        lesson_plan_id: DbId,
    ) -> CoreResult<Vec<Activity>> {
        ActivityRepo::list_by_lesson_plan(&self.pool, lesson_plan_id)
            .await
            .map_err(storage_error)?
            .into_iter()
            .map(Activity::try_from)
            .collect()
    }

    async fn save_activity(&self, activity: &Activity) -> CoreResult<Activity> {
        let lesson_plan_id = activity.lesson_plan_id.ok_or_else(|| {
            CoreError::Internal("activity must reference a lesson plan before saving".into())
        })?;
        let row = match activity.id {
            None => ActivityRepo::create(&self.pool, lesson_plan_id, activity)
                .await
                .map_err(storage_error)?,
            Some(id) => ActivityRepo::update(&self.pool, id, lesson_plan_id, activity)
                .await
                .map_err(storage_error)?
                .ok_or(CoreError::NotFound {
                    entity: "Activity",
                    id,
                })?,
        };
        Activity::try_from(row)
    }

    async fn delete_activity(&self, id: DbId) -> CoreResult<bool> {
        ActivityRepo::delete(&self.pool, id)
            .await
            .map_err(storage_error)
    }

    async fn find_links_by_lesson_plan(
        &self,
        lesson_plan_id: DbId,
    ) -> CoreResult<Vec<LessonPlanActivity>> {
        let rows = LessonPlanActivityRepo::list_by_lesson_plan(&self.pool, lesson_plan_id)
            .await
            .map_err(storage_error)?;
        Ok(rows.into_iter().map(LessonPlanActivity::from).collect())
    }

    async fn find_links_by_activity(
        &self,
        activity_id: DbId,
    ) -> CoreResult<Vec<LessonPlanActivity>> {
        let rows = LessonPlanActivityRepo::list_by_activity(&self.pool, activity_id)
            .await
            .map_err(storage_error)?;
        Ok(rows.into_iter().map(LessonPlanActivity::from).collect())
    }

    async fn save_link(&self, link: &NewLessonPlanActivity) -> CoreResult<LessonPlanActivity> {
        let row = LessonPlanActivityRepo::create(&self.pool, link)
            .await
            .map_err(storage_error)?;
        Ok(row.into())
    }

    async fn delete_link(&self, id: DbId) -> CoreResult<bool> {
        LessonPlanActivityRepo::delete(&self.pool, id)
            .await
            .map_err(storage_error)
    }
}
