//! Repository for the `lesson_plan_activities` join table.

use lessonplans_core::lesson_plan::NewLessonPlanActivity;
use lessonplans_core::types::DbId;
use sqlx::PgPool;

use crate::models::lesson_plan_activity::LessonPlanActivityRow;

const COLUMNS: &str = "id, lesson_plan_id, activity_id, created_at, updated_at";

/// Provides link operations between lesson plans and activities.
pub struct LessonPlanActivityRepo;

impl LessonPlanActivityRepo {
    /// Insert a link. Violates `uq_lesson_plan_activities_pair` if the pair
    /// is already linked.
    pub async fn create(
        pool: &PgPool,
        input: &NewLessonPlanActivity,
    ) -> Result<LessonPlanActivityRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO lesson_plan_activities (lesson_plan_id, activity_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LessonPlanActivityRow>(&query)
            .bind(input.lesson_plan_id)
            .bind(input.activity_id)
            .bind(input.created_at)
            .bind(input.updated_at)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_lesson_plan(
        pool: &PgPool,
        lesson_plan_id: DbId,
    ) -> Result<Vec<LessonPlanActivityRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lesson_plan_activities WHERE lesson_plan_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, LessonPlanActivityRow>(&query)
            .bind(lesson_plan_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_activity(
        pool: &PgPool,
        activity_id: DbId,
    ) -> Result<Vec<LessonPlanActivityRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lesson_plan_activities WHERE activity_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, LessonPlanActivityRow>(&query)
            .bind(activity_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a link by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lesson_plan_activities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
