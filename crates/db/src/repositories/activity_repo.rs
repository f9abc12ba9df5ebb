//! Repository for the `activities` table.

use lessonplans_core::lesson_plan::Activity;
use lessonplans_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::ActivityRow;

const COLUMNS: &str = "id, lesson_plan_id, title, duration, type AS activity_type, \
     reference_id, created_at, updated_at";

/// Provides CRUD operations for activities.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Insert a new activity owned by `lesson_plan_id`.
    pub async fn create(
        pool: &PgPool,
        lesson_plan_id: DbId,
        input: &Activity,
    ) -> Result<ActivityRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (lesson_plan_id, title, duration, type, reference_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityRow>(&query)
            .bind(lesson_plan_id)
            .bind(&input.title)
            .bind(input.duration)
            .bind(input.activity_type.map(|t| t.name()))
            .bind(input.reference_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ActivityRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE id = $1");
        sqlx::query_as::<_, ActivityRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the activities owned by a lesson plan, ordered by ID.
    pub async fn list_by_lesson_plan(
        pool: &PgPool,
        lesson_plan_id: DbId,
    ) -> Result<Vec<ActivityRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM activities WHERE lesson_plan_id = $1 ORDER BY id");
        sqlx::query_as::<_, ActivityRow>(&query)
            .bind(lesson_plan_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite an activity's fields, keeping `created_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        lesson_plan_id: DbId,
        input: &Activity,
    ) -> Result<Option<ActivityRow>, sqlx::Error> {
        let query = format!(
            "UPDATE activities SET
                lesson_plan_id = $2,
                title = $3,
                duration = $4,
                type = $5,
                reference_id = $6,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityRow>(&query)
            .bind(id)
            .bind(lesson_plan_id)
            .bind(&input.title)
            .bind(input.duration)
            .bind(input.activity_type.map(|t| t.name()))
            .bind(input.reference_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an activity by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
