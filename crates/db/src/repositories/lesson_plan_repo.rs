//! Repository for the `lesson_plans` table.

use lessonplans_core::lesson_plan::LessonPlan;
use lessonplans_core::types::DbId;
use sqlx::PgPool;

use crate::models::lesson_plan::LessonPlanRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, summary, objective, schedule, content, equipment, \
     completion_standards, instructor_actions, student_actions, created_at, updated_at";

/// Provides CRUD operations for lesson plans.
pub struct LessonPlanRepo;

impl LessonPlanRepo {
    /// Insert a new lesson plan, returning the created row.
    ///
    /// `input.id` and `input.activities` are ignored.
    pub async fn create(pool: &PgPool, input: &LessonPlan) -> Result<LessonPlanRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO lesson_plans (title, summary, objective, schedule, content, equipment,
                 completion_standards, instructor_actions, student_actions)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LessonPlanRow>(&query)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(&input.objective)
            .bind(&input.schedule)
            .bind(&input.content)
            .bind(&input.equipment)
            .bind(&input.completion_standards)
            .bind(&input.instructor_actions)
            .bind(&input.student_actions)
            .fetch_one(pool)
            .await
    }

    /// Find a lesson plan by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LessonPlanRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lesson_plans WHERE id = $1");
        sqlx::query_as::<_, LessonPlanRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all lesson plans ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<LessonPlanRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lesson_plans ORDER BY id");
        sqlx::query_as::<_, LessonPlanRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every scalar field of a lesson plan and bump `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &LessonPlan,
    ) -> Result<Option<LessonPlanRow>, sqlx::Error> {
        let query = format!(
            "UPDATE lesson_plans SET
                title = $2,
                summary = $3,
                objective = $4,
                schedule = $5,
                content = $6,
                equipment = $7,
                completion_standards = $8,
                instructor_actions = $9,
                student_actions = $10,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LessonPlanRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(&input.objective)
            .bind(&input.schedule)
            .bind(&input.content)
            .bind(&input.equipment)
            .bind(&input.completion_standards)
            .bind(&input.instructor_actions)
            .bind(&input.student_actions)
            .fetch_optional(pool)
            .await
    }

    /// Delete a lesson plan by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lesson_plans WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
