//! Lesson plan / activity link row model.

use lessonplans_core::lesson_plan::LessonPlanActivity;
use lessonplans_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `lesson_plan_activities` join table.
#[derive(Debug, Clone, FromRow)]
pub struct LessonPlanActivityRow {
    pub id: DbId,
    pub lesson_plan_id: DbId,
    pub activity_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<LessonPlanActivityRow> for LessonPlanActivity {
    fn from(row: LessonPlanActivityRow) -> Self {
        LessonPlanActivity {
            id: row.id,
            lesson_plan_id: row.lesson_plan_id,
            activity_id: row.activity_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
