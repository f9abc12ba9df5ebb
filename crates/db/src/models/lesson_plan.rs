//! Lesson plan row model.

use lessonplans_core::lesson_plan::LessonPlan;
use lessonplans_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `lesson_plans` table.
#[derive(Debug, Clone, FromRow)]
pub struct LessonPlanRow {
    pub id: DbId,
    pub title: String,
    pub summary: Option<String>,
    pub objective: Option<String>,
    pub schedule: Option<String>,
    pub content: Option<String>,
    pub equipment: Option<String>,
    pub completion_standards: Option<String>,
    pub instructor_actions: Option<String>,
    pub student_actions: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<LessonPlanRow> for LessonPlan {
    /// Activities are loaded by a separate query and start out empty.
    fn from(row: LessonPlanRow) -> Self {
        LessonPlan {
            id: Some(row.id),
            title: row.title,
            summary: row.summary,
            objective: row.objective,
            schedule: row.schedule,
            content: row.content,
            equipment: row.equipment,
            completion_standards: row.completion_standards,
            instructor_actions: row.instructor_actions,
            student_actions: row.student_actions,
            activities: Vec::new(),
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}
