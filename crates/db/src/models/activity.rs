//! Activity row model.

use lessonplans_core::error::CoreError;
use lessonplans_core::lesson_plan::{Activity, ActivityType};
use lessonplans_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `activities` table.
///
/// The `type` column is selected as `activity_type`.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityRow {
    pub id: DbId,
    pub lesson_plan_id: DbId,
    pub title: String,
    pub duration: i64,
    pub activity_type: Option<String>,
    pub reference_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<ActivityRow> for Activity {
    type Error = CoreError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        let activity_type = row
            .activity_type
            .as_deref()
            .map(str::parse::<ActivityType>)
            .transpose()
            .map_err(|e| CoreError::Storage(format!("activity {}: {e}", row.id)))?;

        Ok(Activity {
            id: Some(row.id),
            title: row.title,
            duration: row.duration,
            activity_type,
            reference_id: row.reference_id,
            lesson_plan_id: Some(row.lesson_plan_id),
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        })
    }
}
