//! Lesson plan aggregate: plans, their activities, and the link records
//! associating activities with plans.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// An instructional unit and the activities it owns.
///
/// `id` is `None` until the plan has been stored for the first time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonPlan {
    pub id: Option<DbId>,
    pub title: String,
    pub summary: Option<String>,
    pub objective: Option<String>,
    pub schedule: Option<String>,
    pub content: Option<String>,
    pub equipment: Option<String>,
    pub completion_standards: Option<String>,
    pub instructor_actions: Option<String>,
    pub student_actions: Option<String>,
    pub activities: Vec<Activity>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl LessonPlan {
    /// Ids of every activity in the plan that has already been stored.
    pub fn activity_ids(&self) -> Vec<DbId> {
        self.activities.iter().filter_map(|a| a.id).collect()
    }
}

/// A timed instructional sub-unit of a lesson plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Activity {
    pub id: Option<DbId>,
    pub title: String,
    /// Duration in seconds.
    pub duration: i64,
    pub activity_type: Option<ActivityType>,
    /// Opaque pointer to a related object, e.g. a quiz.
    pub reference_id: Option<DbId>,
    /// Owning lesson plan. Never exposed on the wire.
    pub lesson_plan_id: Option<DbId>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

/// Join record associating one activity with one lesson plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonPlanActivity {
    pub id: DbId,
    pub lesson_plan_id: DbId,
    pub activity_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A link record that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLessonPlanActivity {
    pub lesson_plan_id: DbId,
    pub activity_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Activity type
// ---------------------------------------------------------------------------

/// Kind of activity. Stored and serialized as its upper-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Lecture,
    Briefing,
    Debriefing,
    Flight,
    Simulator,
    Quiz,
    Reading,
    Video,
    Other,
}

impl ActivityType {
    pub const ALL: [ActivityType; 9] = [
        Self::Lecture,
        Self::Briefing,
        Self::Debriefing,
        Self::Flight,
        Self::Simulator,
        Self::Quiz,
        Self::Reading,
        Self::Video,
        Self::Other,
    ];

    /// Database and wire name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Lecture => "LECTURE",
            Self::Briefing => "BRIEFING",
            Self::Debriefing => "DEBRIEFING",
            Self::Flight => "FLIGHT",
            Self::Simulator => "SIMULATOR",
            Self::Quiz => "QUIZ",
            Self::Reading => "READING",
            Self::Video => "VIDEO",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActivityType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| CoreError::InvalidPayload(format!("Unknown activity type '{s}'")))
    }
}
