//! Wire representations of lesson plans and activities.
//!
//! Each wire type has exactly one mapping pair with its domain entity,
//! expressed as `From` impls in both directions.

use lessonplans_core::error::CoreError;
use lessonplans_core::lesson_plan::{Activity, ActivityType, LessonPlan};
use lessonplans_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Lesson plan as sent and received over HTTP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LessonPlanDto {
    pub id: Option<DbId>,
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub summary: Option<String>,
    #[validate(length(max = 2000))]
    pub objective: Option<String>,
    #[validate(length(max = 2000))]
    pub schedule: Option<String>,
    #[validate(length(max = 10000))]
    pub content: Option<String>,
    #[validate(length(max = 2000))]
    pub equipment: Option<String>,
    #[validate(length(max = 2000))]
    pub completion_standards: Option<String>,
    #[validate(length(max = 10000))]
    pub instructor_actions: Option<String>,
    #[validate(length(max = 10000))]
    pub student_actions: Option<String>,
    #[serde(default)]
    pub activities: Vec<ActivityDto>,
}

/// Activity as sent and received over HTTP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDto {
    pub id: Option<DbId>,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "title must be 1-100 characters"))]
    pub title: String,
    /// Duration in seconds.
    #[serde(default)]
    #[validate(range(min = 0, message = "duration must not be negative"))]
    pub duration: i64,
    pub activity_type: Option<ActivityType>,
    pub reference_id: Option<DbId>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl LessonPlanDto {
    /// Check structure and content, naming every failing field.
    pub fn validate_payload(&self) -> Result<(), CoreError> {
        let mut problems = Vec::new();
        if let Err(errors) = self.validate() {
            problems.push(errors.to_string());
        }
        for (index, activity) in self.activities.iter().enumerate() {
            if let Err(errors) = activity.validate() {
                problems.push(format!("activities[{index}]: {errors}"));
            }
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidPayload(problems.join("; ")))
        }
    }

    /// Like [`validate_payload`](Self::validate_payload), but also requires
    /// an id so the plan can be updated in place.
    pub fn validate_for_update(&self) -> Result<DbId, CoreError> {
        let id = self
            .id
            .ok_or_else(|| CoreError::InvalidPayload("id is required for update".into()))?;
        self.validate_payload()?;
        Ok(id)
    }
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

impl From<LessonPlan> for LessonPlanDto {
    fn from(plan: LessonPlan) -> Self {
        Self {
            id: plan.id,
            title: plan.title,
            summary: plan.summary,
            objective: plan.objective,
            schedule: plan.schedule,
            content: plan.content,
            equipment: plan.equipment,
            completion_standards: plan.completion_standards,
            instructor_actions: plan.instructor_actions,
            student_actions: plan.student_actions,
            activities: plan.activities.into_iter().map(ActivityDto::from).collect(),
        }
    }
}

impl From<LessonPlanDto> for LessonPlan {
    /// Server-managed timestamps are left unset.
    fn from(dto: LessonPlanDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            summary: dto.summary,
            objective: dto.objective,
            schedule: dto.schedule,
            content: dto.content,
            equipment: dto.equipment,
            completion_standards: dto.completion_standards,
            instructor_actions: dto.instructor_actions,
            student_actions: dto.student_actions,
            activities: dto.activities.into_iter().map(Activity::from).collect(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl From<Activity> for ActivityDto {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id,
            title: activity.title,
            duration: activity.duration,
            activity_type: activity.activity_type,
            reference_id: activity.reference_id,
            created_at: activity.created_at,
            updated_at: activity.updated_at,
        }
    }
}

impl From<ActivityDto> for Activity {
    /// The owning plan is never taken from the wire.
    fn from(dto: ActivityDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            duration: dto.duration,
            activity_type: dto.activity_type,
            reference_id: dto.reference_id,
            lesson_plan_id: None,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const SHORT_TEXT_MAX: usize = 2_000;
    const LONG_TEXT_MAX: usize = 10_000;

    fn activity_dto() -> ActivityDto {
        ActivityDto {
            id: Some(3),
            title: "Preflight".to_string(),
            duration: 600,
            activity_type: Some(ActivityType::Lecture),
            reference_id: Some(17),
            created_at: Some(chrono::Utc::now()),
            updated_at: Some(chrono::Utc::now()),
        }
    }

    fn plan_dto() -> LessonPlanDto {
        LessonPlanDto {
            id: Some(1),
            title: "PPL Ground 1".to_string(),
            summary: Some("Systems overview".to_string()),
            objective: Some("Describe the fuel system".to_string()),
            schedule: Some("Week 1".to_string()),
            content: Some("Engine, fuel, electrical".to_string()),
            equipment: Some("POH".to_string()),
            completion_standards: Some("Oral quiz".to_string()),
            instructor_actions: Some("Lecture".to_string()),
            student_actions: Some("Take notes".to_string()),
            activities: vec![activity_dto()],
        }
    }

    #[test]
    fn dto_to_entity_and_back_preserves_fields() {
        let dto = plan_dto();
        let round_tripped = LessonPlanDto::from(LessonPlan::from(dto.clone()));
        assert_eq!(round_tripped, dto);
    }

    #[test]
    fn entity_to_dto_and_back_preserves_scalars() {
        let entity = LessonPlan::from(plan_dto());
        let back = LessonPlan::from(LessonPlanDto::from(entity.clone()));
        assert_eq!(back, entity);
    }

    #[test]
    fn owning_plan_is_not_taken_from_wire() {
        let activity = Activity::from(activity_dto());
        assert_eq!(activity.lesson_plan_id, None);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(plan_dto()).unwrap();
        assert_eq!(json["completionStandards"], "Oral quiz");
        assert_eq!(json["instructorActions"], "Lecture");
        assert_eq!(json["activities"][0]["activityType"], "LECTURE");
        assert_eq!(json["activities"][0]["referenceId"], 17);
    }

    #[test]
    fn missing_activities_deserialize_as_empty() {
        let dto: LessonPlanDto = serde_json::from_str(r#"{"title":"Solo"}"#).unwrap();
        assert!(dto.activities.is_empty());
        assert_eq!(dto.id, None);
    }

    #[test]
    fn valid_payload_passes() {
        assert!(plan_dto().validate_payload().is_ok());
    }

    #[test]
    fn empty_title_is_invalid() {
        let dto = LessonPlanDto {
            title: String::new(),
            ..plan_dto()
        };
        assert_matches!(
            dto.validate_payload(),
            Err(CoreError::InvalidPayload(msg)) if msg.contains("title")
        );
    }

    #[test]
    fn overlong_summary_is_invalid() {
        let dto = LessonPlanDto {
            summary: Some("x".repeat(SHORT_TEXT_MAX + 1)),
            ..plan_dto()
        };
        assert_matches!(
            dto.validate_payload(),
            Err(CoreError::InvalidPayload(msg)) if msg.contains("summary")
        );
    }

    #[test]
    fn overlong_content_is_invalid() {
        let dto = LessonPlanDto {
            content: Some("x".repeat(LONG_TEXT_MAX + 1)),
            ..plan_dto()
        };
        assert!(dto.validate_payload().is_err());
    }

    #[test]
    fn negative_activity_duration_is_invalid() {
        let mut dto = plan_dto();
        dto.activities.push(ActivityDto {
            duration: -5,
            ..activity_dto()
        });
        assert_matches!(
            dto.validate_payload(),
            Err(CoreError::InvalidPayload(msg)) if msg.contains("activities[1]")
        );
    }

    #[test]
    fn update_requires_id() {
        let dto = LessonPlanDto {
            id: None,
            ..plan_dto()
        };
        assert_matches!(
            dto.validate_for_update(),
            Err(CoreError::InvalidPayload(msg)) if msg.contains("id")
        );
        assert_eq!(plan_dto().validate_for_update().unwrap(), 1);
    }
}
