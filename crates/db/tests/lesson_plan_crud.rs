//! Integration tests for the lesson plan repositories and `PgGateway`.
//!
//! Runs against a real PostgreSQL database provisioned by `sqlx::test`:
//! - Create / update / delete round trips
//! - Cascade delete from plans to activities and links
//! - Unique constraint on link pairs
//! - Full service flow through the gateway

use std::sync::Arc;

use assert_matches::assert_matches;
use lessonplans_core::error::CoreError;
use lessonplans_core::gateway::LessonPlanGateway;
use lessonplans_core::lesson_plan::{Activity, ActivityType, LessonPlan, NewLessonPlanActivity};
use lessonplans_core::service::LessonPlanService;
use lessonplans_db::repositories::{ActivityRepo, LessonPlanActivityRepo, LessonPlanRepo};
use lessonplans_db::PgGateway;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_plan(title: &str) -> LessonPlan {
    LessonPlan {
        title: title.to_string(),
        summary: Some("Summary".to_string()),
        equipment: Some("Headset, kneeboard".to_string()),
        ..Default::default()
    }
}

fn new_activity(title: &str, duration: i64) -> Activity {
    Activity {
        title: title.to_string(),
        duration,
        activity_type: Some(ActivityType::Lecture),
        reference_id: Some(42),
        ..Default::default()
    }
}

fn new_link(lesson_plan_id: i64, activity_id: i64) -> NewLessonPlanActivity {
    let now = chrono::Utc::now();
    NewLessonPlanActivity {
        lesson_plan_id,
        activity_id,
        created_at: now,
        updated_at: now,
    }
}

// ---------------------------------------------------------------------------
// Repositories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find_lesson_plan(pool: PgPool) {
    let created = LessonPlanRepo::create(&pool, &new_plan("PPL Ground 1"))
        .await
        .unwrap();
    assert_eq!(created.title, "PPL Ground 1");

    let found = LessonPlanRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("plan should exist");
    assert_eq!(found.equipment.as_deref(), Some("Headset, kneeboard"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_lesson_plan_bumps_updated_at(pool: PgPool) {
    let created = LessonPlanRepo::create(&pool, &new_plan("Original"))
        .await
        .unwrap();

    let mut input = new_plan("Renamed");
    input.summary = None;
    let updated = LessonPlanRepo::update(&pool, created.id, &input)
        .await
        .unwrap()
        .expect("row should be updated");

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.summary, None);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_lesson_plan_returns_none(pool: PgPool) {
    let result = LessonPlanRepo::update(&pool, 999_999, &new_plan("Nobody"))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_activity_type_round_trips(pool: PgPool) {
    let plan = LessonPlanRepo::create(&pool, &new_plan("Types")).await.unwrap();
    let row = ActivityRepo::create(&pool, plan.id, &new_activity("Preflight", 600))
        .await
        .unwrap();
    assert_eq!(row.activity_type.as_deref(), Some("LECTURE"));

    let activity = Activity::try_from(row).unwrap();
    assert_eq!(activity.activity_type, Some(ActivityType::Lecture));
    assert_eq!(activity.duration, 600);
    assert_eq!(activity.reference_id, Some(42));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_negative_duration_is_rejected(pool: PgPool) {
    let plan = LessonPlanRepo::create(&pool, &new_plan("Checks")).await.unwrap();
    let result = ActivityRepo::create(&pool, plan.id, &new_activity("Backwards", -1)).await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_link_violates_unique_constraint(pool: PgPool) {
    let plan = LessonPlanRepo::create(&pool, &new_plan("Links")).await.unwrap();
    let activity = ActivityRepo::create(&pool, plan.id, &new_activity("Preflight", 600))
        .await
        .unwrap();

    LessonPlanActivityRepo::create(&pool, &new_link(plan.id, activity.id))
        .await
        .unwrap();
    let err = LessonPlanActivityRepo::create(&pool, &new_link(plan.id, activity.id))
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_lesson_plan_activities_pair"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_lesson_plan_cascades(pool: PgPool) {
    let plan = LessonPlanRepo::create(&pool, &new_plan("Cascade")).await.unwrap();
    let activity = ActivityRepo::create(&pool, plan.id, &new_activity("Preflight", 600))
        .await
        .unwrap();
    LessonPlanActivityRepo::create(&pool, &new_link(plan.id, activity.id))
        .await
        .unwrap();

    assert!(LessonPlanRepo::delete(&pool, plan.id).await.unwrap());

    assert!(ActivityRepo::find_by_id(&pool, activity.id)
        .await
        .unwrap()
        .is_none());
    assert!(LessonPlanActivityRepo::list_by_lesson_plan(&pool, plan.id)
        .await
        .unwrap()
        .is_empty());
    assert!(!LessonPlanRepo::delete(&pool, plan.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Gateway + service
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_gateway_update_unknown_plan_is_not_found(pool: PgPool) {
    let gateway = PgGateway::new(pool);
    let mut plan = new_plan("Ghost");
    plan.id = Some(424_242);
    assert_matches!(
        gateway.save_lesson_plan(&plan).await,
        Err(CoreError::NotFound { entity: "LessonPlan", id: 424_242 })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_service_store_get_delete(pool: PgPool) {
    let service = LessonPlanService::new(Arc::new(PgGateway::new(pool.clone())));

    let mut plan = new_plan("PPL Ground 1");
    plan.activities = vec![new_activity("Preflight", 600), new_activity("Run-up", 300)];
    let stored = service.store(Some(plan)).await.unwrap().unwrap();
    let id = stored.id.unwrap();
    assert_eq!(stored.activities.len(), 2);

    let linked = service.get_activities_for_lesson_plan(id).await.unwrap();
    assert_eq!(linked.len(), 2);

    let summary = service
        .link_activities(id, &stored.activities)
        .await
        .unwrap();
    assert_eq!(summary.created, 0);
    assert_eq!(summary.removed, 0);

    let deleted = service.delete(id).await.unwrap();
    assert_eq!(deleted.id, Some(id));
    assert_matches!(service.get(id).await, Err(CoreError::NotFound { .. }));
    assert!(LessonPlanActivityRepo::list_by_lesson_plan(&pool, id)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_service_keeps_activity_with_its_owner(pool: PgPool) {
    let service = LessonPlanService::new(Arc::new(PgGateway::new(pool.clone())));

    let mut first = new_plan("PPL Ground 1");
    first.activities = vec![new_activity("Preflight", 600)];
    let first = service.store(Some(first)).await.unwrap().unwrap();
    let second = service
        .store(Some(new_plan("PPL Ground 2")))
        .await
        .unwrap()
        .unwrap();

    let mut update = second.clone();
    update.activities = first.activities.clone();
    assert_matches!(
        service.store(Some(update)).await,
        Err(CoreError::InvalidPayload(_))
    );

    let activity_id = first.activities[0].id.unwrap();
    let row = ActivityRepo::find_by_id(&pool, activity_id)
        .await
        .unwrap()
        .expect("activity should still exist");
    assert_eq!(row.lesson_plan_id, first.id.unwrap());
}
