//! In-process [`LessonPlanGateway`] backed by hash maps.
//!
//! Mirrors the PostgreSQL schema closely enough for tests: ids come from
//! per-table sequences, timestamps are server-set, the `(lesson_plan_id,
//! activity_id)` pair is unique, and deleting a plan or activity cascades
//! to rows that reference it.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::gateway::LessonPlanGateway;
use crate::lesson_plan::{Activity, LessonPlan, LessonPlanActivity, NewLessonPlanActivity};
use crate::types::DbId;

#[derive(Default)]
struct Tables {
    lesson_plans: BTreeMap<DbId, LessonPlan>,
    activities: BTreeMap<DbId, Activity>,
    links: BTreeMap<DbId, LessonPlanActivity>,
    next_lesson_plan_id: DbId,
    next_activity_id: DbId,
    next_link_id: DbId,
}

fn next_id(counter: &mut DbId) -> DbId {
    *counter += 1;
    *counter
}

/// Hash-map storage shared behind a `RwLock`.
#[derive(Default)]
pub struct InMemoryGateway {
    tables: RwLock<Tables>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of link rows, across all plans.
    pub async fn link_count(&self) -> usize {
        self.tables.read().await.links.len()
    }

    /// Total number of activity rows, across all plans.
    pub async fn activity_count(&self) -> usize {
        self.tables.read().await.activities.len()
    }
}

#[async_trait]
impl LessonPlanGateway for InMemoryGateway {
    async fn ping(&self) -> CoreResult<()> {
        Ok(())
    }

    async fn find_lesson_plan(&self, id: DbId) -> CoreResult<Option<LessonPlan>> {
        Ok(self.tables.read().await.lesson_plans.get(&id).cloned())
    }

    async fn find_all_lesson_plans(&self) -> CoreResult<Vec<LessonPlan>> {
        Ok(self
            .tables
            .read()
            .await
            .lesson_plans
            .values()
            .cloned()
            .collect())
    }

    async fn save_lesson_plan(&self, plan: &LessonPlan) -> CoreResult<LessonPlan> {
        let mut tables = self.tables.write().await;
        let now = chrono::Utc::now();

        let mut row = LessonPlan {
            activities: Vec::new(),
            updated_at: Some(now),
            ..plan.clone()
        };

        match plan.id {
            Some(id) => {
                let existing = tables.lesson_plans.get(&id).ok_or(CoreError::NotFound {
                    entity: "LessonPlan",
                    id,
                })?;
                row.created_at = existing.created_at;
            }
            None => {
                row.id = Some(next_id(&mut tables.next_lesson_plan_id));
                row.created_at = Some(now);
            }
        }

        if let Some(id) = row.id {
            tables.lesson_plans.insert(id, row.clone());
        }
        Ok(row)
    }

    async fn delete_lesson_plan(&self, id: DbId) -> CoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.lesson_plans.remove(&id).is_none() {
            return Ok(false);
        }
        let owned: Vec<DbId> = tables
            .activities
            .values()
            .filter(|a| a.lesson_plan_id == Some(id))
            .filter_map(|a| a.id)
            .collect();
        tables.activities.retain(|_, a| a.lesson_plan_id != Some(id));
        tables
            .links
            .retain(|_, l| l.lesson_plan_id != id && !owned.contains(&l.activity_id));
        Ok(true)
    }

    async fn find_activity(&self, id: DbId) -> CoreResult<Option<Activity>> {
        Ok(self.tables.read().await.activities.get(&id).cloned())
    }

    async fn find_activities_by_lesson_plan(
        &self,
        lesson_plan_id: DbId,
    ) -> CoreResult<Vec<Activity>> {
        Ok(self
            .tables
            .read()
            .await
            .activities
            .values()
            .filter(|a| a.lesson_plan_id == Some(lesson_plan_id))
            .cloned()
            .collect())
    }

    async fn save_activity(&self, activity: &Activity) -> CoreResult<Activity> {
        let mut tables = self.tables.write().await;
        let now = chrono::Utc::now();

        if let Some(plan_id) = activity.lesson_plan_id {
            if !tables.lesson_plans.contains_key(&plan_id) {
                return Err(CoreError::Storage(format!(
                    "activity references missing lesson plan {plan_id}"
                )));
            }
        }

        let mut row = Activity {
            updated_at: Some(now),
            ..activity.clone()
        };

        match activity.id {
            Some(id) => {
                let existing = tables.activities.get(&id).ok_or(CoreError::NotFound {
                    entity: "Activity",
                    id,
                })?;
                row.created_at = existing.created_at;
            }
            None => {
                row.id = Some(next_id(&mut tables.next_activity_id));
                row.created_at = Some(now);
            }
        }

        if let Some(id) = row.id {
            tables.activities.insert(id, row.clone());
        }
        Ok(row)
    }

    async fn delete_activity(&self, id: DbId) -> CoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.activities.remove(&id).is_none() {
            return Ok(false);
        }
        tables.links.retain(|_, l| l.activity_id != id);
        Ok(true)
    }

    async fn find_links_by_lesson_plan(
        &self,
        lesson_plan_id: DbId,
    ) -> CoreResult<Vec<LessonPlanActivity>> {
        Ok(self
            .tables
            .read()
            .await
            .links
            .values()
            .filter(|l| l.lesson_plan_id == lesson_plan_id)
            .cloned()
            .collect())
    }

    async fn find_links_by_activity(
        &self,
        activity_id: DbId,
    ) -> CoreResult<Vec<LessonPlanActivity>> {
        Ok(self
            .tables
            .read()
            .await
            .links
            .values()
            .filter(|l| l.activity_id == activity_id)
            .cloned()
            .collect())
    }

    async fn save_link(&self, link: &NewLessonPlanActivity) -> CoreResult<LessonPlanActivity> {
        let mut tables = self.tables.write().await;

        if !tables.lesson_plans.contains_key(&link.lesson_plan_id)
            || !tables.activities.contains_key(&link.activity_id)
        {
            return Err(CoreError::Storage(format!(
                "link ({}, {}) references a missing row",
                link.lesson_plan_id, link.activity_id
            )));
        }
        let duplicate = tables.links.values().any(|l| {
            l.lesson_plan_id == link.lesson_plan_id && l.activity_id == link.activity_id
        });
        if duplicate {
            return Err(CoreError::Storage(format!(
                "link ({}, {}) already exists",
                link.lesson_plan_id, link.activity_id
            )));
        }

        let row = LessonPlanActivity {
            id: next_id(&mut tables.next_link_id),
            lesson_plan_id: link.lesson_plan_id,
            activity_id: link.activity_id,
            created_at: link.created_at,
            updated_at: link.updated_at,
        };
        tables.links.insert(row.id, row.clone());
        Ok(row)
    }

    async fn delete_link(&self, id: DbId) -> CoreResult<bool> {
        Ok(self.tables.write().await.links.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn plan(title: &str) -> LessonPlan {
        LessonPlan {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids_and_timestamps() {
        let gw = InMemoryGateway::new();
        let a = gw.save_lesson_plan(&plan("A")).await.unwrap();
        let b = gw.save_lesson_plan(&plan("B")).await.unwrap();
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
        assert!(a.created_at.is_some());
        assert_eq!(a.created_at, a.updated_at);
    }

    #[tokio::test]
    async fn update_of_unknown_plan_is_not_found() {
        let gw = InMemoryGateway::new();
        let mut p = plan("Ghost");
        p.id = Some(42);
        assert_matches!(
            gw.save_lesson_plan(&p).await,
            Err(CoreError::NotFound { entity: "LessonPlan", id: 42 })
        );
    }

    #[tokio::test]
    async fn duplicate_link_is_rejected() {
        let gw = InMemoryGateway::new();
        let p = gw.save_lesson_plan(&plan("A")).await.unwrap();
        let a = gw
            .save_activity(&Activity {
                title: "Preflight".into(),
                lesson_plan_id: p.id,
                ..Default::default()
            })
            .await
            .unwrap();
        let now = chrono::Utc::now();
        let link = NewLessonPlanActivity {
            lesson_plan_id: p.id.unwrap(),
            activity_id: a.id.unwrap(),
            created_at: now,
            updated_at: now,
        };
        gw.save_link(&link).await.unwrap();
        assert_matches!(gw.save_link(&link).await, Err(CoreError::Storage(_)));
    }

    #[tokio::test]
    async fn deleting_plan_cascades_to_activities_and_links() {
        let gw = InMemoryGateway::new();
        let p = gw.save_lesson_plan(&plan("A")).await.unwrap();
        let a = gw
            .save_activity(&Activity {
                title: "Preflight".into(),
                lesson_plan_id: p.id,
                ..Default::default()
            })
            .await
            .unwrap();
        let now = chrono::Utc::now();
        gw.save_link(&NewLessonPlanActivity {
            lesson_plan_id: p.id.unwrap(),
            activity_id: a.id.unwrap(),
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();

        assert!(gw.delete_lesson_plan(p.id.unwrap()).await.unwrap());
        assert_eq!(gw.activity_count().await, 0);
        assert_eq!(gw.link_count().await, 0);
        assert!(!gw.delete_lesson_plan(p.id.unwrap()).await.unwrap());
    }
}
