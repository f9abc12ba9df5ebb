//! Lesson plan aggregate orchestration on top of a [`LessonPlanGateway`].
//!
//! The service holds no locks of its own. Writes are issued one at a time
//! and are not wrapped in a transaction: a failure part-way through
//! [`LessonPlanService::store`] can leave the plan row committed while some
//! activities are missing.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::gateway::LessonPlanGateway;
use crate::lesson_plan::{Activity, LessonPlan};
use crate::reconcile::{plan_links, LinkSummary};
use crate::types::DbId;

fn lesson_plan_not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "LessonPlan",
        id,
    }
}

/// Create/read/update/delete for lesson plans and their activities.
#[derive(Clone)]
pub struct LessonPlanService {
    gateway: Arc<dyn LessonPlanGateway>,
}

impl LessonPlanService {
    pub fn new(gateway: Arc<dyn LessonPlanGateway>) -> Self {
        Self { gateway }
    }

    /// Health check passed straight through to the gateway.
    pub async fn ping(&self) -> CoreResult<()> {
        self.gateway.ping().await
    }

    /// Persist a plan and its activities, returning the reloaded aggregate.
    ///
    /// `None` in gives `None` out; it is a null guard, not a validation
    /// signal. The plan is inserted when it has no id and updated otherwise.
    /// Each activity is saved with its owning plan set, the link table is
    /// reconciled to the saved activities, and activities the plan owned
    /// before but no longer lists are deleted.
    ///
    /// Activities keep their owner: listing an activity owned by another plan
    /// fails with `InvalidPayload` before anything is written. Sharing an
    /// activity across plans goes through [`link_activities`](Self::link_activities).
    pub async fn store(&self, plan: Option<LessonPlan>) -> CoreResult<Option<LessonPlan>> {
        let Some(plan) = plan else {
            return Ok(None);
        };

        self.check_activity_owners(&plan).await?;

        let saved = self.gateway.save_lesson_plan(&plan).await?;
        let plan_id = saved
            .id
            .ok_or_else(|| CoreError::Internal("saved lesson plan has no id".into()))?;

        let mut activities = Vec::with_capacity(plan.activities.len());
        for activity in &plan.activities {
            let activity = Activity {
                lesson_plan_id: Some(plan_id),
                ..activity.clone()
            };
            activities.push(self.gateway.save_activity(&activity).await?);
        }

        self.link_activities(plan_id, &activities).await?;

        let keep: HashSet<DbId> = activities.iter().filter_map(|a| a.id).collect();
        for orphan in self.gateway.find_activities_by_lesson_plan(plan_id).await? {
            if let Some(id) = orphan.id.filter(|id| !keep.contains(id)) {
                self.remove_activity(id).await?;
            }
        }

        tracing::info!(
            lesson_plan_id = plan_id,
            activity_count = activities.len(),
            "Stored lesson plan"
        );

        self.get(plan_id).await.map(Some)
    }

    /// Fetch a plan with its owned activities.
    pub async fn get(&self, id: DbId) -> CoreResult<LessonPlan> {
        let mut plan = self
            .gateway
            .find_lesson_plan(id)
            .await?
            .ok_or_else(|| lesson_plan_not_found(id))?;
        plan.activities = self.gateway.find_activities_by_lesson_plan(id).await?;
        Ok(plan)
    }

    /// Every plan, each hydrated through [`get`](Self::get).
    ///
    /// This issues one fetch per plan.
    pub async fn get_all(&self) -> CoreResult<Vec<LessonPlan>> {
        let rows = self.gateway.find_all_lesson_plans().await?;
        let mut plans = Vec::with_capacity(rows.len());
        for id in rows.into_iter().filter_map(|p| p.id) {
            plans.push(self.get(id).await?);
        }
        Ok(plans)
    }

    /// Delete a plan with its links and activities, returning the snapshot
    /// taken before deletion.
    pub async fn delete(&self, id: DbId) -> CoreResult<LessonPlan> {
        let snapshot = self.get(id).await?;

        for link in self.gateway.find_links_by_lesson_plan(id).await? {
            self.gateway.delete_link(link.id).await?;
        }
        for activity_id in snapshot.activity_ids() {
            self.remove_activity(activity_id).await?;
        }
        if !self.gateway.delete_lesson_plan(id).await? {
            return Err(lesson_plan_not_found(id));
        }

        tracing::info!(
            lesson_plan_id = id,
            activity_count = snapshot.activities.len(),
            "Deleted lesson plan"
        );
        Ok(snapshot)
    }

    /// Make the plan's link set match `activities` exactly.
    ///
    /// Unchanged links are not touched. An empty list unlinks everything.
    pub async fn link_activities(
        &self,
        lesson_plan_id: DbId,
        activities: &[Activity],
    ) -> CoreResult<LinkSummary> {
        if self.gateway.find_lesson_plan(lesson_plan_id).await?.is_none() {
            return Err(lesson_plan_not_found(lesson_plan_id));
        }

        let unsaved = activities.iter().filter(|a| a.id.is_none()).count();
        if unsaved > 0 {
            tracing::warn!(lesson_plan_id, unsaved, "Ignoring activities without an id");
        }

        let current = self.gateway.find_links_by_lesson_plan(lesson_plan_id).await?;
        let plan = plan_links(lesson_plan_id, &current, activities, chrono::Utc::now());

        for link in &plan.remove {
            self.gateway.delete_link(link.id).await?;
        }
        for link in &plan.create {
            self.gateway.save_link(link).await?;
        }

        let summary = LinkSummary {
            created: plan.create.len(),
            removed: plan.remove.len(),
            unchanged: plan.unchanged,
        };
        tracing::debug!(
            lesson_plan_id,
            created = summary.created,
            removed = summary.removed,
            unchanged = summary.unchanged,
            "Reconciled lesson plan links"
        );
        Ok(summary)
    }

    /// Activities linked to a plan through the link table.
    ///
    /// Returns an empty list when there are no links. Links whose activity
    /// no longer exists are skipped.
    pub async fn get_activities_for_lesson_plan(
        &self,
        lesson_plan_id: DbId,
    ) -> CoreResult<Vec<Activity>> {
        let links = self.gateway.find_links_by_lesson_plan(lesson_plan_id).await?;
        let mut activities = Vec::with_capacity(links.len());
        for link in links {
            match self.gateway.find_activity(link.activity_id).await? {
                Some(activity) => activities.push(activity),
                None => tracing::warn!(
                    lesson_plan_id,
                    activity_id = link.activity_id,
                    "Skipping link to missing activity"
                ),
            }
        }
        Ok(activities)
    }

    /// Every listed activity id must exist and be unowned or owned by `plan`.
    async fn check_activity_owners(&self, plan: &LessonPlan) -> CoreResult<()> {
        for activity_id in plan.activity_ids() {
            let existing = self
                .gateway
                .find_activity(activity_id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Activity",
                    id: activity_id,
                })?;
            match existing.lesson_plan_id {
                Some(owner) if Some(owner) != plan.id => {
                    tracing::warn!(
                        activity_id,
                        owner,
                        lesson_plan_id = ?plan.id,
                        "Rejected activity owned by another lesson plan"
                    );
                    return Err(CoreError::InvalidPayload(format!(
                        "Activity {activity_id} belongs to lesson plan {owner}"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Delete an activity and every link pointing at it.
    async fn remove_activity(&self, activity_id: DbId) -> CoreResult<()> {
        for link in self.gateway.find_links_by_activity(activity_id).await? {
            self.gateway.delete_link(link.id).await?;
        }
        self.gateway.delete_activity(activity_id).await?;
        Ok(())
    }
}
