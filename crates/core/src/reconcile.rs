//! Link reconciliation between a lesson plan and its desired activities.
//!
//! [`plan_links`] is pure: it compares the links currently persisted for a
//! plan against the desired activity list and returns the removals and
//! creations needed to make them match. Links present on both sides are
//! left alone so their timestamps do not churn.

use std::collections::HashSet;

use serde::Serialize;

use crate::lesson_plan::{Activity, LessonPlanActivity, NewLessonPlanActivity};
use crate::types::{DbId, Timestamp};

/// Changes required to bring a plan's link set in line with a desired list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPlan {
    /// Existing links to delete.
    pub remove: Vec<LessonPlanActivity>,
    /// New links to insert.
    pub create: Vec<NewLessonPlanActivity>,
    /// Number of existing links kept as-is.
    pub unchanged: usize,
}

impl LinkPlan {
    pub fn is_noop(&self) -> bool {
        self.remove.is_empty() && self.create.is_empty()
    }
}

/// Outcome of applying a [`LinkPlan`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkSummary {
    pub created: usize,
    pub removed: usize,
    pub unchanged: usize,
}

/// Compute the link changes for `lesson_plan_id`.
///
/// - Activities without an id cannot be linked and are ignored.
/// - Duplicate desired ids produce a single link.
/// - If `current` already holds more than one row for the same activity,
///   the extras are scheduled for removal.
/// - An empty `desired` list removes every current link.
pub fn plan_links(
    lesson_plan_id: DbId,
    current: &[LessonPlanActivity],
    desired: &[Activity],
    now: Timestamp,
) -> LinkPlan {
    let desired_ids: HashSet<DbId> = desired.iter().filter_map(|a| a.id).collect();

    let mut plan = LinkPlan::default();
    let mut kept: HashSet<DbId> = HashSet::new();

    for link in current {
        if desired_ids.contains(&link.activity_id) && kept.insert(link.activity_id) {
            plan.unchanged += 1;
        } else {
            plan.remove.push(link.clone());
        }
    }

    let mut seen: HashSet<DbId> = HashSet::new();
    for activity_id in desired.iter().filter_map(|a| a.id) {
        if kept.contains(&activity_id) || !seen.insert(activity_id) {
            continue;
        }
        plan.create.push(NewLessonPlanActivity {
            lesson_plan_id,
            activity_id,
            created_at: now,
            updated_at: now,
        });
    }

    plan
}
