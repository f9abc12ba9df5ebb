//! Database row structs.
//!
//! Each submodule contains a `FromRow` struct matching a table row and the
//! conversion into its `lessonplans_core` domain type.

pub mod activity;
pub mod lesson_plan;
pub mod lesson_plan_activity;
