//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_repo;
pub mod lesson_plan_activity_repo;
pub mod lesson_plan_repo;

pub use activity_repo::ActivityRepo;
pub use lesson_plan_activity_repo::LessonPlanActivityRepo;
pub use lesson_plan_repo::LessonPlanRepo;
