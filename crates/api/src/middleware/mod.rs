//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a JWT Bearer token.
//! - [`rbac::RequireLessonPlanManager`] -- Requires `admin` or `instructor` role.

pub mod auth;
pub mod rbac;
