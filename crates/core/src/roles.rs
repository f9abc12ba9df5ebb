//! Well-known role name constants.
//!
//! These must match the `role` claim issued by the identity provider.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_INSTRUCTOR: &str = "instructor";
pub const ROLE_STUDENT: &str = "student";

/// Roles allowed to manage lesson plans.
pub const LESSON_PLAN_MANAGERS: &[&str] = &[ROLE_ADMIN, ROLE_INSTRUCTOR];

/// Whether `role` may create, read, update, or delete lesson plans.
pub fn can_manage_lesson_plans(role: &str) -> bool {
    LESSON_PLAN_MANAGERS.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_and_instructor_can_manage() {
        assert!(can_manage_lesson_plans(ROLE_ADMIN));
        assert!(can_manage_lesson_plans(ROLE_INSTRUCTOR));
    }

    #[test]
    fn student_and_unknown_roles_cannot_manage() {
        assert!(!can_manage_lesson_plans(ROLE_STUDENT));
        assert!(!can_manage_lesson_plans(""));
        assert!(!can_manage_lesson_plans("Admin"));
    }
}
