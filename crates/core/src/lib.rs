//! Lesson plan domain: entities, error taxonomy, link reconciliation, the
//! persistence gateway abstraction, the aggregate service, and the
//! read-through cache.

pub mod cache;
pub mod error;
pub mod gateway;
pub mod lesson_plan;
pub mod memory;
pub mod reconcile;
pub mod roles;
pub mod service;
pub mod types;
