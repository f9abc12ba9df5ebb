use std::sync::Arc;

use lessonplans_core::cache::LessonPlanCache;
use lessonplans_core::service::LessonPlanService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Lesson plan aggregate service.
    pub service: LessonPlanService,
    /// Read-through cache of hydrated lesson plans, created at startup.
    pub cache: Arc<LessonPlanCache>,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Outbound HTTP client for peer services, e.g. resolving an activity's
    /// `referenceId`. No lesson plan route calls out yet.
    pub http_client: reqwest::Client,
}
