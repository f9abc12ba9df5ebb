#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use lessonplans_core::cache::{CacheConfig, LessonPlanCache};
use lessonplans_core::memory::InMemoryGateway;
use lessonplans_core::roles::{ROLE_ADMIN, ROLE_INSTRUCTOR, ROLE_STUDENT};
use lessonplans_core::service::LessonPlanService;
use tower::ServiceExt;

use lessonplans_api::auth::jwt::{generate_access_token, JwtConfig};
use lessonplans_api::config::{HttpClientConfig, ServerConfig};
use lessonplans_api::http_client::build_http_client;
use lessonplans_api::router::build_app_router;
use lessonplans_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        http_client: HttpClientConfig::default(),
        cache: CacheConfig {
            time_to_live: Duration::from_secs(300),
            max_idle: Duration::from_secs(300),
        },
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// The application under test plus handles to its storage and cache.
pub struct TestApp {
    pub router: Router,
    pub gateway: Arc<InMemoryGateway>,
    pub cache: Arc<LessonPlanCache>,
    pub service: LessonPlanService,
    config: ServerConfig,
}

impl TestApp {
    /// Build the full application router over an in-memory gateway.
    ///
    /// Uses the same middleware stack as production.
    pub fn new() -> Self {
        let config = test_config();
        let gateway = Arc::new(InMemoryGateway::new());
        let service = LessonPlanService::new(gateway.clone());
        let cache = Arc::new(LessonPlanCache::new(config.cache));

        let state = AppState {
            service: service.clone(),
            cache: Arc::clone(&cache),
            config: Arc::new(config.clone()),
            http_client: build_http_client(&config.http_client).unwrap(),
        };
        let router = build_app_router(state, &config);

        Self {
            router,
            gateway,
            cache,
            service,
            config,
        }
    }

    /// Mint an access token for a user with the given role.
    pub fn token(&self, role: &str) -> String {
        generate_access_token(1, role, &self.config.jwt).unwrap()
    }

    pub fn admin_token(&self) -> String {
        self.token(ROLE_ADMIN)
    }

    pub fn instructor_token(&self) -> String {
        self.token(ROLE_INSTRUCTOR)
    }

    pub fn student_token(&self) -> String {
        self.token(ROLE_STUDENT)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> Response {
        self.send(Method::POST, uri, token, Some(body.to_string())).await
    }

    pub async fn put_json(
        &self,
        uri: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> Response {
        self.send(Method::PUT, uri, token, Some(body.to_string())).await
    }

    /// Send a raw string body, for payloads that are not valid JSON.
    pub async fn post_raw(&self, uri: &str, token: Option<&str>, body: &str) -> Response {
        self.send(Method::POST, uri, token, Some(body.to_string())).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Response {
        self.send(Method::DELETE, uri, token, None).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The canonical create payload used across tests.
pub fn ppl_ground_one() -> serde_json::Value {
    serde_json::json!({
        "title": "PPL Ground 1",
        "summary": "Aircraft systems overview",
        "objective": "Describe the fuel and electrical systems",
        "equipment": "POH, whiteboard",
        "activities": [
            {
                "title": "Preflight briefing",
                "duration": 600,
                "activityType": "BRIEFING",
                "referenceId": 42
            }
        ]
    })
}
