//! Lesson plan HTTP service.
//!
//! Exposes config, state, error handling, and routes so the binary and the
//! integration tests build the application the same way.

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod http_client;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
