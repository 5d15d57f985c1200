//! Hardened login service library.

// Core subsystems
pub mod config;
pub mod http;

// Collaborators
pub mod auth;

// Cross-cutting concerns
pub mod observability;
pub mod security;

pub use config::schema::AppConfig;
pub use http::HttpServer;
