//! REST API server: routes, auth gate, error translation, DTOs, and OpenAPI documentation.

pub mod app;
pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod openapi;
pub mod routes;
pub mod state;

pub use app::build_app;
