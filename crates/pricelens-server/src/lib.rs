//! REST API server: routes, DTOs, configuration, and OpenAPI documentation.

pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod openapi;
pub mod routes;
pub mod state;
