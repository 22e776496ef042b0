//! # API Shared
//!
//! Shared definitions for the endodontic diagnosis APIs.
//!
//! Contains:
//! - Request/response types (`dto` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` (and any future transport) so every API speaks the same JSON.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
