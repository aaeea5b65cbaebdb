//! HTTP REST API interfaces
//!
//! - `common`: response envelope and envelope-preserving extractors
//! - `modules`: handlers per resource plus health, metrics and request-id
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use common::{ApiResponse, ResultStatus};
pub use router::{create_api_router, ApiDoc, RouterState};
