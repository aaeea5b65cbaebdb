//! Dashboard users module: list, detail, create, update, delete

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
