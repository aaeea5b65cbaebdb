//! Database entities module

pub mod dashboard_user;
