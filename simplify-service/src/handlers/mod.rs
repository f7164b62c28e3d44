//! HTTP handlers for the simplify service.

pub mod health;
pub mod metrics;
pub mod simplify;
