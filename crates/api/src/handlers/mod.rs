//! Request handlers.
//!
//! Handlers delegate to `catalog_core` for validation and entity construction
//! and to the repositories in `catalog_db` for persistence, mapping errors via
//! [`AppError`](crate::error::AppError).

pub mod product;
