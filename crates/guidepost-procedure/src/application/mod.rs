//! Application layer for procedure resolution.

pub mod query_handlers;
pub mod traversal;
