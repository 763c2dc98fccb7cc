//! Shared domain abstractions for the Guidepost procedure engine.
//!
//! This crate defines the identifiers, error type and storage contracts that
//! the procedure engine and its adapters depend on. It contains no
//! infrastructure code.

pub mod error;
pub mod ids;
pub mod repository;
