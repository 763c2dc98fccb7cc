//! Domain layer for procedure resolution.

pub mod localization;
pub mod steps;
