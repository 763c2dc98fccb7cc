//! Route modules.

pub mod health;
pub mod languages;
pub mod procedures;
