//! Procedure resolution bounded context.
//!
//! Turns a stored procedure into a self-contained, localized step graph that
//! a client can walk offline, and lists the languages a client may request.

pub mod application;
pub mod domain;
