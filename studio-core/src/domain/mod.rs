//! Core domain types
//!
//! These types represent what the generation backend reports back to us.
//! Server JSON is parsed into them once, at the boundary, so downstream code
//! matches on enums instead of probing optional fields.

pub mod content;
pub mod job;
