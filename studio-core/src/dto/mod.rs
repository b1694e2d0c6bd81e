//! Data Transfer Objects sent to the generation backend
//!
//! Field names are serialized in camelCase to match the backend API.

pub mod content;
pub mod job;
