//! Studio Core
//!
//! Core types shared by the Content Studio client crates.
//!
//! This crate contains:
//! - Domain types: render jobs, job snapshots and generated content
//! - DTOs: request bodies sent to the generation backend
//! - Formatting helpers for durations and file sizes

pub mod domain;
pub mod dto;
pub mod format;
