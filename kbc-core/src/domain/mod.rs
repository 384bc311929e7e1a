//! Core domain types
//!
//! These are the shapes the client hands back to callers, built from the raw API
//! payloads in [`crate::dto`].

pub mod job;
pub mod table;
