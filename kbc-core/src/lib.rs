//! Keboola Core
//!
//! Core types shared by the Keboola client and CLI.
//!
//! This crate contains:
//! - Domain types: Tables, columns and queue jobs as the rest of the workspace sees them
//! - DTOs: The JSON payloads exchanged with the Storage and Queue APIs
//! - Release rules: Deciding whether a pushed git ref is a publishable version tag

pub mod domain;
pub mod dto;
pub mod release;
