//! Customer Insights Core - Shared types library.
//!
//! This crate provides common types used across all Customer Insights components:
//! - `api` - Read-only JSON API over customers and orders
//! - `cli` - Command-line tools for migrations, CSV loading and verification
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Pagination arithmetic, search term sanitization and numeric
//! rounding live here so every layer agrees on them.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, order statuses, pagination, search terms and metrics

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
