//! Core types for Customer Insights.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod metrics;
pub mod pagination;
pub mod search;
pub mod status;

pub use id::*;
pub use metrics::{average, percentage};
pub use pagination::{DEFAULT_LIMIT, MAX_LIMIT, PageRequest, Pagination, page_count};
pub use search::SearchTerm;
pub use status::*;
