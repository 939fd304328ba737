//! Core types shared across SortMerge facilities
//!
//! This crate provides the vocabulary used by both the error and the
//! logging facilities of `sortmerge-core`:
//!
//! - **Correlation types**: PassId
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::PassId;
