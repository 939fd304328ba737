//! Structured logging facility for SortMerge
//!
//! This module provides a canonical logging facility with:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! The merge and grouping iterators stay silent on the trusted path. Events
//! are emitted by `order`, `check_sorted`, and by checked passes, which
//! carry a `pass_id` so one pass can be followed through the log.
//!
//! # Usage
//!
//! ```rust
//! use sortmerge_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
