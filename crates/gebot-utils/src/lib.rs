//! Shared utilities for gebot
//!
//! This crate provides common functionality used across the gebot workspace:
//! logging setup and the number formatting used in chat replies.

pub mod format;
pub mod logging;

pub use format::{format_amount, format_count};
pub use logging::{init_tracing, init_tracing_with};
