//! Allocation dump parsing.
//!
//! This module handles:
//! - Scanning raw dump text for `Alloc { ... }` blocks
//! - Splitting backtrace segments into frames
//! - Applying the frame cap and short-backtrace policy

pub mod alloc_dump;
pub mod backtrace;
pub mod schema;

// Re-export main types
pub use alloc_dump::{extract_records, ExtractorConfig, ShortBacktrace};
pub use backtrace::parse_backtrace;
pub use schema::{AllocationRecord, Frame};
