//! Allocation dump scanner.
//!
//! Pulls `Alloc { ... }` blocks out of the kernel debugger's serial dump:
//!
//! ```text
//! AllocDump {
//! Alloc {
//! Backtrace [0xc0101234=\main=\, 0xc0105678=\foo=\, ]
//! Num 5
//! Sz 2048
//! }
//! }
//! ```
//!
//! This is a best-effort scan. Anything that does not look like a complete
//! block is skipped, so serial noise around the dump is harmless.

use super::backtrace::parse_backtrace;
use super::schema::{AllocationRecord, Frame};
use crate::utils::config::MAX_BACKTRACE_FRAMES;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

// The backtrace is a single line; stopping at the newline keeps a broken
// block from swallowing the next one.
static ALLOC_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"Alloc\s*\{\s*Backtrace\s*\[(?P<backtrace>[^\n]*)\]\s*Num\s+(?P<count>\d+)\s*Sz\s+(?P<size>\d+)\s*\}",
    )
    .expect("allocation block pattern is valid")
});

/// What to do with a backtrace shorter than the frame cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortBacktrace {
    /// Aggregate the frames that are present
    #[default]
    Truncate,
    /// Drop the record
    Skip,
}

/// Scanner configuration
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Frames kept per backtrace; extra frames are cut off
    pub max_frames: usize,
    pub short_backtrace: ShortBacktrace,
    /// Strip trailing zero-address padding frames
    pub drop_null_frames: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_frames: MAX_BACKTRACE_FRAMES,
            short_backtrace: ShortBacktrace::default(),
            drop_null_frames: true,
        }
    }
}

impl ExtractorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn with_short_backtrace(mut self, policy: ShortBacktrace) -> Self {
        self.short_backtrace = policy;
        self
    }

    pub fn with_drop_null_frames(mut self, drop_null_frames: bool) -> Self {
        self.drop_null_frames = drop_null_frames;
        self
    }
}

/// Extract every well-formed allocation record from a dump
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `text` - Raw dump text (may contain unrelated serial output)
/// * `config` - Frame cap and short-backtrace policy
///
/// # Returns
/// Records in the order they appear in the dump
pub fn extract_records(text: &str, config: &ExtractorConfig) -> Vec<AllocationRecord> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for caps in ALLOC_BLOCK_RE.captures_iter(text) {
        match build_record(&caps["backtrace"], &caps["count"], &caps["size"], config) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    debug!(
        "Extracted {} allocation records ({} malformed blocks skipped)",
        records.len(),
        skipped
    );

    if records.is_empty() && !text.trim().is_empty() {
        warn!("No allocation records found in input");
    }

    records
}

/// Turn the captured pieces of one block into a record
///
/// **Private** - internal helper for extract_records
fn build_record(
    backtrace: &str,
    count: &str,
    size: &str,
    config: &ExtractorConfig,
) -> Option<AllocationRecord> {
    let Ok(count) = count.parse::<u64>() else {
        debug!("Skipping block with out-of-range count: {}", count);
        return None;
    };
    let Ok(size) = size.parse::<u64>() else {
        debug!("Skipping block with out-of-range size: {}", size);
        return None;
    };

    let Some(mut frames) = parse_backtrace(backtrace) else {
        debug!("Skipping block with malformed backtrace: {}", backtrace);
        return None;
    };

    if config.drop_null_frames {
        while frames.last().is_some_and(Frame::is_null) {
            frames.pop();
        }
    }

    frames.truncate(config.max_frames);

    if config.short_backtrace == ShortBacktrace::Skip && frames.len() < config.max_frames {
        debug!(
            "Skipping short backtrace ({} of {} frames)",
            frames.len(),
            config.max_frames
        );
        return None;
    }

    Some(AllocationRecord::new(frames, count, size))
}
