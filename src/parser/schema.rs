//! Parsed allocation record definitions.
//!
//! These are the values handed from the dump scanner to the aggregator.

/// One stack frame of an allocation backtrace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Return address exactly as written in the dump (e.g. "0xc0101234")
    pub address: String,

    /// Demangled symbol name, empty if the dump carried none
    pub symbol: String,
}

impl Frame {
    pub fn new(address: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            symbol: symbol.into(),
        }
    }

    /// Whether this is a padding slot (address zero)
    pub fn is_null(&self) -> bool {
        let digits = self
            .address
            .strip_prefix("0x")
            .or_else(|| self.address.strip_prefix("0X"))
            .unwrap_or(&self.address);

        !digits.is_empty() && digits.chars().all(|c| c == '0')
    }
}

/// One allocation site from the dump
///
/// `frames` keeps the order of the dump (innermost caller first for the
/// kernel allocator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRecord {
    pub frames: Vec<Frame>,

    /// Number of allocations made from this exact backtrace
    pub count: u64,

    /// Total bytes attributed to this backtrace
    pub size: u64,
}

impl AllocationRecord {
    pub fn new(frames: Vec<Frame>, count: u64, size: u64) -> Self {
        Self { frames, count, size }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_frame_detection() {
        assert!(Frame::new("0x0", "").is_null());
        assert!(Frame::new("0x00000000", "0").is_null());
        assert!(Frame::new("0", "").is_null());
        assert!(!Frame::new("0xc0101234", "main").is_null());
        assert!(!Frame::new("", "main").is_null());
    }
}
