//! Frame tokenizer for the `Backtrace [...]` segment of an allocation dump.
//!
//! Entries look like `0xc0101234=\Foo::bar(int, int)=\` and are joined by
//! `, `. The `=\` marker quotes the symbol name, so a separator only counts
//! when it directly follows a closing marker. Commas inside names stay put.

use super::schema::Frame;

/// Quotes the symbol name inside a frame entry
pub const NAME_QUOTE: &str = "=\\";

/// Joins consecutive frame entries
pub const FRAME_SEPARATOR: &str = ", ";

/// Split a backtrace segment into raw frame entries
///
/// **Public** - first stage of frame decoding
///
/// Each returned entry still holds `address=\name` with the closing quote
/// removed. Blank trailing text is dropped.
pub fn split_frame_entries(segment: &str) -> Vec<&str> {
    let terminator = format!("{}{}", NAME_QUOTE, FRAME_SEPARATOR);
    let mut entries = Vec::new();
    let mut rest = segment;

    while let Some(pos) = rest.find(&terminator) {
        let entry = rest[..pos].trim_start();
        if !entry.is_empty() {
            entries.push(entry);
        }
        rest = &rest[pos + terminator.len()..];
    }

    // The last entry may be written without a trailing separator
    let tail = rest.trim();
    if !tail.is_empty() {
        entries.push(tail.strip_suffix(NAME_QUOTE).unwrap_or(tail));
    }

    entries
}

/// Decode one `address=\name` entry
///
/// Returns `None` when the entry has no name quote at all.
pub fn parse_frame_entry(entry: &str) -> Option<Frame> {
    let (address, symbol) = entry.split_once(NAME_QUOTE)?;
    Some(Frame::new(address.trim(), symbol))
}

/// Decode a whole backtrace segment
///
/// **Public** - used by the dump scanner
///
/// # Returns
/// All frames in dump order, or `None` if any entry is malformed
pub fn parse_backtrace(segment: &str) -> Option<Vec<Frame>> {
    split_frame_entries(segment)
        .into_iter()
        .map(parse_frame_entry)
        .collect()
}
