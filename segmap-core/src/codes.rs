//! Device code input lists.
//!
//! A code list is plain text, one hex literal per line, typically captured by
//! sniffing the instrument's display bus. Duplicate captures are common and
//! collapse to the first occurrence.

use std::fs;
use std::path::Path;

use crate::error::{SegmapError, SegmapResult};
use crate::DeviceCode;

/// Parse a device code hex literal, with or without a leading `0x`/`0X`.
pub fn parse_code(text: &str) -> Option<DeviceCode> {
    let digits = text.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(digits, 16).ok()
}

/// Read a code list: one hex literal per line, duplicates collapsed, input
/// order preserved. Any line that does not parse as a 16-bit hex value is
/// fatal.
pub fn read_code_list(path: &Path) -> SegmapResult<Vec<DeviceCode>> {
    let text = fs::read_to_string(path)?;
    let mut codes: Vec<DeviceCode> = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let code = parse_code(line.trim()).ok_or_else(|| SegmapError::Malformed {
            file: path.display().to_string(),
            line: index + 1,
            reason: format!("expected a hex device code, got {:?}", line.trim()),
        })?;
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    Ok(codes)
}
