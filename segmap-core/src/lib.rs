//! 14-Segment Display Code Mapping Core
//!
//! This crate maintains the lookup table that turns the 16-bit status codes
//! on a legacy HP/Agilent instrument's display bus into printable characters:
//! - Bus-to-segment remapping and text glyph rendering
//! - Append-only code-to-character mapping log
//! - Interactive discovery sessions driven by a human curator
//! - Generation of the C lookup table the replacement firmware compiles in
//!
//! # Architecture
//!
//! Two front ends share one store:
//! - `mapper`: walks captured codes, renders each unknown one as a glyph,
//!   and records the character the curator names
//! - `table`: compiles the full store into sorted `seg_codes[]` /
//!   `seg_mapped_chars[]` arrays
//! - `Console` trait: the only seam to a terminal, so whole curation
//!   sessions run under test against a [`ScriptedConsole`]

pub mod codes;
pub mod error;
pub mod mapper;
pub mod seg14;
pub mod store;
pub mod table;

pub use codes::{parse_code, read_code_list};
pub use error::{SegmapError, SegmapResult};
pub use mapper::{run_session, Console, ScriptedConsole, SessionSummary, SKIP_RESPONSE};
pub use store::{MappingEntry, MappingStore};
pub use table::{generate, sorted_entries, write_table};

/// Raw 16-bit status word captured from the instrument's display bus.
pub type DeviceCode = u16;

/// Canonical segment bitmask; bit 0 = segment A through bit 13 = segment N.
pub type SegmentWord = u16;
