//! Authoritative code-to-character mapping store.
//!
//! The store is backed by an append-only text log, one `<hex> '<char>'`
//! record per line. It is loaded whole at startup and grows one validated
//! record at a time; the log is never rewritten or compacted, so every
//! mapping a curator ever confirmed survives a crash mid-session.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::codes::parse_code;
use crate::error::{SegmapError, SegmapResult};
use crate::DeviceCode;

/// One confirmed mapping: a device code and the character it displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingEntry {
    pub code: DeviceCode,
    pub ch: char,
}

/// Ordered code-to-character table backed by an append-only log file.
///
/// In-memory order mirrors on-disk order. Codes are unique; characters are
/// meant to be unique but an existing log may carry duplicates (see
/// [`MappingStore::load`]).
#[derive(Debug)]
pub struct MappingStore {
    path: PathBuf,
    entries: Vec<MappingEntry>,
}

impl MappingStore {
    /// Load a mapping log in full.
    ///
    /// A record whose code was already seen is reported and dropped, first
    /// occurrence wins. A record whose character was already seen is
    /// reported but kept, since the earlier binding may be the wrong one
    /// and dropping data decides that question silently. A line that fails
    /// to parse aborts the load.
    pub fn load(path: impl Into<PathBuf>) -> SegmapResult<Self> {
        let path = path.into();
        let text = fs::read_to_string(&path)?;
        let mut store = Self {
            path,
            entries: Vec::new(),
        };
        for (index, line) in text.lines().enumerate() {
            let (code, ch) = parse_record(line).map_err(|reason| SegmapError::Malformed {
                file: store.path.display().to_string(),
                line: index + 1,
                reason,
            })?;
            if store.contains(code) {
                log::error!(
                    "duplicate code 0x{code:04x} in {}, keeping the first entry",
                    store.path.display()
                );
                continue;
            }
            if let Some(existing) = store.code_for(ch) {
                log::warn!(
                    "character {ch:?} is mapped from both 0x{existing:04x} and 0x{code:04x} in {}",
                    store.path.display()
                );
            }
            store.entries.push(MappingEntry { code, ch });
        }
        Ok(store)
    }

    /// Whether a code is already mapped.
    pub fn contains(&self, code: DeviceCode) -> bool {
        self.entries.iter().any(|entry| entry.code == code)
    }

    /// The code a character is currently mapped from, if any.
    pub fn code_for(&self, ch: char) -> Option<DeviceCode> {
        self.entries
            .iter()
            .find(|entry| entry.ch == ch)
            .map(|entry| entry.code)
    }

    /// Record a newly confirmed mapping.
    ///
    /// Rejects a duplicate code or a character already bound to another
    /// code, leaving the store untouched. On success the record is appended
    /// to the log before memory is updated, so an accepted mapping is never
    /// lost to a later crash. The log is opened and closed per call.
    pub fn add(&mut self, code: DeviceCode, ch: char) -> SegmapResult<()> {
        if self.contains(code) {
            return Err(SegmapError::DuplicateCode(code));
        }
        if let Some(existing) = self.code_for(ch) {
            return Err(SegmapError::DuplicateChar { ch, existing });
        }
        let mut log_file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        writeln!(log_file, "0x{code:04x} '{ch}'")?;
        self.entries.push(MappingEntry { code, ch });
        Ok(())
    }

    /// All entries in log order.
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Location of the backing log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse one `<hex-code> '<character>'` record.
///
/// The value is the second whitespace-delimited field with surrounding
/// single quotes stripped; the quotes themselves are optional. Exactly one
/// character must remain, so a quoted space is a valid value.
fn parse_record(line: &str) -> Result<(DeviceCode, char), String> {
    let record = line.trim();
    let Some((code_text, rest)) = record.split_once(char::is_whitespace) else {
        return Err(format!("expected `<hex> '<char>'`, got {record:?}"));
    };
    let Some(code) = parse_code(code_text) else {
        return Err(format!("expected a hex device code, got {code_text:?}"));
    };
    let value = rest.trim_start().trim_matches('\'');
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok((code, ch)),
        _ => Err(format!("expected a single quoted character, got {rest:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("codes-mapped.list")
    }

    fn empty_store(dir: &tempfile::TempDir) -> MappingStore {
        let path = log_path(dir);
        fs::write(&path, "").unwrap();
        MappingStore::load(path).unwrap()
    }

    #[test]
    fn test_load_keeps_log_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_path(&dir);
        fs::write(&path, "0xc48c '0'\n0x2040 '1'\n0x0000 ' '\n").unwrap();
        let store = MappingStore::load(&path).unwrap();
        let entries = store.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], MappingEntry { code: 0xc48c, ch: '0' });
        assert_eq!(entries[1], MappingEntry { code: 0x2040, ch: '1' });
        assert_eq!(entries[2], MappingEntry { code: 0x0000, ch: ' ' });
    }

    #[test]
    fn test_load_duplicate_code_keeps_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_path(&dir);
        fs::write(&path, "0x2043 '+'\n0x2043 '-'\n").unwrap();
        let store = MappingStore::load(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].ch, '+');
    }

    #[test]
    fn test_load_duplicate_char_keeps_both() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_path(&dir);
        fs::write(&path, "0x2043 '+'\n0x0003 '+'\n").unwrap();
        let store = MappingStore::load(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.code_for('+'), Some(0x2043));
    }

    #[test]
    fn test_load_unquoted_value_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_path(&dir);
        fs::write(&path, "0x0003 -\n").unwrap();
        let store = MappingStore::load(&path).unwrap();
        assert_eq!(store.code_for('-'), Some(0x0003));
    }

    #[test]
    fn test_load_malformed_line_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_path(&dir);
        fs::write(&path, "0x2043 '+'\nwhat even\n").unwrap();
        let err = MappingStore::load(&path).unwrap_err();
        assert!(matches!(err, SegmapError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_load_blank_line_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_path(&dir);
        fs::write(&path, "0x2043 '+'\n\n0x0003 '-'\n").unwrap();
        assert!(MappingStore::load(&path).is_err());
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.list");
        assert!(matches!(
            MappingStore::load(missing),
            Err(SegmapError::Io(_))
        ));
    }

    #[test]
    fn test_add_appends_one_record_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = empty_store(&dir);
        store.add(0xc48c, '0').unwrap();
        store.add(0x2040, '1').unwrap();
        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "0xc48c '0'\n0x2040 '1'\n");

        let reloaded = MappingStore::load(store.path()).unwrap();
        assert_eq!(reloaded.entries(), store.entries());
    }

    #[test]
    fn test_add_rejects_duplicate_code() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = empty_store(&dir);
        store.add(0x2043, '+').unwrap();
        let err = store.add(0x2043, 'Z').unwrap_err();
        assert!(matches!(err, SegmapError::DuplicateCode(0x2043)));
        assert_eq!(store.len(), 1);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "0x2043 '+'\n");
    }

    #[test]
    fn test_add_rejects_duplicate_char() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = empty_store(&dir);
        store.add(0x2043, '+').unwrap();
        let err = store.add(0x0003, '+').unwrap_err();
        assert!(matches!(
            err,
            SegmapError::DuplicateChar { ch: '+', existing: 0x2043 }
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_parse_record_quoted_space() {
        assert_eq!(parse_record("0x0000 ' '"), Ok((0x0000, ' ')));
    }

    #[test]
    fn test_parse_record_rejects_bad_records() {
        assert!(parse_record("0x0000").is_err());
        assert!(parse_record("0x0000 'ab'").is_err());
        assert!(parse_record("0x0000 ''").is_err());
        assert!(parse_record("nothex 'a'").is_err());
    }
}
