//! Firmware lookup table generation.
//!
//! Compiles a loaded [`MappingStore`] into the C source the display firmware
//! links against: parallel `seg_codes[]`/`seg_mapped_chars[]` arrays sorted
//! so the characters the instrument shows most, digits first, sit at the
//! front of the firmware's linear scan.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::SegmapResult;
use crate::store::{MappingEntry, MappingStore};

/// License header of the generated artifact. It belongs to the firmware the
/// artifact is compiled into, not to this tool, and must be reproduced
/// verbatim.
const LICENSE_HEADER: &str = "
/*
 * hp_display - program for Arduino for replacing the display on some
 * discontinued HP/Agilent/Keysight instruments.
 * Copyright (C) 2019  Ragnar Sundblad
 *\x20
 * This file is part of the hp_display program.
 *\x20
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.

 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.

 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */
";

/// Sort rank of a mapped character: digits, then the unit and sign symbols
/// the instrument shows constantly, then everything else. Ties break on
/// code point.
pub fn sort_key(ch: char) -> (u8, u32) {
    let tier = if ch.is_ascii_digit() {
        0
    } else if matches!(ch, '-' | '+' | 'm' | 'V' | 'd' | 'B') {
        1
    } else {
        2
    };
    (tier, ch as u32)
}

/// Store entries in emission order. The sort reads only the character, so
/// code and character columns stay index-aligned.
pub fn sorted_entries(store: &MappingStore) -> Vec<MappingEntry> {
    let mut entries = store.entries().to_vec();
    entries.sort_by_key(|entry| sort_key(entry.ch));
    entries
}

/// Write the lookup table as compilable C declarations: the entry count and
/// the two index-aligned arrays, in emission order.
pub fn write_table<W: Write>(store: &MappingStore, out: &mut W) -> io::Result<()> {
    let entries = sorted_entries(store);
    writeln!(out, "{LICENSE_HEADER}")?;
    writeln!(out, "#include <Arduino.h>")?;
    writeln!(out, "#include <stdint.h>")?;
    writeln!(out, "#include <stdlib.h>")?;
    writeln!(out, "#include \"hp_msg_parse.h\"")?;
    writeln!(out)?;
    writeln!(out, "uint16_t seg_n = {};", entries.len())?;
    writeln!(out, "uint16_t seg_codes[] = {{")?;
    for entry in &entries {
        writeln!(out, "0x{:04x}, ", entry.code)?;
    }
    writeln!(out, "}};")?;
    writeln!(out, "uint8_t seg_mapped_chars[] = {{")?;
    for entry in &entries {
        writeln!(out, "'{}', ", entry.ch)?;
    }
    writeln!(out, "}};")?;
    Ok(())
}

/// Generate the artifact file, replacing any previous one.
pub fn generate(store: &MappingStore, path: &Path) -> SegmapResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_table(store, &mut out)?;
    out.flush()?;
    log::info!("wrote {} mappings to {}", store.len(), path.display());
    Ok(())
}
