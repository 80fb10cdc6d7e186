//! `ctab` - color table: a palette of 16-bit RGB quadruples.

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::primitive::{ReadExt, WriteExt};
use crate::registry::COLOR_TABLE;
use crate::{Error, Fourcc, Result};

/// One color table quadruple: an index followed by red, green and blue components.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ColorTableEntry {
    pub index: u16,
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

/// `seed (u32) + flags (u16) + size (u16, meaning entries - 1) + (size + 1) quadruples of u16`
/// (spec §4.E).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ColorTable {
    pub seed: u32,
    pub flags: u16,
    pub entries: Vec<ColorTableEntry>,
}

impl Atom for ColorTable {
    const FOURCC: Fourcc = COLOR_TABLE;
}

impl ParseAtom for ColorTable {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_len = size.content_len();
        if content_len < 8 {
            return Err(Error::bad_format(format!(
                "ctab body of {content_len} bytes is smaller than the fixed 8 byte prefix"
            )));
        }
        let seed = reader.read_u32()?;
        let flags = reader.read_u16()?;
        let size_field = reader.read_u16()?;
        let entry_count = size_field as u32 + 1;
        if entry_count as usize > cfg.bounds.sample_table_entries {
            return Err(Error::out_of_memory(format!(
                "ctab entry count of {entry_count} exceeds the configured bound"
            )));
        }
        if content_len != 8 + 8 * entry_count as u64 {
            return Err(Error::bad_format(format!(
                "ctab body of {content_len} bytes disagrees with {entry_count} 8 byte quadruples"
            )));
        }
        let mut entries = Vec::with_capacity(entry_count as usize);
        for _ in 0..entry_count {
            entries.push(ColorTableEntry {
                index: reader.read_u16()?,
                red: reader.read_u16()?,
                green: reader.read_u16()?,
                blue: reader.read_u16()?,
            });
        }
        Ok(ColorTable { seed, flags, entries })
    }
}

impl WriteAtom for ColorTable {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_u32(self.seed)?;
        writer.write_u16(self.flags)?;
        let size_field = self.entries.len().saturating_sub(1) as u16;
        writer.write_u16(size_field)?;
        for e in &self.entries {
            writer.write_u16(e.index)?;
            writer.write_u16(e.red)?;
            writer.write_u16(e.green)?;
            writer.write_u16(e.blue)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(8 + 8 * self.entries.len() as u64)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn roundtrips_single_entry_table() {
        let ctab = ColorTable {
            seed: 0,
            flags: 0x8000,
            entries: vec![ColorTableEntry { index: 0, red: 0xffff, green: 0xffff, blue: 0xffff }],
        };
        assert_eq!(ctab.size().content_len(), 16);

        let mut buf = Vec::new();
        ctab.write_body(&mut buf).unwrap();
        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = ColorTable::parse(&mut cursor, &cfg, ctab.size()).unwrap();
        assert_eq!(parsed, ctab);
    }
}
