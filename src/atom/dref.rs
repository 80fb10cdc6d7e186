//! `dref` - data reference. The registry classifies this as a leaf: this crate does not parse
//! the individual data-entry atoms (`url `, `alis`, ...) it contains, it keeps their combined
//! byte range verbatim alongside the declared entry count.

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::primitive::{ReadExt, WriteExt};
use crate::registry::DATA_REFERENCE;
use crate::types::VersionFlags;
use crate::{Error, Fourcc, Result};

/// 4 (version/flags) + 4 (entry count) = 8.
pub const FIXED_LEN: u64 = 8;

/// `dref` - a table of opaque data-entry atoms.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DataReference {
    pub version_flags: VersionFlags,
    pub entry_count: u32,
    pub entries: Vec<u8>,
}

impl Atom for DataReference {
    const FOURCC: Fourcc = DATA_REFERENCE;
}

impl ParseAtom for DataReference {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_len = size.content_len();
        if content_len < FIXED_LEN {
            return Err(Error::bad_format(format!(
                "dref body of {content_len} bytes is smaller than the fixed {FIXED_LEN} byte prefix"
            )));
        }
        let version_flags = VersionFlags::parse(reader)?;
        let entry_count = reader.read_u32()?;
        let entries_len = content_len - FIXED_LEN;
        if entries_len > cfg.bounds.blob_len {
            return Err(Error::out_of_memory(format!(
                "dref entry table of {entries_len} bytes exceeds the configured blob bound"
            )));
        }
        let entries = reader.read_u8_vec(entries_len)?;
        Ok(DataReference { version_flags, entry_count, entries })
    }
}

impl WriteAtom for DataReference {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        self.version_flags.write(writer)?;
        writer.write_u32(self.entry_count)?;
        writer.write_all(&self.entries)?;
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(FIXED_LEN + self.entries.len() as u64)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn roundtrips() {
        let dref = DataReference {
            version_flags: VersionFlags::default(),
            entry_count: 1,
            entries: vec![0, 0, 0, 12, b'u', b'r', b'l', b' ', 0, 0, 0, 1],
        };
        let mut buf = Vec::new();
        dref.write_body(&mut buf).unwrap();
        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = DataReference::parse(&mut cursor, &cfg, dref.size()).unwrap();
        assert_eq!(parsed, dref);
    }
}
