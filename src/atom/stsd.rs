//! `stsd` - sample description. The registry classifies this as a leaf: this crate does not
//! decode the codec-specific sample-description entries it contains, it keeps their combined
//! byte range verbatim alongside the declared entry count.

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::primitive::{ReadExt, WriteExt};
use crate::registry::SAMPLE_DESCRIPTION;
use crate::types::VersionFlags;
use crate::{Error, Fourcc, Result};

/// 4 (version/flags) + 4 (entry count) = 8.
pub const FIXED_LEN: u64 = 8;

/// `stsd` - a table of opaque codec-specific sample-description entries.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SampleDescription {
    pub version_flags: VersionFlags,
    pub entry_count: u32,
    pub entries: Vec<u8>,
}

impl Atom for SampleDescription {
    const FOURCC: Fourcc = SAMPLE_DESCRIPTION;
}

impl ParseAtom for SampleDescription {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_len = size.content_len();
        if content_len < FIXED_LEN {
            return Err(Error::bad_format(format!(
                "stsd body of {content_len} bytes is smaller than the fixed {FIXED_LEN} byte prefix"
            )));
        }
        let version_flags = VersionFlags::parse(reader)?;
        let entry_count = reader.read_u32()?;
        let entries_len = content_len - FIXED_LEN;
        if entries_len > cfg.bounds.blob_len {
            return Err(Error::out_of_memory(format!(
                "stsd entry table of {entries_len} bytes exceeds the configured blob bound"
            )));
        }
        let entries = reader.read_u8_vec(entries_len)?;
        Ok(SampleDescription { version_flags, entry_count, entries })
    }
}

impl WriteAtom for SampleDescription {
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
        let stsd = SampleDescription {
            version_flags: VersionFlags::default(),
            entry_count: 0,
            entries: vec![],
        };
        let mut buf = Vec::new();
        stsd.write_body(&mut buf).unwrap();
        assert_eq!(buf.len(), 8);

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = SampleDescription::parse(&mut cursor, &cfg, stsd.size()).unwrap();
        assert_eq!(parsed, stsd);
    }
}
