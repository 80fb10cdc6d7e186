//! `mdhd` - media header.

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::primitive::{ReadExt, WriteExt};
use crate::registry::MEDIA_HEADER;
use crate::types::VersionFlags;
use crate::{Fourcc, Result};

/// 4 (version/flags) + 4×4 (time fields) + 2 (packed language) + 2 (quality) = 24.
pub const BODY_LEN: u64 = 24;

/// Timing and language for a single media (the `mdia` this atom lives under).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MediaHeader {
    pub version_flags: VersionFlags,
    pub creation_time: u32,
    pub modification_time: u32,
    pub time_scale: u32,
    pub duration: u32,
    /// ISO-639-2/T language code, packed as five bits per character (spec leaves the
    /// packing opaque to the grammar layer; it is carried through unmodified).
    pub language: u16,
    pub quality: u16,
}

impl Atom for MediaHeader {
    const FOURCC: Fourcc = MEDIA_HEADER;
}

impl ParseAtom for MediaHeader {
    fn parse_atom(reader: &mut (impl Read + Seek), _cfg: &ReadConfig, size: Size) -> Result<Self> {
        if size.content_len() != BODY_LEN {
            return Err(crate::Error::bad_format_at(
                Self::FOURCC,
                0,
                format!("mdhd body of {} bytes, expected {BODY_LEN}", size.content_len()),
            ));
        }

        let version_flags = VersionFlags::parse(reader)?;
        let creation_time = reader.read_u32()?;
        let modification_time = reader.read_u32()?;
        let time_scale = reader.read_u32()?;
        let duration = reader.read_u32()?;
        let language = reader.read_u16()?;
        let quality = reader.read_u16()?;

        Ok(MediaHeader {
            version_flags,
            creation_time,
            modification_time,
            time_scale,
            duration,
            language,
            quality,
        })
    }
}

impl WriteAtom for MediaHeader {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        self.version_flags.write(writer)?;
        writer.write_u32(self.creation_time)?;
        writer.write_u32(self.modification_time)?;
        writer.write_u32(self.time_scale)?;
        writer.write_u32(self.duration)?;
        writer.write_u16(self.language)?;
        writer.write_u16(self.quality)?;
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(BODY_LEN)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn roundtrips() {
        let mdhd = MediaHeader {
            version_flags: VersionFlags::default(),
            creation_time: 0,
            modification_time: 0,
            time_scale: 44_100,
            duration: 44_100 * 3,
            language: 0x55c4,
            quality: 0,
        };
        let mut buf = Vec::new();
        mdhd.write_body(&mut buf).unwrap();
        assert_eq!(buf.len(), BODY_LEN as usize);

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = MediaHeader::parse(&mut cursor, &cfg, mdhd.size()).unwrap();
        assert_eq!(parsed, mdhd);
    }
}
