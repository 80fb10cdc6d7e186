//! `tkhd` - track header.

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::primitive::{ReadExt, WriteExt};
use crate::registry::TRACK_HEADER;
use crate::types::{FixedQ16_16, FixedQ8_8, Matrix3x3, VersionFlags};
use crate::{Fourcc, Result};

/// Fixed body size per spec §4.E: 4 + 8 + 4 + 4 + 4 + 8 + 4 + 2 + 36 + 8 = 84.
pub const BODY_LEN: u64 = 84;

/// Per-track timing, geometry and z-order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TrackHeader {
    pub version_flags: VersionFlags,
    pub creation_time: u32,
    pub modification_time: u32,
    pub track_id: u32,
    pub duration: u32,
    pub layer: u16,
    pub alternate_group: u16,
    pub volume: FixedQ8_8,
    pub matrix: Matrix3x3,
    pub track_width: FixedQ16_16,
    pub track_height: FixedQ16_16,
}

impl Atom for TrackHeader {
    const FOURCC: Fourcc = TRACK_HEADER;
}

impl ParseAtom for TrackHeader {
    fn parse_atom(reader: &mut (impl Read + Seek), _cfg: &ReadConfig, size: Size) -> Result<Self> {
        if size.content_len() != BODY_LEN {
            return Err(crate::Error::bad_format_at(
                Self::FOURCC,
                0,
                format!("tkhd body of {} bytes, expected {BODY_LEN}", size.content_len()),
            ));
        }

        let version_flags = VersionFlags::parse(reader)?;
        let creation_time = reader.read_u32()?;
        let modification_time = reader.read_u32()?;
        let track_id = reader.read_u32()?;
        reader.read_u32()?; // reserved
        let duration = reader.read_u32()?;
        reader.read_u8_vec(8)?; // reserved
        let layer = reader.read_u16()?;
        let alternate_group = reader.read_u16()?;
        let volume = reader.read_q8_8()?;
        reader.read_u16()?; // reserved
        let matrix = Matrix3x3::parse(reader)?;
        let track_width = reader.read_q16_16()?;
        let track_height = reader.read_q16_16()?;

        Ok(TrackHeader {
            version_flags,
            creation_time,
            modification_time,
            track_id,
            duration,
            layer,
            alternate_group,
            volume,
            matrix,
            track_width,
            track_height,
        })
    }
}

impl WriteAtom for TrackHeader {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        self.version_flags.write(writer)?;
        writer.write_u32(self.creation_time)?;
        writer.write_u32(self.modification_time)?;
        writer.write_u32(self.track_id)?;
        writer.write_u32(0)?;
        writer.write_u32(self.duration)?;
        writer.write_zeros(8)?;
        writer.write_u16(self.layer)?;
        writer.write_u16(self.alternate_group)?;
        writer.write_q8_8(self.volume)?;
        writer.write_u16(0)?;
        self.matrix.write(writer)?;
        writer.write_q16_16(self.track_width)?;
        writer.write_q16_16(self.track_height)?;
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

    fn sample() -> TrackHeader {
        TrackHeader {
            version_flags: VersionFlags::new(0, [0, 0, 0x0f]),
            creation_time: 0,
            modification_time: 0,
            track_id: 1,
            duration: 600,
            layer: 0,
            alternate_group: 0,
            volume: FixedQ8_8::new(1, 0),
            matrix: Matrix3x3::IDENTITY,
            track_width: FixedQ16_16::new(640, 0),
            track_height: FixedQ16_16::new(480, 0),
        }
    }

    #[test]
    fn roundtrips() {
        let tkhd = sample();
        let mut buf = Vec::new();
        tkhd.write_body(&mut buf).unwrap();
        assert_eq!(buf.len(), BODY_LEN as usize);

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = TrackHeader::parse(&mut cursor, &cfg, tkhd.size()).unwrap();
        assert_eq!(parsed, tkhd);
    }
}
