//! `mvhd` - movie header.

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::primitive::{ReadExt, WriteExt};
use crate::registry::MOVIE_HEADER;
use crate::types::{FixedQ16_16, FixedQ8_8, Matrix3x3, VersionFlags};
use crate::{Fourcc, Result};

/// Fixed body size per spec §4.E: 4 (version/flags) + 16 (four u32 time fields) + 4
/// (preferred rate) + 2 (preferred volume) + 10 (reserved) + 36 (matrix) + 28 (seven u32
/// trailer fields).
pub const BODY_LEN: u64 = 100;

/// Timing, rate/volume defaults, the display matrix, and bookkeeping for the whole movie.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MovieHeader {
    pub version_flags: VersionFlags,
    pub creation_time: u32,
    pub modification_time: u32,
    pub time_scale: u32,
    pub duration: u32,
    pub preferred_rate: FixedQ16_16,
    pub preferred_volume: FixedQ8_8,
    pub matrix: Matrix3x3,
    pub preview_time: u32,
    pub preview_duration: u32,
    pub poster_time: u32,
    pub selection_time: u32,
    pub selection_duration: u32,
    pub current_time: u32,
    pub next_track_id: u32,
}

impl Atom for MovieHeader {
    const FOURCC: Fourcc = MOVIE_HEADER;
}

impl ParseAtom for MovieHeader {
    fn parse_atom(reader: &mut (impl Read + Seek), _cfg: &ReadConfig, size: Size) -> Result<Self> {
        if size.content_len() != BODY_LEN {
            return Err(crate::Error::bad_format_at(
                Self::FOURCC,
                0,
                format!("mvhd body of {} bytes, expected {BODY_LEN}", size.content_len()),
            ));
        }

        let version_flags = VersionFlags::parse(reader)?;
        let creation_time = reader.read_u32()?;
        let modification_time = reader.read_u32()?;
        let time_scale = reader.read_u32()?;
        let duration = reader.read_u32()?;
        let preferred_rate = reader.read_q16_16()?;
        let preferred_volume = reader.read_q8_8()?;
        reader.read_u8_vec(10)?; // reserved
        let matrix = Matrix3x3::parse(reader)?;
        let preview_time = reader.read_u32()?;
        let preview_duration = reader.read_u32()?;
        let poster_time = reader.read_u32()?;
        let selection_time = reader.read_u32()?;
        let selection_duration = reader.read_u32()?;
        let current_time = reader.read_u32()?;
        let next_track_id = reader.read_u32()?;

        Ok(MovieHeader {
            version_flags,
            creation_time,
            modification_time,
            time_scale,
            duration,
            preferred_rate,
            preferred_volume,
            matrix,
            preview_time,
            preview_duration,
            poster_time,
            selection_time,
            selection_duration,
            current_time,
            next_track_id,
        })
    }
}

impl WriteAtom for MovieHeader {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        self.version_flags.write(writer)?;
        writer.write_u32(self.creation_time)?;
        writer.write_u32(self.modification_time)?;
        writer.write_u32(self.time_scale)?;
        writer.write_u32(self.duration)?;
        writer.write_q16_16(self.preferred_rate)?;
        writer.write_q8_8(self.preferred_volume)?;
        writer.write_zeros(10)?;
        self.matrix.write(writer)?;
        writer.write_u32(self.preview_time)?;
        writer.write_u32(self.preview_duration)?;
        writer.write_u32(self.poster_time)?;
        writer.write_u32(self.selection_time)?;
        writer.write_u32(self.selection_duration)?;
        writer.write_u32(self.current_time)?;
        writer.write_u32(self.next_track_id)?;
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

    fn zeroed(time_scale: u32, next_track_id: u32) -> MovieHeader {
        MovieHeader {
            version_flags: VersionFlags::default(),
            creation_time: 0,
            modification_time: 0,
            time_scale,
            duration: 0,
            preferred_rate: FixedQ16_16::ONE,
            preferred_volume: FixedQ8_8::ZERO,
            matrix: Matrix3x3::IDENTITY,
            preview_time: 0,
            preview_duration: 0,
            poster_time: 0,
            selection_time: 0,
            selection_duration: 0,
            current_time: 0,
            next_track_id,
        }
    }

    #[test]
    fn size_matches_spec_fixed_body() {
        let mvhd = zeroed(600, 1);
        assert_eq!(mvhd.size().content_len(), 100);
        assert_eq!(mvhd.size().len(), 108);
    }

    #[test]
    fn write_then_parse_roundtrips() {
        let mvhd = zeroed(600, 1);
        let mut buf = Vec::new();
        mvhd.write_body(&mut buf).unwrap();
        assert_eq!(buf.len(), 100);

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = MovieHeader::parse(&mut cursor, &cfg, mvhd.size()).unwrap();
        assert_eq!(parsed, mvhd);
    }

    #[test]
    fn rejects_wrong_body_size() {
        let cfg = ReadConfig::default();
        let mut cursor = Cursor::new(vec![0u8; 50]);
        assert!(MovieHeader::parse(&mut cursor, &cfg, Size::from_content_len(50)).is_err());
    }
}
