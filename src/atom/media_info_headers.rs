//! The media-information header leaves that distinguish the `minf` variants: `vmhd` (video),
//! `smhd` (sound), `gmin` (base), plus `text` (the base variant's text sibling).

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::primitive::{ReadExt, WriteExt};
use crate::registry::{
    BASE_MEDIA_INFORMATION, SOUND_MEDIA_INFORMATION_HEADER, TEXT_MEDIA_INFORMATION,
    VIDEO_MEDIA_INFORMATION_HEADER,
};
use crate::types::{FixedQ8_8, VersionFlags};
use crate::{Error, Fourcc, Result};

/// 4 (version/flags) + 2 (graphics mode) + 3x2 (opcolor) = 12.
pub const VMHD_BODY_LEN: u64 = 12;

/// `vmhd` - video media information header.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VideoMediaInformationHeader {
    pub version_flags: VersionFlags,
    pub graphics_mode: u16,
    pub opcolor: [u16; 3],
}

impl Atom for VideoMediaInformationHeader {
    const FOURCC: Fourcc = VIDEO_MEDIA_INFORMATION_HEADER;
}

impl ParseAtom for VideoMediaInformationHeader {
    fn parse_atom(reader: &mut (impl Read + Seek), _cfg: &ReadConfig, size: Size) -> Result<Self> {
        if size.content_len() != VMHD_BODY_LEN {
            return Err(Error::bad_format(format!(
                "vmhd body of {} bytes, expected {VMHD_BODY_LEN}",
                size.content_len()
            )));
        }
        Ok(VideoMediaInformationHeader {
            version_flags: VersionFlags::parse(reader)?,
            graphics_mode: reader.read_u16()?,
            opcolor: [reader.read_u16()?, reader.read_u16()?, reader.read_u16()?],
        })
    }
}

impl WriteAtom for VideoMediaInformationHeader {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        self.version_flags.write(writer)?;
        writer.write_u16(self.graphics_mode)?;
        for c in self.opcolor {
            writer.write_u16(c)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(VMHD_BODY_LEN)
    }
}

/// 4 (version/flags) + 2 (balance) + 2 (reserved) = 8.
pub const SMHD_BODY_LEN: u64 = 8;

/// `smhd` - sound media information header.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SoundMediaInformationHeader {
    pub version_flags: VersionFlags,
    pub balance: FixedQ8_8,
}

impl Atom for SoundMediaInformationHeader {
    const FOURCC: Fourcc = SOUND_MEDIA_INFORMATION_HEADER;
}

impl ParseAtom for SoundMediaInformationHeader {
    fn parse_atom(reader: &mut (impl Read + Seek), _cfg: &ReadConfig, size: Size) -> Result<Self> {
        if size.content_len() != SMHD_BODY_LEN {
            return Err(Error::bad_format(format!(
                "smhd body of {} bytes, expected {SMHD_BODY_LEN}",
                size.content_len()
            )));
        }
        let version_flags = VersionFlags::parse(reader)?;
        let balance = reader.read_q8_8()?;
        reader.read_u16()?;
        Ok(SoundMediaInformationHeader { version_flags, balance })
    }
}

impl WriteAtom for SoundMediaInformationHeader {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        self.version_flags.write(writer)?;
        writer.write_q8_8(self.balance)?;
        writer.write_zeros(2)?;
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(SMHD_BODY_LEN)
    }
}

/// 4 (version/flags) + 2 (graphics mode) + 3x2 (opcolor) + 2 (balance) + 2 (reserved) = 16.
pub const GMIN_BODY_LEN: u64 = 16;

/// `gmin` - base media information, shared by handler types that are neither video nor sound.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BaseMediaInformation {
    pub version_flags: VersionFlags,
    pub graphics_mode: u16,
    pub opcolor: [u16; 3],
    pub balance: i16,
}

impl Atom for BaseMediaInformation {
    const FOURCC: Fourcc = BASE_MEDIA_INFORMATION;
}

impl ParseAtom for BaseMediaInformation {
    fn parse_atom(reader: &mut (impl Read + Seek), _cfg: &ReadConfig, size: Size) -> Result<Self> {
        if size.content_len() != GMIN_BODY_LEN {
            return Err(Error::bad_format(format!(
                "gmin body of {} bytes, expected {GMIN_BODY_LEN}",
                size.content_len()
            )));
        }
        let version_flags = VersionFlags::parse(reader)?;
        let graphics_mode = reader.read_u16()?;
        let opcolor = [reader.read_u16()?, reader.read_u16()?, reader.read_u16()?];
        let balance = reader.read_i16()?;
        reader.read_u16()?;
        Ok(BaseMediaInformation { version_flags, graphics_mode, opcolor, balance })
    }
}

impl WriteAtom for BaseMediaInformation {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        self.version_flags.write(writer)?;
        writer.write_u16(self.graphics_mode)?;
        for c in self.opcolor {
            writer.write_u16(c)?;
        }
        writer.write_i16(self.balance)?;
        writer.write_zeros(2)?;
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(GMIN_BODY_LEN)
    }
}

/// `text` - the base variant's text-track sibling of `gmin`. This crate doesn't interpret the
/// legacy text-display fields it carries; the body is kept verbatim.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TextMediaInformation {
    pub data: Vec<u8>,
}

impl Atom for TextMediaInformation {
    const FOURCC: Fourcc = TEXT_MEDIA_INFORMATION;
}

impl ParseAtom for TextMediaInformation {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_len = size.content_len();
        if content_len > cfg.bounds.blob_len {
            return Err(Error::out_of_memory(format!(
                "text body of {content_len} bytes exceeds the configured blob bound"
            )));
        }
        let mut data = vec![0; content_len as usize];
        reader.read_exact(&mut data)?;
        Ok(TextMediaInformation { data })
    }
}

impl WriteAtom for TextMediaInformation {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_all(&self.data)?;
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(self.data.len() as u64)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn vmhd_roundtrips() {
        let vmhd = VideoMediaInformationHeader {
            version_flags: VersionFlags::default(),
            graphics_mode: 0x40,
            opcolor: [0x8000, 0x8000, 0x8000],
        };
        let mut buf = Vec::new();
        vmhd.write_body(&mut buf).unwrap();
        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = VideoMediaInformationHeader::parse(&mut cursor, &cfg, vmhd.size()).unwrap();
        assert_eq!(parsed, vmhd);
    }

    #[test]
    fn smhd_roundtrips() {
        let smhd =
            SoundMediaInformationHeader { version_flags: VersionFlags::default(), balance: FixedQ8_8::ZERO };
        let mut buf = Vec::new();
        smhd.write_body(&mut buf).unwrap();
        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = SoundMediaInformationHeader::parse(&mut cursor, &cfg, smhd.size()).unwrap();
        assert_eq!(parsed, smhd);
    }
}
