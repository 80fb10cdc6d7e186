//! `ftyp` - file type and compatible brands.

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::primitive::{ReadExt, WriteExt};
use crate::registry::FILE_TYPE;
use crate::{Error, Fourcc, Result};

/// The file type and the set of specifications a decoder would need to understand to render
/// this file, per spec §4.E/§4.G.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileType {
    pub major_brand: Fourcc,
    pub minor_version: u32,
    pub compatible_brands: Vec<Fourcc>,
}

impl Atom for FileType {
    const FOURCC: Fourcc = FILE_TYPE;
}

impl ParseAtom for FileType {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_len = size.content_len();
        if content_len < 8 || (content_len - 8) % 4 != 0 {
            return Err(Error::bad_format(format!(
                "ftyp body of {content_len} bytes isn't 8 + a multiple of 4"
            )));
        }

        let major_brand = reader.read_fourcc()?;
        let minor_version = reader.read_u32()?;

        let count = ((content_len - 8) / 4) as usize;
        if count > cfg.bounds.compatible_brands {
            return Err(Error::out_of_memory(format!(
                "ftyp declares {count} compatible brands, exceeding the configured bound"
            )));
        }

        let mut compatible_brands = Vec::with_capacity(count);
        for _ in 0..count {
            compatible_brands.push(reader.read_fourcc()?);
        }

        Ok(FileType { major_brand, minor_version, compatible_brands })
    }
}

impl WriteAtom for FileType {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_fourcc(self.major_brand)?;
        writer.write_u32(self.minor_version)?;
        for brand in &self.compatible_brands {
            writer.write_fourcc(*brand)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(8 + 4 * self.compatible_brands.len() as u64)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn roundtrips_scenario_2_ftyp() {
        let bytes: &[u8] = &[
            0x00, 0x00, 0x00, 0x14, b'f', b't', b'y', b'p', b'q', b't', b' ', b' ', 0x00, 0x00,
            0x02, 0x00, b'q', b't', b' ', b' ',
        ];
        let mut cursor = Cursor::new(&bytes[8..]);
        let size = Size::from_content_len(bytes.len() as u64 - 8);
        let cfg = ReadConfig::default();
        let ft = FileType::parse(&mut cursor, &cfg, size).unwrap();
        assert_eq!(ft.major_brand, Fourcc(*b"qt  "));
        assert_eq!(ft.minor_version, 512);
        assert_eq!(ft.compatible_brands, vec![Fourcc(*b"qt  ")]);

        let mut out = Vec::new();
        ft.write(&mut out).unwrap();
        assert_eq!(out, bytes);
    }

    #[test]
    fn rejects_misaligned_body() {
        let cfg = ReadConfig::default();
        let mut cursor = Cursor::new(vec![0u8; 9]);
        let size = Size::from_content_len(9);
        assert!(FileType::parse(&mut cursor, &cfg, size).is_err());
    }
}
