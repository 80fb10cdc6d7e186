//! `pnot` - movie preview pointer: which atom in the file (identified by type and index) is
//! the poster-frame preview.

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::primitive::{ReadExt, WriteExt};
use crate::registry::PREVIEW;
use crate::{Fourcc, Result};

/// 4 (modification date) + 4 (atom type) + 2 (atom index) = 10.
pub const BODY_LEN: u64 = 10;

/// A pointer to the preview: the modification date it was generated on, the four-character
/// type of the atom holding the preview image, and that atom's index among same-typed
/// siblings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Preview {
    pub modification_date: u32,
    pub atom_type: Fourcc,
    pub atom_index: u16,
}

impl Atom for Preview {
    const FOURCC: Fourcc = PREVIEW;
}

impl ParseAtom for Preview {
    fn parse_atom(reader: &mut (impl Read + Seek), _cfg: &ReadConfig, size: Size) -> Result<Self> {
        if size.content_len() != BODY_LEN {
            return Err(crate::Error::bad_format_at(
                Self::FOURCC,
                0,
                format!("pnot body of {} bytes, expected {BODY_LEN}", size.content_len()),
            ));
        }
        let modification_date = reader.read_u32()?;
        let atom_type = reader.read_fourcc()?;
        let atom_index = reader.read_u16()?;
        Ok(Preview { modification_date, atom_type, atom_index })
    }
}

impl WriteAtom for Preview {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_u32(self.modification_date)?;
        writer.write_fourcc(self.atom_type)?;
        writer.write_u16(self.atom_index)?;
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
        let pnot = Preview { modification_date: 1, atom_type: Fourcc(*b"PICT"), atom_index: 1 };
        let mut buf = Vec::new();
        pnot.write_body(&mut buf).unwrap();
        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = Preview::parse(&mut cursor, &cfg, pnot.size()).unwrap();
        assert_eq!(parsed, pnot);
    }
}
