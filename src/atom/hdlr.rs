//! `hdlr` - handler reference. `component_subtype` selects the [`crate::MediaInformation`]
//! variant at the parent `mdia` level (spec §4.F tie-breaking note).

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::primitive::{ReadExt, WriteExt};
use crate::registry::HANDLER_REFERENCE;
use crate::types::VersionFlags;
use crate::{Error, Fourcc, Result};

/// 4 (version/flags) + 4×4 (component identity fields) = 20, plus the variable-length name.
pub const FIXED_LEN: u64 = 20;

/// Describes which handler component interprets the enclosing media's data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HandlerReference {
    pub version_flags: VersionFlags,
    pub component_type: Fourcc,
    pub component_subtype: Fourcc,
    pub component_manufacturer: Fourcc,
    pub component_flags: u32,
    pub component_flags_mask: u32,
    /// Raw bytes of the trailing component-name string, carried through unmodified: its
    /// encoding (Pascal-style length-prefixed, or null-terminated) is an application
    /// concern the grammar layer doesn't interpret.
    pub component_name: Vec<u8>,
}

impl Atom for HandlerReference {
    const FOURCC: Fourcc = HANDLER_REFERENCE;
}

impl ParseAtom for HandlerReference {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_len = size.content_len();
        if content_len < FIXED_LEN {
            return Err(Error::bad_format(format!(
                "hdlr body of {content_len} bytes is smaller than the fixed {FIXED_LEN} byte prefix"
            )));
        }

        let version_flags = VersionFlags::parse(reader)?;
        let component_type = reader.read_fourcc()?;
        let component_subtype = reader.read_fourcc()?;
        let component_manufacturer = reader.read_fourcc()?;
        let component_flags = reader.read_u32()?;
        let component_flags_mask = reader.read_u32()?;

        let name_len = content_len - FIXED_LEN;
        if name_len > cfg.bounds.blob_len {
            return Err(Error::out_of_memory(format!(
                "hdlr component name of {name_len} bytes exceeds the configured blob bound"
            )));
        }
        let component_name = reader.read_u8_vec(name_len)?;

        Ok(HandlerReference {
            version_flags,
            component_type,
            component_subtype,
            component_manufacturer,
            component_flags,
            component_flags_mask,
            component_name,
        })
    }
}

impl WriteAtom for HandlerReference {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        self.version_flags.write(writer)?;
        writer.write_fourcc(self.component_type)?;
        writer.write_fourcc(self.component_subtype)?;
        writer.write_fourcc(self.component_manufacturer)?;
        writer.write_u32(self.component_flags)?;
        writer.write_u32(self.component_flags_mask)?;
        writer.write_all(&self.component_name)?;
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(FIXED_LEN + self.component_name.len() as u64)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn roundtrips_with_trailing_name() {
        let hdlr = HandlerReference {
            version_flags: VersionFlags::default(),
            component_type: Fourcc::default(),
            component_subtype: Fourcc(*b"soun"),
            component_manufacturer: Fourcc(*b"appl"),
            component_flags: 0,
            component_flags_mask: 0,
            component_name: vec![0],
        };
        let mut buf = Vec::new();
        hdlr.write_body(&mut buf).unwrap();
        assert_eq!(buf.len(), 21);

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = HandlerReference::parse(&mut cursor, &cfg, hdlr.size()).unwrap();
        assert_eq!(parsed, hdlr);
    }

    #[test]
    fn rejects_undersize_body() {
        let cfg = ReadConfig::default();
        let mut cursor = Cursor::new(vec![0u8; 10]);
        assert!(HandlerReference::parse(&mut cursor, &cfg, Size::from_content_len(10)).is_err());
    }
}
