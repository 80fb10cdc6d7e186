//! `udta` - user data container. Its children aren't part of this crate's closed registry
//! (spec §3), so each is preserved verbatim as an [`OpaqueAtom`] rather than interpreted.

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ChildCursor, OpaqueAtom, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::registry::USER_DATA;
use crate::{Error, Fourcc, Result};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserData {
    pub children: Vec<OpaqueAtom>,
}

impl Atom for UserData {
    const FOURCC: Fourcc = USER_DATA;
}

impl ParseAtom for UserData {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_start = reader.stream_position()?;
        let cursor = ChildCursor::new(content_start, size.content_len());
        let mut udta = UserData::default();

        while let Some((pos, head)) = cursor.next(reader, cfg)? {
            if udta.children.len() >= cfg.bounds.opaque_children {
                return Err(Error::out_of_memory(
                    "udta child count exceeds the configured bound",
                ));
            }
            udta.children.push(OpaqueAtom::parse(reader, head.fourcc(), head.size(), &cfg.bounds)?);
            cursor.skip_to_end(reader, pos, head)?;
        }

        Ok(udta)
    }
}

impl WriteAtom for UserData {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        for c in &self.children {
            c.write(writer)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(self.children.iter().map(|c| c.size().len()).sum())
    }
}
