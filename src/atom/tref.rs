//! `tref` - track reference container. The registry names `tref` itself but assigns it no
//! recognized child kind (reference-type entries like `chap`/`hint` are not part of this
//! crate's closed registry), so every child is preserved verbatim as an [`OpaqueAtom`].

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ChildCursor, OpaqueAtom, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::registry::TRACK_REFERENCE;
use crate::{Error, Fourcc, Result};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TrackReference {
    pub references: Vec<OpaqueAtom>,
}

impl Atom for TrackReference {
    const FOURCC: Fourcc = TRACK_REFERENCE;
}

impl ParseAtom for TrackReference {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_start = reader.stream_position()?;
        let cursor = ChildCursor::new(content_start, size.content_len());
        let mut tref = TrackReference::default();

        while let Some((pos, head)) = cursor.next(reader, cfg)? {
            if tref.references.len() >= cfg.bounds.opaque_children {
                return Err(Error::out_of_memory(
                    "tref reference count exceeds the configured bound",
                ));
            }
            tref.references.push(OpaqueAtom::parse(reader, head.fourcc(), head.size(), &cfg.bounds)?);
            cursor.skip_to_end(reader, pos, head)?;
        }

        Ok(tref)
    }
}

impl WriteAtom for TrackReference {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        for r in &self.references {
            r.write(writer)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(self.references.iter().map(|r| r.size().len()).sum())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn roundtrips_with_opaque_reference() {
        let tref = TrackReference {
            references: vec![OpaqueAtom { fourcc: Fourcc(*b"chap"), content: vec![0, 0, 0, 2] }],
        };
        let mut buf = Vec::new();
        tref.write_body(&mut buf).unwrap();

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = TrackReference::parse(&mut cursor, &cfg, tref.size()).unwrap();
        assert_eq!(parsed, tref);
    }
}
