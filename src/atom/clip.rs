//! `clip` - clipping, and its `crgn` leaf child.

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ChildCursor, LenOrZero, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::registry::{CLIPPING, CLIPPING_REGION};
use crate::types::Region;
use crate::{Error, Fourcc, Result};

/// `crgn` - a clipping region: a 16-bit size, a [`Rect`](crate::Rect), then opaque bytes
/// (spec §3's `Region` scalar type).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ClippingRegion {
    pub region: Region,
}

impl Atom for ClippingRegion {
    const FOURCC: Fourcc = CLIPPING_REGION;
}

impl ParseAtom for ClippingRegion {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_len = size.content_len();
        let region = Region::parse(reader, cfg.bounds.blob_len)?;
        if region.len() != content_len {
            return Err(Error::bad_format(format!(
                "crgn body of {content_len} bytes disagrees with its own declared region size"
            )));
        }
        Ok(ClippingRegion { region })
    }
}

impl WriteAtom for ClippingRegion {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        self.region.write(writer)
    }

    fn size(&self) -> Size {
        Size::from_content_len(self.region.len())
    }
}

/// `clip` - a single optional clipping region.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Clipping {
    pub region: Option<ClippingRegion>,
}

impl Atom for Clipping {
    const FOURCC: Fourcc = CLIPPING;
}

impl ParseAtom for Clipping {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_start = reader.stream_position()?;
        let cursor = ChildCursor::new(content_start, size.content_len());
        let mut clip = Clipping::default();

        while let Some((pos, head)) = cursor.next(reader, cfg)? {
            match head.fourcc() {
                CLIPPING_REGION if clip.region.is_none() => {
                    clip.region = Some(ClippingRegion::parse(reader, cfg, head.size())?);
                }
                CLIPPING_REGION => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                _ => cursor.skip_to_end(reader, pos, head)?,
            }
        }

        Ok(clip)
    }
}

impl WriteAtom for Clipping {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        if let Some(crgn) = &self.region {
            crgn.write(writer)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(self.region.len_or_zero())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::Rect;
    use std::io::Cursor;

    #[test]
    fn roundtrips_without_region() {
        let clip = Clipping::default();
        let mut buf = Vec::new();
        clip.write_body(&mut buf).unwrap();
        assert!(buf.is_empty());

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = Clipping::parse(&mut cursor, &cfg, clip.size()).unwrap();
        assert_eq!(parsed, clip);
    }

    #[test]
    fn roundtrips_with_region() {
        let clip = Clipping {
            region: Some(ClippingRegion {
                region: Region { rect: Rect { top: 0, left: 0, bottom: 10, right: 10 }, opaque: vec![] },
            }),
        };
        let mut buf = Vec::new();
        clip.write_body(&mut buf).unwrap();

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = Clipping::parse(&mut cursor, &cfg, clip.size()).unwrap();
        assert_eq!(parsed, clip);
    }
}
