//! `matt` - track matte, and its `kmat` leaf child.

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ChildCursor, LenOrZero, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::registry::{COMPRESSED_MATTE, TRACK_MATTE};
use crate::{Error, Fourcc, Result};

/// `kmat` - a compressed matte. This crate doesn't interpret the embedded image description;
/// the body is kept verbatim so a round-trip reproduces it exactly.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CompressedMatte {
    pub data: Vec<u8>,
}

impl Atom for CompressedMatte {
    const FOURCC: Fourcc = COMPRESSED_MATTE;
}

impl ParseAtom for CompressedMatte {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_len = size.content_len();
        if content_len > cfg.bounds.blob_len {
            return Err(Error::out_of_memory(format!(
                "kmat body of {content_len} bytes exceeds the configured blob bound"
            )));
        }
        let mut data = vec![0; content_len as usize];
        reader.read_exact(&mut data)?;
        Ok(CompressedMatte { data })
    }
}

impl WriteAtom for CompressedMatte {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_all(&self.data)?;
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(self.data.len() as u64)
    }
}

/// `matt` - a single optional compressed matte.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TrackMatte {
    pub matte: Option<CompressedMatte>,
}

impl Atom for TrackMatte {
    const FOURCC: Fourcc = TRACK_MATTE;
}

impl ParseAtom for TrackMatte {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_start = reader.stream_position()?;
        let cursor = ChildCursor::new(content_start, size.content_len());
        let mut matt = TrackMatte::default();

        while let Some((pos, head)) = cursor.next(reader, cfg)? {
            match head.fourcc() {
                COMPRESSED_MATTE if matt.matte.is_none() => {
                    matt.matte = Some(CompressedMatte::parse(reader, cfg, head.size())?);
                }
                COMPRESSED_MATTE => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                _ => cursor.skip_to_end(reader, pos, head)?,
            }
        }

        Ok(matt)
    }
}

impl WriteAtom for TrackMatte {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        if let Some(kmat) = &self.matte {
            kmat.write(writer)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(self.matte.len_or_zero())
    }
}
