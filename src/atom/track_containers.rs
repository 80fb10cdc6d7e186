//! `imap` / `\0\0in` - the track input map. `imap` holds a bounded list of `\0\0in` entries;
//! each entry carries the `\0\0ty`/`obid` leaves from [`misc_leaf`](crate::atom::misc_leaf) plus
//! whatever else a writer chose to nest under it, preserved opaquely since the registry gives
//! these nested children no further grammar.

use std::io::{Read, Seek, Write};

use crate::atom::misc_leaf::{ObjectId, TrackInputType};
use crate::atom::{check_bound, Atom, ChildCursor, LenOrZero, OpaqueAtom, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::registry::{OBJECT_ID, TRACK_INPUT, TRACK_INPUT_MAP, TRACK_INPUT_TYPE};
use crate::{Error, Fourcc, Result};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TrackInput {
    pub input_type: Option<TrackInputType>,
    pub object_id: Option<ObjectId>,
    pub other_children: Vec<OpaqueAtom>,
}

impl Atom for TrackInput {
    const FOURCC: Fourcc = TRACK_INPUT;
}

impl ParseAtom for TrackInput {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_start = reader.stream_position()?;
        let cursor = ChildCursor::new(content_start, size.content_len());
        let mut input = TrackInput::default();

        while let Some((pos, head)) = cursor.next(reader, cfg)? {
            match head.fourcc() {
                TRACK_INPUT_TYPE if input.input_type.is_none() => {
                    input.input_type = Some(TrackInputType::parse(reader, cfg, head.size())?);
                }
                TRACK_INPUT_TYPE => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                OBJECT_ID if input.object_id.is_none() => {
                    input.object_id = Some(ObjectId::parse(reader, cfg, head.size())?);
                }
                OBJECT_ID => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                _ => {
                    check_bound(input.other_children.len(), cfg.bounds.opaque_children, "imap input child")?;
                    input.other_children.push(OpaqueAtom::parse(reader, head.fourcc(), head.size(), &cfg.bounds)?);
                    cursor.skip_to_end(reader, pos, head)?;
                }
            }
        }

        Ok(input)
    }
}

impl WriteAtom for TrackInput {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        if let Some(a) = &self.input_type {
            a.write(writer)?;
        }
        if let Some(a) = &self.object_id {
            a.write(writer)?;
        }
        for c in &self.other_children {
            c.write(writer)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(
            self.input_type.len_or_zero()
                + self.object_id.len_or_zero()
                + self.other_children.len_or_zero(),
        )
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TrackInputMap {
    pub inputs: Vec<TrackInput>,
}

impl Atom for TrackInputMap {
    const FOURCC: Fourcc = TRACK_INPUT_MAP;
}

impl ParseAtom for TrackInputMap {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_start = reader.stream_position()?;
        let cursor = ChildCursor::new(content_start, size.content_len());
        let mut imap = TrackInputMap::default();

        while let Some((pos, head)) = cursor.next(reader, cfg)? {
            match head.fourcc() {
                TRACK_INPUT => {
                    check_bound(imap.inputs.len(), cfg.bounds.opaque_children, "imap entries")?;
                    imap.inputs.push(TrackInput::parse(reader, cfg, head.size())?);
                }
                _ => cursor.skip_to_end(reader, pos, head)?,
            }
        }

        Ok(imap)
    }
}

impl WriteAtom for TrackInputMap {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        for input in &self.inputs {
            input.write(writer)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(self.inputs.len_or_zero())
    }
}
