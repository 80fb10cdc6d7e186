//! `edts` - edit list container: a single optional `elst` child.

use std::io::{Read, Seek, Write};

use crate::atom::elst::EditList;
use crate::atom::{Atom, ChildCursor, LenOrZero, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::registry::{EDIT, EDIT_LIST};
use crate::{Error, Fourcc, Result};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Edit {
    pub edit_list: Option<EditList>,
}

impl Atom for Edit {
    const FOURCC: Fourcc = EDIT;
}

impl ParseAtom for Edit {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_start = reader.stream_position()?;
        let cursor = ChildCursor::new(content_start, size.content_len());
        let mut edts = Edit::default();

        while let Some((pos, head)) = cursor.next(reader, cfg)? {
            match head.fourcc() {
                EDIT_LIST if edts.edit_list.is_none() => {
                    edts.edit_list = Some(EditList::parse(reader, cfg, head.size())?);
                }
                EDIT_LIST => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                _ => cursor.skip_to_end(reader, pos, head)?,
            }
        }

        Ok(edts)
    }
}

impl WriteAtom for Edit {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        if let Some(elst) = &self.edit_list {
            elst.write(writer)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(self.edit_list.len_or_zero())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::atom::elst::EditListEntry;
    use crate::types::{FixedQ16_16, VersionFlags};
    use std::io::Cursor;

    #[test]
    fn roundtrips_with_edit_list() {
        let edts = Edit {
            edit_list: Some(EditList {
                version_flags: VersionFlags::default(),
                entries: vec![EditListEntry { track_duration: 1, media_time: 0, media_rate: FixedQ16_16::ONE }],
            }),
        };
        let mut buf = Vec::new();
        edts.write_body(&mut buf).unwrap();

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = Edit::parse(&mut cursor, &cfg, edts.size()).unwrap();
        assert_eq!(parsed, edts);
    }
}
