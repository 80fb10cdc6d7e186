//! `elst` - edit list: a table of edit segments describing how the track's media timeline maps
//! onto the movie timeline.

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::primitive::{ReadExt, WriteExt};
use crate::registry::EDIT_LIST;
use crate::types::{FixedQ16_16, VersionFlags};
use crate::{Error, Fourcc, Result};

/// One edit segment: how long it lasts in the movie timeline, where it starts in the media
/// timeline, and at what rate the media plays during it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EditListEntry {
    pub track_duration: u32,
    pub media_time: u32,
    pub media_rate: FixedQ16_16,
}

/// A track's edit list: version/flags + an entry count + that many 12 byte entries
/// (spec §4.E).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EditList {
    pub version_flags: VersionFlags,
    pub entries: Vec<EditListEntry>,
}

impl Atom for EditList {
    const FOURCC: Fourcc = EDIT_LIST;
}

impl ParseAtom for EditList {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_len = size.content_len();
        if content_len < 8 {
            return Err(Error::bad_format(format!(
                "elst body of {content_len} bytes is smaller than the fixed 8 byte prefix"
            )));
        }
        let version_flags = VersionFlags::parse(reader)?;
        let entry_count = reader.read_u32()?;
        if entry_count as usize > cfg.bounds.edit_list_entries {
            return Err(Error::out_of_memory(format!(
                "elst entry count of {entry_count} exceeds the configured bound"
            )));
        }
        if content_len != 8 + 12 * entry_count as u64 {
            return Err(Error::bad_format(format!(
                "elst body of {content_len} bytes disagrees with {entry_count} 12 byte entries"
            )));
        }
        let mut entries = Vec::with_capacity(entry_count as usize);
        for _ in 0..entry_count {
            entries.push(EditListEntry {
                track_duration: reader.read_u32()?,
                media_time: reader.read_u32()?,
                media_rate: reader.read_q16_16()?,
            });
        }
        Ok(EditList { version_flags, entries })
    }
}

impl WriteAtom for EditList {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        self.version_flags.write(writer)?;
        writer.write_u32(self.entries.len() as u32)?;
        for e in &self.entries {
            writer.write_u32(e.track_duration)?;
            writer.write_u32(e.media_time)?;
            writer.write_q16_16(e.media_rate)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(8 + 12 * self.entries.len() as u64)
    }
}
