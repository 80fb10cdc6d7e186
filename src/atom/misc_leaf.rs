//! Small fixed-size leaves that don't warrant their own file: `load` (track load settings),
//! `obid` (object id), `\0\0ty` (track input type), and `txas` (track exclude from
//! autoselection, a presence-only marker with no body).

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::primitive::{ReadExt, WriteExt};
use crate::registry::{OBJECT_ID, TRACK_EXCLUDE_FROM_AUTOSELECTION, TRACK_INPUT_TYPE, TRACK_LOAD_SETTINGS};
use crate::{Error, Fourcc, Result};

/// `txas` - marks a track as excluded from autoselection. Carries no body; its presence alone
/// is the signal.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TrackExcludeFromAutoselection;

impl Atom for TrackExcludeFromAutoselection {
    const FOURCC: Fourcc = TRACK_EXCLUDE_FROM_AUTOSELECTION;
}

impl ParseAtom for TrackExcludeFromAutoselection {
    fn parse_atom(_reader: &mut (impl Read + Seek), _cfg: &ReadConfig, size: Size) -> Result<Self> {
        if size.content_len() != 0 {
            return Err(Error::bad_format(format!(
                "txas body of {} bytes, expected an empty body",
                size.content_len()
            )));
        }
        Ok(TrackExcludeFromAutoselection)
    }
}

impl WriteAtom for TrackExcludeFromAutoselection {
    fn write_body(&self, _writer: &mut impl Write) -> Result<()> {
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(0)
    }
}

/// 4x4 u32 fields.
pub const LOAD_BODY_LEN: u64 = 16;

/// `load` - hints for a player preloading this track.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TrackLoadSettings {
    pub preload_start_time: u32,
    pub preload_duration: u32,
    pub preload_flags: u32,
    pub default_hints: u32,
}

impl Atom for TrackLoadSettings {
    const FOURCC: Fourcc = TRACK_LOAD_SETTINGS;
}

impl ParseAtom for TrackLoadSettings {
    fn parse_atom(reader: &mut (impl Read + Seek), _cfg: &ReadConfig, size: Size) -> Result<Self> {
        if size.content_len() != LOAD_BODY_LEN {
            return Err(Error::bad_format(format!(
                "load body of {} bytes, expected {LOAD_BODY_LEN}",
                size.content_len()
            )));
        }
        Ok(TrackLoadSettings {
            preload_start_time: reader.read_u32()?,
            preload_duration: reader.read_u32()?,
            preload_flags: reader.read_u32()?,
            default_hints: reader.read_u32()?,
        })
    }
}

impl WriteAtom for TrackLoadSettings {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_u32(self.preload_start_time)?;
        writer.write_u32(self.preload_duration)?;
        writer.write_u32(self.preload_flags)?;
        writer.write_u32(self.default_hints)?;
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(LOAD_BODY_LEN)
    }
}

macro_rules! single_u32_atom {
    ($name:ident, $field:ident, $fourcc:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
        pub struct $name {
            pub $field: u32,
        }

        impl Atom for $name {
            const FOURCC: Fourcc = $fourcc;
        }

        impl ParseAtom for $name {
            fn parse_atom(
                reader: &mut (impl Read + Seek),
                _cfg: &ReadConfig,
                size: Size,
            ) -> Result<Self> {
                if size.content_len() != 4 {
                    return Err(Error::bad_format(format!(
                        "{} body of {} bytes, expected 4",
                        stringify!($name),
                        size.content_len()
                    )));
                }
                Ok($name { $field: reader.read_u32()? })
            }
        }

        impl WriteAtom for $name {
            fn write_body(&self, writer: &mut impl Write) -> Result<()> {
                writer.write_u32(self.$field)?;
                Ok(())
            }

            fn size(&self) -> Size {
                Size::from_content_len(4)
            }
        }
    };
}

single_u32_atom!(ObjectId, object_id, OBJECT_ID, "(`obid`) An identifier for a track-input atom's target object.");
single_u32_atom!(TrackInputType, input_type, TRACK_INPUT_TYPE, "(`\\0\\0ty`) A track-input atom's type code.");
