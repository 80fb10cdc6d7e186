//! `trak` - track container: required `tkhd`/`mdia`, plus every optional track-level child.

use std::io::{Read, Seek, Write};

use crate::atom::clip::Clipping;
use crate::atom::edts::Edit;
use crate::atom::matt::TrackMatte;
use crate::atom::mdia::Media;
use crate::atom::misc_leaf::{TrackExcludeFromAutoselection, TrackLoadSettings};
use crate::atom::tapt::TrackApertureModeDimensions;
use crate::atom::tkhd::TrackHeader;
use crate::atom::track_containers::TrackInputMap;
use crate::atom::tref::TrackReference;
use crate::atom::udta::UserData;
use crate::atom::{Atom, ChildCursor, LenOrZero, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::registry::{
    CLIPPING, EDIT, MEDIA, TRACK, TRACK_APERTURE_MODE_DIMENSIONS, TRACK_EXCLUDE_FROM_AUTOSELECTION,
    TRACK_HEADER, TRACK_INPUT_MAP, TRACK_LOAD_SETTINGS, TRACK_MATTE, TRACK_REFERENCE, USER_DATA,
};
use crate::{Error, Fourcc, Result};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Track {
    pub track_header: TrackHeader,
    pub media: Media,
    pub track_aperture_mode_dimensions: Option<TrackApertureModeDimensions>,
    pub clipping: Option<Clipping>,
    pub track_matte: Option<TrackMatte>,
    pub edit: Option<Edit>,
    pub track_reference: Option<TrackReference>,
    pub track_exclude_from_autoselection: Option<TrackExcludeFromAutoselection>,
    pub track_load_settings: Option<TrackLoadSettings>,
    pub track_input_map: Option<TrackInputMap>,
    pub user_data: Option<UserData>,
}

impl Atom for Track {
    const FOURCC: Fourcc = TRACK;
}

impl ParseAtom for Track {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_start = reader.stream_position()?;
        let cursor = ChildCursor::new(content_start, size.content_len());

        let mut track_header = None;
        let mut media = None;
        let mut track = Track::default();

        while let Some((pos, head)) = cursor.next(reader, cfg)? {
            macro_rules! singleton {
                ($slot:expr) => {{
                    if $slot.is_some() {
                        return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                    }
                    $slot = Some(ParseAtom::parse(reader, cfg, head.size())?);
                }};
            }

            match head.fourcc() {
                TRACK_HEADER => singleton!(track_header),
                MEDIA => singleton!(media),
                TRACK_APERTURE_MODE_DIMENSIONS => singleton!(track.track_aperture_mode_dimensions),
                CLIPPING => singleton!(track.clipping),
                TRACK_MATTE => singleton!(track.track_matte),
                EDIT => singleton!(track.edit),
                TRACK_REFERENCE => singleton!(track.track_reference),
                TRACK_EXCLUDE_FROM_AUTOSELECTION => singleton!(track.track_exclude_from_autoselection),
                TRACK_LOAD_SETTINGS => singleton!(track.track_load_settings),
                TRACK_INPUT_MAP => singleton!(track.track_input_map),
                USER_DATA => singleton!(track.user_data),
                _ => cursor.skip_to_end(reader, pos, head)?,
            }
        }

        track.track_header =
            track_header.ok_or_else(|| Error::bad_format("trak is missing its required tkhd child"))?;
        track.media = media.ok_or_else(|| Error::bad_format("trak is missing its required mdia child"))?;

        Ok(track)
    }
}

impl WriteAtom for Track {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        self.track_header.write(writer)?;
        self.media.write(writer)?;
        if let Some(a) = &self.track_aperture_mode_dimensions {
            a.write(writer)?;
        }
        if let Some(a) = &self.clipping {
            a.write(writer)?;
        }
        if let Some(a) = &self.track_matte {
            a.write(writer)?;
        }
        if let Some(a) = &self.edit {
            a.write(writer)?;
        }
        if let Some(a) = &self.track_reference {
            a.write(writer)?;
        }
        if let Some(a) = &self.track_exclude_from_autoselection {
            a.write(writer)?;
        }
        if let Some(a) = &self.track_load_settings {
            a.write(writer)?;
        }
        if let Some(a) = &self.track_input_map {
            a.write(writer)?;
        }
        if let Some(a) = &self.user_data {
            a.write(writer)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(
            self.track_header.len()
                + self.media.len()
                + self.track_aperture_mode_dimensions.len_or_zero()
                + self.clipping.len_or_zero()
                + self.track_matte.len_or_zero()
                + self.edit.len_or_zero()
                + self.track_reference.len_or_zero()
                + self.track_exclude_from_autoselection.len_or_zero()
                + self.track_load_settings.len_or_zero()
                + self.track_input_map.len_or_zero()
                + self.user_data.len_or_zero(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::atom::mdhd::MediaHeader;
    use crate::types::{FixedQ16_16, FixedQ8_8, Matrix3x3, VersionFlags};
    use std::io::Cursor;

    fn sample() -> Track {
        Track {
            track_header: TrackHeader {
                version_flags: VersionFlags::default(),
                creation_time: 0,
                modification_time: 0,
                track_id: 1,
                duration: 0,
                layer: 0,
                alternate_group: 0,
                volume: FixedQ8_8::new(1, 0),
                matrix: Matrix3x3::IDENTITY,
                track_width: FixedQ16_16::new(640, 0),
                track_height: FixedQ16_16::new(480, 0),
            },
            media: Media {
                media_header: MediaHeader {
                    version_flags: VersionFlags::default(),
                    creation_time: 0,
                    modification_time: 0,
                    time_scale: 600,
                    duration: 0,
                    language: 0,
                    quality: 0,
                },
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn roundtrips_minimal_track() {
        let track = sample();
        let mut buf = Vec::new();
        track.write_body(&mut buf).unwrap();

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = Track::parse(&mut cursor, &cfg, track.size()).unwrap();
        assert_eq!(parsed, track);
    }

    #[test]
    fn rejects_missing_required_mdia() {
        let track = sample();
        let mut buf = Vec::new();
        track.track_header.write(&mut buf).unwrap();

        let mut cursor = Cursor::new(buf.clone());
        let cfg = ReadConfig::default();
        assert!(Track::parse(&mut cursor, &cfg, Size::from_content_len(buf.len() as u64)).is_err());
    }
}
