//! `tapt` - track aperture mode dimensions, and its three leaf children.

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ChildCursor, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::primitive::{ReadExt, WriteExt};
use crate::registry::{
    TRACK_APERTURE_MODE_DIMENSIONS, TRACK_CLEAN_APERTURE_DIMENSIONS,
    TRACK_ENCODED_PIXELS_DIMENSIONS, TRACK_PRODUCTION_APERTURE_DIMENSIONS,
};
use crate::types::{FixedQ16_16, VersionFlags};
use crate::{Error, Fourcc, Result};

/// 4 (version/flags) + 4 (width) + 4 (height) = 12.
pub const DIMENSIONS_BODY_LEN: u64 = 12;

macro_rules! dimensions_atom {
    ($name:ident, $fourcc:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
        pub struct $name {
            pub version_flags: VersionFlags,
            pub width: FixedQ16_16,
            pub height: FixedQ16_16,
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
                if size.content_len() != DIMENSIONS_BODY_LEN {
                    return Err(Error::bad_format(format!(
                        "{} body of {} bytes, expected {DIMENSIONS_BODY_LEN}",
                        stringify!($name),
                        size.content_len()
                    )));
                }
                Ok($name {
                    version_flags: VersionFlags::parse(reader)?,
                    width: reader.read_q16_16()?,
                    height: reader.read_q16_16()?,
                })
            }
        }

        impl WriteAtom for $name {
            fn write_body(&self, writer: &mut impl Write) -> Result<()> {
                self.version_flags.write(writer)?;
                writer.write_q16_16(self.width)?;
                writer.write_q16_16(self.height)?;
                Ok(())
            }

            fn size(&self) -> Size {
                Size::from_content_len(DIMENSIONS_BODY_LEN)
            }
        }
    };
}

dimensions_atom!(
    TrackCleanApertureDimensions,
    TRACK_CLEAN_APERTURE_DIMENSIONS,
    "(`clef`) The track's clean aperture dimensions."
);
dimensions_atom!(
    TrackProductionApertureDimensions,
    TRACK_PRODUCTION_APERTURE_DIMENSIONS,
    "(`prof`) The track's production aperture dimensions."
);
dimensions_atom!(
    TrackEncodedPixelsDimensions,
    TRACK_ENCODED_PIXELS_DIMENSIONS,
    "(`enof`) The track's encoded pixel dimensions."
);

/// `tapt` - presents the track's picture under up to three aperture conventions, all optional.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TrackApertureModeDimensions {
    pub clean_aperture: Option<TrackCleanApertureDimensions>,
    pub production_aperture: Option<TrackProductionApertureDimensions>,
    pub encoded_pixels: Option<TrackEncodedPixelsDimensions>,
}

impl Atom for TrackApertureModeDimensions {
    const FOURCC: Fourcc = TRACK_APERTURE_MODE_DIMENSIONS;
}

impl ParseAtom for TrackApertureModeDimensions {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_start = reader.stream_position()?;
        let cursor = ChildCursor::new(content_start, size.content_len());
        let mut tapt = TrackApertureModeDimensions::default();

        while let Some((pos, head)) = cursor.next(reader, cfg)? {
            match head.fourcc() {
                TRACK_CLEAN_APERTURE_DIMENSIONS if tapt.clean_aperture.is_none() => {
                    tapt.clean_aperture = Some(TrackCleanApertureDimensions::parse(reader, cfg, head.size())?);
                }
                TRACK_PRODUCTION_APERTURE_DIMENSIONS if tapt.production_aperture.is_none() => {
                    tapt.production_aperture =
                        Some(TrackProductionApertureDimensions::parse(reader, cfg, head.size())?);
                }
                TRACK_ENCODED_PIXELS_DIMENSIONS if tapt.encoded_pixels.is_none() => {
                    tapt.encoded_pixels = Some(TrackEncodedPixelsDimensions::parse(reader, cfg, head.size())?);
                }
                TRACK_CLEAN_APERTURE_DIMENSIONS
                | TRACK_PRODUCTION_APERTURE_DIMENSIONS
                | TRACK_ENCODED_PIXELS_DIMENSIONS => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                _ => cursor.skip_to_end(reader, pos, head)?,
            }
        }

        Ok(tapt)
    }
}

impl WriteAtom for TrackApertureModeDimensions {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        if let Some(clef) = &self.clean_aperture {
            clef.write(writer)?;
        }
        if let Some(prof) = &self.production_aperture {
            prof.write(writer)?;
        }
        if let Some(enof) = &self.encoded_pixels {
            enof.write(writer)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        use crate::atom::LenOrZero;
        Size::from_content_len(
            self.clean_aperture.len_or_zero()
                + self.production_aperture.len_or_zero()
                + self.encoded_pixels.len_or_zero(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn roundtrips_with_one_child() {
        let tapt = TrackApertureModeDimensions {
            clean_aperture: Some(TrackCleanApertureDimensions {
                version_flags: VersionFlags::default(),
                width: FixedQ16_16::ONE,
                height: FixedQ16_16::ONE,
            }),
            production_aperture: None,
            encoded_pixels: None,
        };
        let mut buf = Vec::new();
        tapt.write_body(&mut buf).unwrap();
        assert_eq!(buf.len() as u64, 8 + DIMENSIONS_BODY_LEN);

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = TrackApertureModeDimensions::parse(&mut cursor, &cfg, tapt.size()).unwrap();
        assert_eq!(parsed, tapt);
    }
}
