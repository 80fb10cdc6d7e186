//! `minf` - media information container. Its body is a tagged union of three shapes, selected
//! by the enclosing `mdia`'s `hdlr` component-subtype (spec §4.F tie-breaking note): `vmhd`
//! for video handlers, `smhd` for sound handlers, `gmhd` for everything else.

use std::io::{Read, Seek, Write};

use crate::atom::dinf::DataInformation;
use crate::atom::media_info_headers::{
    BaseMediaInformation, SoundMediaInformationHeader, TextMediaInformation, VideoMediaInformationHeader,
};
use crate::atom::stbl::SampleTable;
use crate::atom::{Atom, ChildCursor, LenOrZero, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::registry::{
    BASE_MEDIA_INFORMATION, BASE_MEDIA_INFORMATION_HEADER, DATA_INFORMATION, MEDIA_INFORMATION,
    SAMPLE_TABLE, SOUND_MEDIA_INFORMATION_HEADER, TEXT_MEDIA_INFORMATION, VIDEO_MEDIA_INFORMATION_HEADER,
};
use crate::{Error, Fourcc, Result};

/// The `hdlr` `component_subtype` value that selects the video variant.
pub const VIDEO_HANDLER_SUBTYPE: Fourcc = Fourcc(*b"vide");
/// The `hdlr` `component_subtype` value that selects the sound variant.
pub const SOUND_HANDLER_SUBTYPE: Fourcc = Fourcc(*b"soun");

/// `gmhd` - wraps the base variant's `gmin` header plus an optional `text` sibling.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BaseMediaInformationHeader {
    pub base_media_information: BaseMediaInformation,
    pub text: Option<TextMediaInformation>,
}

impl Atom for BaseMediaInformationHeader {
    const FOURCC: Fourcc = BASE_MEDIA_INFORMATION_HEADER;
}

impl ParseAtom for BaseMediaInformationHeader {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_start = reader.stream_position()?;
        let cursor = ChildCursor::new(content_start, size.content_len());
        let mut base_media_information = None;
        let mut text = None;

        while let Some((pos, head)) = cursor.next(reader, cfg)? {
            match head.fourcc() {
                BASE_MEDIA_INFORMATION if base_media_information.is_none() => {
                    base_media_information = Some(BaseMediaInformation::parse(reader, cfg, head.size())?);
                }
                BASE_MEDIA_INFORMATION => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                TEXT_MEDIA_INFORMATION if text.is_none() => {
                    text = Some(TextMediaInformation::parse(reader, cfg, head.size())?);
                }
                TEXT_MEDIA_INFORMATION => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                _ => cursor.skip_to_end(reader, pos, head)?,
            }
        }

        let base_media_information = base_media_information
            .ok_or_else(|| Error::bad_format("gmhd is missing its required gmin child"))?;
        Ok(BaseMediaInformationHeader { base_media_information, text })
    }
}

impl WriteAtom for BaseMediaInformationHeader {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        self.base_media_information.write(writer)?;
        if let Some(text) = &self.text {
            text.write(writer)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(self.base_media_information.len() + self.text.len_or_zero())
    }
}

/// The children common to every media-information variant.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MediaInformationCommon {
    pub data_information: Option<DataInformation>,
    pub sample_table: Option<SampleTable>,
}

impl MediaInformationCommon {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        if let Some(a) = &self.data_information {
            a.write(writer)?;
        }
        if let Some(a) = &self.sample_table {
            a.write(writer)?;
        }
        Ok(())
    }

    fn len(&self) -> u64 {
        self.data_information.len_or_zero() + self.sample_table.len_or_zero()
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VideoMediaInformation {
    pub header: VideoMediaInformationHeader,
    pub common: MediaInformationCommon,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SoundMediaInformation {
    pub header: SoundMediaInformationHeader,
    pub common: MediaInformationCommon,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BaseMediaInformationVariant {
    pub header: BaseMediaInformationHeader,
    pub common: MediaInformationCommon,
}

/// `minf` - one of three shapes, chosen by the enclosing media's handler subtype.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MediaInformation {
    Video(VideoMediaInformation),
    Sound(SoundMediaInformation),
    Base(BaseMediaInformationVariant),
}

impl Atom for MediaInformation {
    const FOURCC: Fourcc = MEDIA_INFORMATION;
}

impl MediaInformation {
    /// Parses `minf`'s body given the handler subtype already read from this media's `hdlr`
    /// (spec §4.F: the variant must be knowable before the body is interpreted). A header atom
    /// whose kind disagrees with what `subtype` selects is `BadFormat` ("recognized
    /// component-subtype conflicts with context", spec §7).
    pub fn parse_with_subtype(
        reader: &mut (impl Read + Seek),
        cfg: &ReadConfig,
        size: Size,
        subtype: Fourcc,
    ) -> Result<Self> {
        let content_start = reader.stream_position()?;
        let cursor = ChildCursor::new(content_start, size.content_len());

        let mut vmhd = None;
        let mut smhd = None;
        let mut gmhd = None;
        let mut common = MediaInformationCommon::default();

        while let Some((pos, head)) = cursor.next(reader, cfg)? {
            match head.fourcc() {
                VIDEO_MEDIA_INFORMATION_HEADER if vmhd.is_none() => {
                    vmhd = Some(VideoMediaInformationHeader::parse(reader, cfg, head.size())?);
                }
                SOUND_MEDIA_INFORMATION_HEADER if smhd.is_none() => {
                    smhd = Some(SoundMediaInformationHeader::parse(reader, cfg, head.size())?);
                }
                BASE_MEDIA_INFORMATION_HEADER if gmhd.is_none() => {
                    gmhd = Some(BaseMediaInformationHeader::parse(reader, cfg, head.size())?);
                }
                VIDEO_MEDIA_INFORMATION_HEADER | SOUND_MEDIA_INFORMATION_HEADER | BASE_MEDIA_INFORMATION_HEADER => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                DATA_INFORMATION if common.data_information.is_none() => {
                    common.data_information = Some(DataInformation::parse(reader, cfg, head.size())?);
                }
                DATA_INFORMATION => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                SAMPLE_TABLE if common.sample_table.is_none() => {
                    common.sample_table = Some(SampleTable::parse(reader, cfg, head.size())?);
                }
                SAMPLE_TABLE => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                _ => cursor.skip_to_end(reader, pos, head)?,
            }
        }

        match subtype {
            VIDEO_HANDLER_SUBTYPE => {
                if smhd.is_some() || gmhd.is_some() {
                    return Err(Error::bad_format("minf carries a non-video header under a video handler"));
                }
                let header = vmhd.ok_or_else(|| Error::bad_format("minf is missing its required vmhd child"))?;
                Ok(MediaInformation::Video(VideoMediaInformation { header, common }))
            }
            SOUND_HANDLER_SUBTYPE => {
                if vmhd.is_some() || gmhd.is_some() {
                    return Err(Error::bad_format("minf carries a non-sound header under a sound handler"));
                }
                let header = smhd.ok_or_else(|| Error::bad_format("minf is missing its required smhd child"))?;
                Ok(MediaInformation::Sound(SoundMediaInformation { header, common }))
            }
            _ => {
                if vmhd.is_some() || smhd.is_some() {
                    return Err(Error::bad_format("minf carries a video/sound header under a base handler"));
                }
                let header = gmhd.ok_or_else(|| Error::bad_format("minf is missing its required gmhd child"))?;
                Ok(MediaInformation::Base(BaseMediaInformationVariant { header, common }))
            }
        }
    }
}

impl WriteAtom for MediaInformation {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        match self {
            MediaInformation::Video(v) => {
                v.header.write(writer)?;
                v.common.write(writer)
            }
            MediaInformation::Sound(s) => {
                s.header.write(writer)?;
                s.common.write(writer)
            }
            MediaInformation::Base(b) => {
                b.header.write(writer)?;
                b.common.write(writer)
            }
        }
    }

    fn size(&self) -> Size {
        let content_len = match self {
            MediaInformation::Video(v) => v.header.len() + v.common.len(),
            MediaInformation::Sound(s) => s.header.len() + s.common.len(),
            MediaInformation::Base(b) => b.header.len() + b.common.len(),
        };
        Size::from_content_len(content_len)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::VersionFlags;
    use std::io::Cursor;

    #[test]
    fn video_variant_roundtrips() {
        let minf = MediaInformation::Video(VideoMediaInformation {
            header: VideoMediaInformationHeader {
                version_flags: VersionFlags::default(),
                graphics_mode: 0,
                opcolor: [0, 0, 0],
            },
            common: MediaInformationCommon::default(),
        });
        let mut buf = Vec::new();
        minf.write_body(&mut buf).unwrap();

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed =
            MediaInformation::parse_with_subtype(&mut cursor, &cfg, minf.size(), VIDEO_HANDLER_SUBTYPE)
                .unwrap();
        assert_eq!(parsed, minf);
    }

    #[test]
    fn rejects_subtype_header_mismatch() {
        let vmhd = VideoMediaInformationHeader {
            version_flags: VersionFlags::default(),
            graphics_mode: 0,
            opcolor: [0, 0, 0],
        };
        let mut buf = Vec::new();
        vmhd.write(&mut buf).unwrap();

        let mut cursor = Cursor::new(buf.clone());
        let cfg = ReadConfig::default();
        assert!(MediaInformation::parse_with_subtype(
            &mut cursor,
            &cfg,
            Size::from_content_len(buf.len() as u64),
            SOUND_HANDLER_SUBTYPE,
        )
        .is_err());
    }
}
