//! `mdia` - media container: required `mdhd`, optional `elng`/`hdlr`/`udta`/`minf`.
//!
//! `minf`'s body shape depends on `hdlr`'s `component_subtype`, which may appear after `minf`
//! in the byte stream. This codec makes one forward pass recording `minf`'s position instead
//! of parsing it immediately, then parses it last once every sibling (in particular `hdlr`)
//! has been seen (spec §4.F: "locate the handler-reference position first, or defer full
//! parsing of the media-information body").

use std::io::{Read, Seek, SeekFrom, Write};

use crate::atom::elng::ExtendedLanguageTag;
use crate::atom::hdlr::HandlerReference;
use crate::atom::mdhd::MediaHeader;
use crate::atom::minf::MediaInformation;
use crate::atom::udta::UserData;
use crate::atom::{Atom, ChildCursor, LenOrZero, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::{Head, Size};
use crate::registry::{EXTENDED_LANGUAGE_TAG, HANDLER_REFERENCE, MEDIA, MEDIA_HEADER, MEDIA_INFORMATION, USER_DATA};
use crate::{Error, Fourcc, Result};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Media {
    pub media_header: MediaHeader,
    pub extended_language_tag: Option<ExtendedLanguageTag>,
    pub handler_reference: Option<HandlerReference>,
    pub user_data: Option<UserData>,
    pub media_information: Option<MediaInformation>,
}

impl Atom for Media {
    const FOURCC: Fourcc = MEDIA;
}

impl ParseAtom for Media {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_start = reader.stream_position()?;
        let cursor = ChildCursor::new(content_start, size.content_len());

        let mut media_header = None;
        let mut extended_language_tag = None;
        let mut handler_reference = None;
        let mut user_data = None;
        let mut minf_child: Option<(u64, Head)> = None;

        while let Some((pos, head)) = cursor.next(reader, cfg)? {
            match head.fourcc() {
                MEDIA_HEADER if media_header.is_none() => {
                    media_header = Some(MediaHeader::parse(reader, cfg, head.size())?);
                }
                MEDIA_HEADER => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                EXTENDED_LANGUAGE_TAG if extended_language_tag.is_none() => {
                    extended_language_tag = Some(ExtendedLanguageTag::parse(reader, cfg, head.size())?);
                }
                EXTENDED_LANGUAGE_TAG => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                HANDLER_REFERENCE if handler_reference.is_none() => {
                    handler_reference = Some(HandlerReference::parse(reader, cfg, head.size())?);
                }
                HANDLER_REFERENCE => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                USER_DATA if user_data.is_none() => {
                    user_data = Some(UserData::parse(reader, cfg, head.size())?);
                }
                USER_DATA => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                MEDIA_INFORMATION if minf_child.is_none() => {
                    minf_child = Some((pos, head));
                    cursor.skip_to_end(reader, pos, head)?;
                }
                MEDIA_INFORMATION => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                _ => cursor.skip_to_end(reader, pos, head)?,
            }
        }

        let media_information = match minf_child {
            Some((pos, head)) => {
                // spec §9 open question: a `minf` with no `hdlr` subtype to select its
                // variant is rejected, not defaulted to a variant.
                let subtype = handler_reference
                    .as_ref()
                    .map(|h| h.component_subtype)
                    .ok_or_else(|| {
                        Error::bad_format_at(head.fourcc(), pos, "minf present without a hdlr to select its variant")
                    })?;
                reader.seek(SeekFrom::Start(pos + head.head_len()))?;
                let minf = MediaInformation::parse_with_subtype(reader, cfg, head.size(), subtype)
                    .map_err(|e| e.with_context(head.fourcc(), pos))?;
                reader.seek(SeekFrom::Start(pos + head.len()))?;
                Some(minf)
            }
            None => None,
        };

        let media_header =
            media_header.ok_or_else(|| Error::bad_format("mdia is missing its required mdhd child"))?;

        Ok(Media { media_header, extended_language_tag, handler_reference, user_data, media_information })
    }
}

impl WriteAtom for Media {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        self.media_header.write(writer)?;
        if let Some(a) = &self.extended_language_tag {
            a.write(writer)?;
        }
        if let Some(a) = &self.handler_reference {
            a.write(writer)?;
        }
        if let Some(a) = &self.user_data {
            a.write(writer)?;
        }
        if let Some(a) = &self.media_information {
            a.write(writer)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(
            self.media_header.len()
                + self.extended_language_tag.len_or_zero()
                + self.handler_reference.len_or_zero()
                + self.user_data.len_or_zero()
                + self.media_information.len_or_zero(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::atom::media_info_headers::SoundMediaInformationHeader;
    use crate::atom::minf::{MediaInformationCommon, SoundMediaInformation};
    use crate::types::{FixedQ8_8, VersionFlags};
    use std::io::Cursor;

    #[test]
    fn roundtrips_with_sound_handler_selecting_smhd_variant() {
        let media = Media {
            media_header: MediaHeader {
                version_flags: VersionFlags::default(),
                creation_time: 0,
                modification_time: 0,
                time_scale: 44_100,
                duration: 0,
                language: 0,
                quality: 0,
            },
            extended_language_tag: None,
            handler_reference: Some(HandlerReference {
                version_flags: VersionFlags::default(),
                component_type: Fourcc::default(),
                component_subtype: Fourcc(*b"soun"),
                component_manufacturer: Fourcc::default(),
                component_flags: 0,
                component_flags_mask: 0,
                component_name: vec![],
            }),
            user_data: None,
            media_information: Some(MediaInformation::Sound(SoundMediaInformation {
                header: SoundMediaInformationHeader {
                    version_flags: VersionFlags::default(),
                    balance: FixedQ8_8::ZERO,
                },
                common: MediaInformationCommon::default(),
            })),
        };
        let mut buf = Vec::new();
        media.write_body(&mut buf).unwrap();

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = Media::parse(&mut cursor, &cfg, media.size()).unwrap();
        assert_eq!(parsed, media);
    }

    #[test]
    fn rejects_minf_without_a_handler_reference() {
        let media = Media {
            media_header: MediaHeader {
                version_flags: VersionFlags::default(),
                creation_time: 0,
                modification_time: 0,
                time_scale: 44_100,
                duration: 0,
                language: 0,
                quality: 0,
            },
            extended_language_tag: None,
            handler_reference: None,
            user_data: None,
            media_information: Some(MediaInformation::Sound(SoundMediaInformation {
                header: SoundMediaInformationHeader {
                    version_flags: VersionFlags::default(),
                    balance: FixedQ8_8::ZERO,
                },
                common: MediaInformationCommon::default(),
            })),
        };
        let mut buf = Vec::new();
        media.write_body(&mut buf).unwrap();

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        assert!(Media::parse(&mut cursor, &cfg, media.size()).is_err());
    }
}
