//! `elng` - extended language tag.

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::primitive::ReadExt;
use crate::registry::EXTENDED_LANGUAGE_TAG;
use crate::types::VersionFlags;
use crate::{Error, Fourcc, Result};

/// A null-terminated ASCII language tag occupying the remainder of the atom. The raw bytes
/// (including the terminator and any padding a writer chose to add) are kept verbatim so a
/// round-trip reproduces them exactly, per spec §4.E: "Writers may zero-pad to the declared
/// size."
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtendedLanguageTag {
    pub version_flags: VersionFlags,
    pub raw_tag: Vec<u8>,
}

impl ExtendedLanguageTag {
    /// The tag up to (not including) its null terminator, interpreted as ASCII.
    pub fn tag(&self) -> &str {
        let end = self.raw_tag.iter().position(|&b| b == 0).unwrap_or(self.raw_tag.len());
        std::str::from_utf8(&self.raw_tag[..end]).unwrap_or("")
    }
}

impl Atom for ExtendedLanguageTag {
    const FOURCC: Fourcc = EXTENDED_LANGUAGE_TAG;
}

impl ParseAtom for ExtendedLanguageTag {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_len = size.content_len();
        if content_len < VersionFlags::LEN {
            return Err(Error::bad_format(format!(
                "elng body of {content_len} bytes is smaller than the version/flags prefix"
            )));
        }
        let version_flags = VersionFlags::parse(reader)?;
        let tag_len = content_len - VersionFlags::LEN;
        if tag_len > cfg.bounds.blob_len {
            return Err(Error::out_of_memory(format!(
                "elng tag of {tag_len} bytes exceeds the configured blob bound"
            )));
        }
        let raw_tag = reader.read_u8_vec(tag_len)?;
        Ok(ExtendedLanguageTag { version_flags, raw_tag })
    }
}

impl WriteAtom for ExtendedLanguageTag {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        self.version_flags.write(writer)?;
        writer.write_all(&self.raw_tag)?;
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(VersionFlags::LEN + self.raw_tag.len() as u64)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn tag_stops_at_null_terminator() {
        let elng = ExtendedLanguageTag {
            version_flags: VersionFlags::default(),
            raw_tag: b"en-US\0".to_vec(),
        };
        assert_eq!(elng.tag(), "en-US");

        let mut buf = Vec::new();
        elng.write_body(&mut buf).unwrap();
        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = ExtendedLanguageTag::parse(&mut cursor, &cfg, elng.size()).unwrap();
        assert_eq!(parsed, elng);
    }
}
