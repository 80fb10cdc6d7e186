//! `dinf` - data information container: a single optional `dref` child.

use std::io::{Read, Seek, Write};

use crate::atom::dref::DataReference;
use crate::atom::{Atom, ChildCursor, LenOrZero, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::registry::{DATA_INFORMATION, DATA_REFERENCE};
use crate::{Error, Fourcc, Result};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DataInformation {
    pub data_reference: Option<DataReference>,
}

impl Atom for DataInformation {
    const FOURCC: Fourcc = DATA_INFORMATION;
}

impl ParseAtom for DataInformation {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_start = reader.stream_position()?;
        let cursor = ChildCursor::new(content_start, size.content_len());
        let mut dinf = DataInformation::default();

        while let Some((pos, head)) = cursor.next(reader, cfg)? {
            match head.fourcc() {
                DATA_REFERENCE if dinf.data_reference.is_none() => {
                    dinf.data_reference = Some(DataReference::parse(reader, cfg, head.size())?);
                }
                DATA_REFERENCE => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                _ => cursor.skip_to_end(reader, pos, head)?,
            }
        }

        Ok(dinf)
    }
}

impl WriteAtom for DataInformation {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        if let Some(dref) = &self.data_reference {
            dref.write(writer)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(self.data_reference.len_or_zero())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::VersionFlags;
    use std::io::Cursor;

    #[test]
    fn roundtrips_with_dref() {
        let dinf = DataInformation {
            data_reference: Some(DataReference {
                version_flags: VersionFlags::default(),
                entry_count: 0,
                entries: vec![],
            }),
        };
        let mut buf = Vec::new();
        dinf.write_body(&mut buf).unwrap();

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = DataInformation::parse(&mut cursor, &cfg, dinf.size()).unwrap();
        assert_eq!(parsed, dinf);
    }
}
