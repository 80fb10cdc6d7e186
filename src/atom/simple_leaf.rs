//! `free` / `skip` / `wide` - unused space, identical in shape: an opaque byte range with no
//! further structure, each round-tripped byte-for-byte.

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::registry::{FREE, SKIP, WIDE};
use crate::{Error, Fourcc, Result};

macro_rules! padding_atom {
    ($name:ident, $fourcc:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Default, Eq, PartialEq)]
        pub struct $name {
            pub data: Vec<u8>,
        }

        impl Atom for $name {
            const FOURCC: Fourcc = $fourcc;
        }

        impl ParseAtom for $name {
            fn parse_atom(
                reader: &mut (impl Read + Seek),
                cfg: &ReadConfig,
                size: Size,
            ) -> Result<Self> {
                let content_len = size.content_len();
                if content_len > cfg.bounds.blob_len {
                    return Err(Error::out_of_memory(format!(
                        "{} body of {content_len} bytes exceeds the configured blob bound",
                        stringify!($name)
                    )));
                }
                let mut data = vec![0; content_len as usize];
                reader.read_exact(&mut data)?;
                Ok($name { data })
            }
        }

        impl WriteAtom for $name {
            fn write_body(&self, writer: &mut impl Write) -> Result<()> {
                writer.write_all(&self.data)?;
                Ok(())
            }

            fn size(&self) -> Size {
                Size::from_content_len(self.data.len() as u64)
            }
        }
    };
}

padding_atom!(Free, FREE, "(`free`) Unused space an editor may reclaim.");
padding_atom!(Skip, SKIP, "(`skip`) Unused space, conventionally left alone by editors.");
padding_atom!(Wide, WIDE, "(`wide`) Placeholder reserving room to widen a following atom's header to the extended form.");

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn free_roundtrips() {
        let free = Free { data: vec![0; 6] };
        let mut buf = Vec::new();
        free.write(&mut buf).unwrap();
        assert_eq!(buf.len(), 14);

        let mut cursor = Cursor::new(&buf[8..]);
        let cfg = ReadConfig::default();
        let parsed = Free::parse(&mut cursor, &cfg, Size::from_content_len(6)).unwrap();
        assert_eq!(parsed, free);
    }
}
