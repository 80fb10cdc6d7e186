//! Atom header codec (spec component C): the 8- or 16-byte atom prelude.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::primitive::{ReadExt, WriteExt};
use crate::{Error, ErrorKind, Fourcc, Result};

/// The size of an atom: whether it used the extended (64-bit) length form, and its total
/// on-disk length including the header. `content_len`/`head_len` are always derived from
/// these two fields, so they cannot drift out of sync with each other (invariant I1).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Size {
    ext: bool,
    len: u64,
}

impl Size {
    /// Builds the `Size` a writer would use to emit an atom with the given body length:
    /// short form when it fits, extended form otherwise.
    pub const fn from_content_len(content_len: u64) -> Self {
        let mut len = content_len + 8;
        let ext = len > u32::MAX as u64;
        if ext {
            len += 8;
        }
        Size { ext, len }
    }

    pub const fn new(ext: bool, len: u64) -> Self {
        Size { ext, len }
    }

    pub const fn ext(&self) -> bool {
        self.ext
    }

    /// Total on-disk length, header included.
    pub const fn len(&self) -> u64 {
        self.len
    }

    pub const fn head_len(&self) -> u64 {
        if self.ext {
            16
        } else {
            8
        }
    }

    pub const fn content_len(&self) -> u64 {
        self.len - self.head_len()
    }
}

/// The parsed prelude of an atom: its size and its four-character type tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Head {
    size: Size,
    fourcc: Fourcc,
}

impl Head {
    pub const fn new(size: Size, fourcc: Fourcc) -> Self {
        Head { size, fourcc }
    }

    pub const fn fourcc(&self) -> Fourcc {
        self.fourcc
    }

    pub const fn size(&self) -> Size {
        self.size
    }

    pub const fn ext(&self) -> bool {
        self.size.ext
    }

    pub const fn len(&self) -> u64 {
        self.size.len
    }

    pub const fn head_len(&self) -> u64 {
        self.size.head_len()
    }

    pub const fn content_len(&self) -> u64 {
        self.size.content_len()
    }
}

/// Reads the 8- or 16-byte atom prelude. A short size of `0` ("rest of stream") is rejected
/// unless `allow_rest_of_stream_size` is set, in which case the content runs to
/// `enclosing_end` (the declared end of the parent, or the stream's length at the top
/// level).
pub fn read_header(
    reader: &mut (impl Read + Seek),
    allow_rest_of_stream_size: bool,
    enclosing_end: Option<u64>,
) -> Result<Head> {
    let pos = reader.stream_position()?;
    let short_len = reader.read_u32()?;
    let fourcc = reader.read_fourcc()?;

    if short_len == 1 {
        let ext_len = reader.read_u64()?;
        if ext_len < 16 {
            return Err(Error::bad_format_at(
                fourcc,
                pos,
                format!("extended atom size {ext_len} is less than the 16 byte extended header"),
            ));
        }
        return Ok(Head::new(Size::new(true, ext_len), fourcc));
    }

    if short_len == 0 {
        if !allow_rest_of_stream_size {
            return Err(Error::bad_format_at(
                fourcc,
                pos,
                "an atom size of 0 (\"rest of stream\") is rejected; enable \
                 ReadConfig::lenient() to accept it",
            ));
        }
        let end = match enclosing_end {
            Some(end) => end,
            None => {
                let cur = reader.stream_position()?;
                let len = reader.seek(SeekFrom::End(0))?;
                reader.seek(SeekFrom::Start(cur))?;
                len
            }
        };
        if end < pos + 8 {
            return Err(Error::bad_format_at(fourcc, pos, "rest-of-stream atom has no room"));
        }
        return Ok(Head::new(Size::new(false, end - pos), fourcc));
    }

    if short_len < 8 {
        return Err(Error::bad_format_at(
            fourcc,
            pos,
            format!("atom size {short_len} is less than the 8 byte header"),
        ));
    }

    Ok(Head::new(Size::new(false, short_len as u64), fourcc))
}

/// Writes the 8- or 16-byte atom prelude, choosing the short form whenever the size fits.
pub fn write_header(writer: &mut impl Write, head: Head) -> Result<()> {
    if head.ext() {
        writer.write_u32(1)?;
        writer.write_fourcc(head.fourcc())?;
        writer.write_u64(head.len())?;
    } else {
        writer.write_u32(head.len() as u32)?;
        writer.write_fourcc(head.fourcc())?;
    }
    Ok(())
}
