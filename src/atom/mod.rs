//! The atom tree.
//!
//! ```md
//! ftyp
//! mdat
//! moov
//! ├─ mvhd
//! ├─ trak
//! │  ├─ tkhd
//! │  ├─ edts
//! │  │  └─ elst
//! │  ├─ tref
//! │  ├─ udta
//! │  └─ mdia
//! │     ├─ mdhd
//! │     ├─ hdlr
//! │     └─ minf
//! │        ├─ vmhd | smhd | gmhd+gmin
//! │        ├─ dinf
//! │        │  └─ dref
//! │        └─ stbl
//! │           ├─ stsd
//! │           ├─ stts, ctts, stsc, stsz, stco | co64, stss, stps, sdtp
//! └─ udta
//! ```
//!
//! Every atom type implements [`Atom`] (its four-character code), and [`ParseAtom`] and/or
//! [`WriteAtom`] for the directions it supports. Containers implement both by looping over
//! their children with the shared [`ChildCursor`] helper, following the dispatch algorithm in
//! the spec this crate implements: singleton children reject a second occurrence, list
//! children are appended up to a capacity bound, unrecognized children are skipped by seeking
//! past their declared length.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::config::ReadConfig;
use crate::head::{read_header, write_header, Head, Size};
use crate::{Error, ErrorKind, Fourcc, Result};

pub mod clip;
pub mod ctab;
pub mod dinf;
pub mod dref;
pub mod edts;
pub mod elng;
pub mod elst;
pub mod ftyp;
pub mod hdlr;
pub mod matt;
pub mod mdat;
pub mod mdhd;
pub mod mdia;
pub mod media_info_headers;
pub mod minf;
pub mod misc_leaf;
pub mod moov;
pub mod movie_file;
pub mod mvhd;
pub mod preview;
pub mod sample_tables;
pub mod simple_leaf;
pub mod stbl;
pub mod stsd;
pub mod tapt;
pub mod tkhd;
pub mod track_containers;
pub mod trak;
pub mod tref;
pub mod udta;

/// The fourcc identity of an atom type, read or write.
pub trait Atom: Sized {
    const FOURCC: Fourcc;
}

/// An atom that can be decoded from a byte stream.
pub trait ParseAtom: Atom {
    /// Parses the atom's body, given its header has already been consumed and `size`
    /// describes the atom's total (header-included) length. Errors raised by
    /// [`ParseAtom::parse_atom`] are annotated with this atom's fourcc and the position its
    /// body started at, unless they already carry more specific context from a child.
    fn parse(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let pos = reader.stream_position()?;
        Self::parse_atom(reader, cfg, size).map_err(|e| e.with_context(Self::FOURCC, pos))
    }

    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self>;
}

/// An atom that can be encoded to a byte stream.
pub trait WriteAtom: Atom {
    /// Writes the header followed by the body. Callers needing only the size should call
    /// [`WriteAtom::size`] instead of writing to a throwaway buffer.
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        write_header(writer, Head::new(self.size(), Self::FOURCC))?;
        self.write_body(writer)
    }

    fn write_body(&self, writer: &mut impl Write) -> Result<()>;

    /// The exact on-disk size this atom will occupy, header included. Must agree with the
    /// number of bytes [`WriteAtom::write`] actually emits (spec property P2); this is the
    /// single source of truth containers use to size themselves (I2) and that writers use to
    /// choose between the short and extended header form.
    fn size(&self) -> Size;

    fn len(&self) -> u64 {
        self.size().len()
    }
}

/// Convenience for `Option<impl WriteAtom>` fields: `0` when absent, `size().len()` when
/// present. Mirrors how every container's `size()` sums its optional children.
pub trait LenOrZero {
    fn len_or_zero(&self) -> u64;
}

impl<T: WriteAtom> LenOrZero for Option<T> {
    fn len_or_zero(&self) -> u64 {
        self.as_ref().map_or(0, WriteAtom::len)
    }
}

impl<T: WriteAtom> LenOrZero for [T] {
    fn len_or_zero(&self) -> u64 {
        self.iter().map(WriteAtom::len).sum()
    }
}

impl LenOrZero for [OpaqueAtom] {
    fn len_or_zero(&self) -> u64 {
        self.iter().map(|a| a.size().len()).sum()
    }
}

/// Walks the children of a container whose content occupies
/// `[content_start, content_start + content_len)`, handing back one header at a time along
/// with the absolute position it started at. Every container codec in this crate drives its
/// read loop through this type so the skip/duplicate/overrun bookkeeping in the spec's
/// container algorithm is written exactly once.
pub struct ChildCursor {
    content_end: u64,
}

impl ChildCursor {
    pub fn new(content_start: u64, content_len: u64) -> Self {
        ChildCursor { content_end: content_start + content_len }
    }

    /// Returns the next child's header and starting position, or `None` once the parent's
    /// declared content has been fully consumed. Rejects a child whose declared size would
    /// run past the parent's end.
    pub fn next(
        &self,
        reader: &mut (impl Read + Seek),
        cfg: &ReadConfig,
    ) -> Result<Option<(u64, Head)>> {
        let pos = reader.stream_position()?;
        if pos >= self.content_end {
            return Ok(None);
        }

        let head = read_header(reader, cfg.allow_rest_of_stream_size, Some(self.content_end))?;
        if pos + head.len() > self.content_end {
            return Err(Error::bad_format_at(
                head.fourcc(),
                pos,
                "child atom's declared size runs past its parent's declared end",
            ));
        }

        Ok(Some((pos, head)))
    }

    /// Advances the stream past a child regardless of whether its body was actually parsed,
    /// guaranteeing the cursor never drifts out of step with a child codec that
    /// under/over-reads (invariant I7).
    pub fn skip_to_end(
        &self,
        reader: &mut (impl Read + Seek),
        child_pos: u64,
        head: Head,
    ) -> Result<()> {
        reader.seek(SeekFrom::Start(child_pos + head.len()))?;
        Ok(())
    }

    pub fn content_end(&self) -> u64 {
        self.content_end
    }
}

/// An atom this crate's registry doesn't assign further structure to, preserved verbatim so a
/// tree that round-trips through an unrecognized tag still round-trips byte-for-byte (spec
/// §9 open question: "implementers may add an 'unknown atom' variant to extend P1 to
/// arbitrary inputs").
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OpaqueAtom {
    pub fourcc: Fourcc,
    pub content: Vec<u8>,
}

impl OpaqueAtom {
    pub fn parse(
        reader: &mut (impl Read + Seek),
        fourcc: Fourcc,
        size: Size,
        bounds: &crate::config::Bounds,
    ) -> Result<Self> {
        let content_len = size.content_len();
        if content_len > bounds.blob_len {
            return Err(Error::out_of_memory(format!(
                "unrecognized atom '{fourcc}' body of {content_len} bytes exceeds the \
                 configured blob bound"
            )));
        }
        let mut content = vec![0; content_len as usize];
        reader.read_exact(&mut content)?;
        Ok(OpaqueAtom { fourcc, content })
    }

    pub fn write(&self, writer: &mut impl Write) -> Result<()> {
        write_header(writer, Head::new(Size::from_content_len(self.content.len() as u64), self.fourcc))?;
        writer.write_all(&self.content)?;
        Ok(())
    }

    pub fn size(&self) -> Size {
        Size::from_content_len(self.content.len() as u64)
    }
}

/// Rejects a collection push once it would exceed `bound`, before the element is appended
/// (spec property P8: "without allocating the oversize structure").
pub(crate) fn check_bound(len: usize, bound: usize, what: &str) -> Result<()> {
    if len >= bound {
        return Err(Error::out_of_memory(format!(
            "{what} count would exceed the configured bound of {bound}"
        )));
    }
    Ok(())
}
