//! Top-level file codec (spec component G): drives a whole file's worth of top-level atoms.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::atom::check_bound;
use crate::atom::ftyp::FileType;
use crate::atom::mdat::MovieData;
use crate::atom::moov::Movie;
use crate::atom::preview::Preview;
use crate::atom::simple_leaf::{Free, Skip, Wide};
use crate::atom::{Atom, LenOrZero, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::{read_header, Size};
use crate::registry::{FILE_TYPE, FREE, MEDIA_DATA, MOVIE, PREVIEW, SKIP, WIDE};
use crate::{Error, Result};

/// The whole of a QTFF/ISO-BMFF movie file: an optional `ftyp`, exactly one `moov`, and the
/// ordered top-level padding/data/preview atoms around it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MovieFile {
    pub file_type: Option<FileType>,
    pub movie: Movie,
    pub movie_data: Vec<MovieData>,
    pub free: Vec<Free>,
    pub skip: Vec<Skip>,
    pub wide: Vec<Wide>,
    pub preview: Option<Preview>,
}

/// Reads a whole file, per spec §4.G: rewind, an optional leading `ftyp`, then top-level
/// atoms dispatched by tag until `EOF`, then require exactly one `moov` was seen.
pub fn read_file(reader: &mut (impl Read + Seek), cfg: &ReadConfig) -> Result<MovieFile> {
    reader.seek(SeekFrom::Start(0))?;
    let stream_end = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(0))?;

    let mut file = MovieFile::default();
    let mut movie = None;

    while reader.stream_position()? < stream_end {
        let pos = reader.stream_position()?;
        let head = read_header(reader, cfg.allow_rest_of_stream_size, Some(stream_end))?;
        if pos + head.len() > stream_end {
            return Err(Error::bad_format_at(
                head.fourcc(),
                pos,
                "top-level atom's declared size runs past the end of the stream",
            ));
        }

        match head.fourcc() {
            FILE_TYPE if pos == 0 && file.file_type.is_none() => {
                file.file_type = Some(FileType::parse(reader, cfg, head.size())?);
            }
            FILE_TYPE => {
                return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate or late ftyp"));
            }
            MOVIE if movie.is_none() => {
                movie = Some(Movie::parse(reader, cfg, head.size())?);
            }
            MOVIE => {
                return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate moov"));
            }
            MEDIA_DATA => {
                check_bound(file.movie_data.len(), cfg.bounds.top_level_list_entries, "mdat")?;
                file.movie_data.push(MovieData::parse(reader, cfg, head.size())?);
            }
            FREE => {
                check_bound(file.free.len(), cfg.bounds.top_level_list_entries, "free")?;
                file.free.push(Free::parse(reader, cfg, head.size())?);
            }
            SKIP => {
                check_bound(file.skip.len(), cfg.bounds.top_level_list_entries, "skip")?;
                file.skip.push(Skip::parse(reader, cfg, head.size())?);
            }
            WIDE => {
                check_bound(file.wide.len(), cfg.bounds.top_level_list_entries, "wide")?;
                file.wide.push(Wide::parse(reader, cfg, head.size())?);
            }
            PREVIEW if file.preview.is_none() => {
                file.preview = Some(Preview::parse(reader, cfg, head.size())?);
            }
            PREVIEW => {
                return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate pnot"));
            }
            _ => {
                reader.seek(SeekFrom::Start(pos + head.len()))?;
            }
        }
    }

    file.movie = movie.ok_or_else(|| Error::bad_format("no moov atom found in the file"))?;
    Ok(file)
}

/// Writes a whole file, per spec §4.G: `ftyp` first if present, then the movie, then every
/// movie-data atom, then free/skip/wide, then the optional preview. Order is deterministic.
pub fn write_file(file: &MovieFile, writer: &mut impl Write) -> Result<()> {
    if let Some(ft) = &file.file_type {
        ft.write(writer)?;
    }
    file.movie.write(writer)?;
    for mdat in &file.movie_data {
        mdat.write(writer)?;
    }
    for free in &file.free {
        free.write(writer)?;
    }
    for skip in &file.skip {
        skip.write(writer)?;
    }
    for wide in &file.wide {
        wide.write(writer)?;
    }
    if let Some(preview) = &file.preview {
        preview.write(writer)?;
    }
    Ok(())
}

/// The exact on-disk size `write_file` will emit for `file`, header bytes included.
pub fn size_of_file(file: &MovieFile) -> u64 {
    file.file_type.len_or_zero()
        + file.movie.len()
        + file.movie_data.len_or_zero()
        + file.free.len_or_zero()
        + file.skip.len_or_zero()
        + file.wide.len_or_zero()
        + file.preview.len_or_zero()
}

/// The `Size` a writer would use for a hypothetical atom wrapping a body of `content_len`
/// bytes, applying the short/extended header cutover spec §4.H describes.
pub fn size_of_header(content_len: u64) -> Size {
    Size::from_content_len(content_len)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::atom::moov::Movie;
    use crate::atom::mvhd::MovieHeader;
    use crate::types::{FixedQ16_16, FixedQ8_8, Matrix3x3, VersionFlags};
    use std::io::Cursor;

    fn minimal_movie() -> Movie {
        Movie {
            movie_header: MovieHeader {
                version_flags: VersionFlags::default(),
                creation_time: 0,
                modification_time: 0,
                time_scale: 600,
                duration: 0,
                preferred_rate: FixedQ16_16::ONE,
                preferred_volume: FixedQ8_8::ZERO,
                matrix: Matrix3x3::IDENTITY,
                preview_time: 0,
                preview_duration: 0,
                poster_time: 0,
                selection_time: 0,
                selection_duration: 0,
                current_time: 0,
                next_track_id: 1,
            },
            ..Default::default()
        }
    }

    #[test]
    fn roundtrips_ftyp_moov_mdat_scenario() {
        let file = MovieFile {
            file_type: Some(FileType {
                major_brand: crate::Fourcc(*b"qt  "),
                minor_version: 512,
                compatible_brands: vec![crate::Fourcc(*b"qt  ")],
            }),
            movie: minimal_movie(),
            movie_data: vec![MovieData { data: vec![1, 2, 3, 4] }],
            ..Default::default()
        };

        let mut buf = Vec::new();
        write_file(&file, &mut buf).unwrap();
        assert_eq!(buf.len() as u64, size_of_file(&file));

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = read_file(&mut cursor, &cfg).unwrap();
        assert_eq!(parsed, file);
    }

    #[test]
    fn rejects_file_with_no_moov() {
        let cfg = ReadConfig::default();
        let mut cursor = Cursor::new(Vec::new());
        assert!(read_file(&mut cursor, &cfg).is_err());
    }

    #[test]
    fn rejects_duplicate_moov() {
        let file = MovieFile { movie: minimal_movie(), ..Default::default() };
        let mut buf = Vec::new();
        file.movie.write(&mut buf).unwrap();
        file.movie.write(&mut buf).unwrap();

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        assert!(read_file(&mut cursor, &cfg).is_err());
    }
}
