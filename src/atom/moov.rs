//! `moov` - movie container: required `mvhd`, a bounded list of `trak`, optional `clip`/`ctab`/`udta`.

use std::io::{Read, Seek, Write};

use crate::atom::check_bound;
use crate::atom::clip::Clipping;
use crate::atom::ctab::ColorTable;
use crate::atom::mvhd::MovieHeader;
use crate::atom::trak::Track;
use crate::atom::udta::UserData;
use crate::atom::{Atom, ChildCursor, LenOrZero, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::registry::{CLIPPING, COLOR_TABLE, MOVIE, MOVIE_HEADER, TRACK, USER_DATA};
use crate::{Error, Fourcc, Result};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Movie {
    pub movie_header: MovieHeader,
    pub tracks: Vec<Track>,
    pub clipping: Option<Clipping>,
    pub color_table: Option<ColorTable>,
    pub user_data: Option<UserData>,
}

impl Atom for Movie {
    const FOURCC: Fourcc = MOVIE;
}

impl ParseAtom for Movie {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_start = reader.stream_position()?;
        let cursor = ChildCursor::new(content_start, size.content_len());

        let mut movie_header = None;
        let mut movie = Movie::default();

        while let Some((pos, head)) = cursor.next(reader, cfg)? {
            match head.fourcc() {
                MOVIE_HEADER if movie_header.is_none() => {
                    movie_header = Some(MovieHeader::parse(reader, cfg, head.size())?);
                }
                MOVIE_HEADER => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                TRACK => {
                    check_bound(movie.tracks.len(), cfg.bounds.tracks, "trak")?;
                    movie.tracks.push(Track::parse(reader, cfg, head.size())?);
                }
                CLIPPING if movie.clipping.is_none() => {
                    movie.clipping = Some(Clipping::parse(reader, cfg, head.size())?);
                }
                CLIPPING => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                COLOR_TABLE if movie.color_table.is_none() => {
                    movie.color_table = Some(ColorTable::parse(reader, cfg, head.size())?);
                }
                COLOR_TABLE => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                USER_DATA if movie.user_data.is_none() => {
                    movie.user_data = Some(UserData::parse(reader, cfg, head.size())?);
                }
                USER_DATA => {
                    return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                }
                _ => cursor.skip_to_end(reader, pos, head)?,
            }
        }

        movie.movie_header =
            movie_header.ok_or_else(|| Error::bad_format("moov is missing its required mvhd child"))?;

        Ok(movie)
    }
}

impl WriteAtom for Movie {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        self.movie_header.write(writer)?;
        for track in &self.tracks {
            track.write(writer)?;
        }
        if let Some(a) = &self.clipping {
            a.write(writer)?;
        }
        if let Some(a) = &self.color_table {
            a.write(writer)?;
        }
        if let Some(a) = &self.user_data {
            a.write(writer)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(
            self.movie_header.len()
                + self.tracks.len_or_zero()
                + self.clipping.len_or_zero()
                + self.color_table.len_or_zero()
                + self.user_data.len_or_zero(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::{FixedQ16_16, FixedQ8_8, Matrix3x3, VersionFlags};
    use std::io::Cursor;

    fn header() -> MovieHeader {
        MovieHeader {
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
        }
    }

    #[test]
    fn roundtrips_with_no_tracks() {
        let movie = Movie { movie_header: header(), ..Default::default() };
        let mut buf = Vec::new();
        movie.write_body(&mut buf).unwrap();

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = Movie::parse(&mut cursor, &cfg, movie.size()).unwrap();
        assert_eq!(parsed, movie);
    }

    #[test]
    fn rejects_missing_required_mvhd() {
        let cfg = ReadConfig::default();
        let mut cursor = Cursor::new(Vec::new());
        assert!(Movie::parse(&mut cursor, &cfg, Size::from_content_len(0)).is_err());
    }
}
