//! The `stbl` leaf children sharing the "version/flags + entry count + tightly packed
//! table" shape (spec §4.E): `stts`, `ctts`, `cslg`, `stss`, `stps`, `stsc`, `stsz`,
//! `stco`/`co64`, `sdtp`.

use std::io::{Read, Seek, Write};

use crate::atom::{Atom, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::primitive::{ReadExt, WriteExt};
use crate::registry::{
    CHUNK_OFFSET, CHUNK_OFFSET_64, COMPOSITION_OFFSET, COMPOSITION_SHIFT_LEAST_GREATEST,
    PARTIAL_SYNC_SAMPLE, SAMPLE_DEPENDENCY_FLAGS, SAMPLE_SIZE, SAMPLE_TO_CHUNK, SYNC_SAMPLE,
    TIME_TO_SAMPLE,
};
use crate::types::VersionFlags;
use crate::{Error, Fourcc, Result};

fn read_count(reader: &mut impl Read, bound: usize, what: &'static str) -> Result<u32> {
    let count = reader.read_u32()?;
    if count as usize > bound {
        return Err(Error::out_of_memory(format!(
            "{what} entry count of {count} exceeds the configured bound"
        )));
    }
    Ok(count)
}

macro_rules! entry_table_atom {
    ($name:ident, $entry:ident { $($field:ident: $fty:ident),+ $(,)? }, $fourcc:expr, $stride:expr) => {
        #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
        pub struct $entry {
            $(pub $field: $fty,)+
        }

        #[derive(Clone, Debug, Default, Eq, PartialEq)]
        pub struct $name {
            pub version_flags: VersionFlags,
            pub entries: Vec<$entry>,
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
                if content_len < 8 {
                    return Err(Error::bad_format(format!(
                        "{} body of {content_len} bytes is smaller than the fixed 8 byte prefix",
                        stringify!($name)
                    )));
                }
                let version_flags = VersionFlags::parse(reader)?;
                let count = read_count(reader, cfg.bounds.sample_table_entries, stringify!($name))?;
                if content_len != 8 + $stride * count as u64 {
                    return Err(Error::bad_format(format!(
                        "{} body of {content_len} bytes disagrees with {count} entries of stride {}",
                        stringify!($name), $stride
                    )));
                }
                let mut entries = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    entries.push($entry { $($field: read_field!(reader, $fty),)+ });
                }
                Ok($name { version_flags, entries })
            }
        }

        impl WriteAtom for $name {
            fn write_body(&self, writer: &mut impl Write) -> Result<()> {
                self.version_flags.write(writer)?;
                writer.write_u32(self.entries.len() as u32)?;
                for e in &self.entries {
                    $(write_field!(writer, e.$field);)+
                }
                Ok(())
            }

            fn size(&self) -> Size {
                Size::from_content_len(8 + $stride * self.entries.len() as u64)
            }
        }
    };
}

macro_rules! read_field {
    ($reader:expr, u32) => {
        $reader.read_u32()?
    };
    ($reader:expr, u64) => {
        $reader.read_u64()?
    };
}

macro_rules! write_field {
    ($writer:expr, $val:expr) => {
        $val.write_into($writer)?
    };
}

/// Blanket helper so the `write_field!` macro above can stay width-generic.
trait WriteField {
    fn write_into(self, writer: &mut impl Write) -> Result<()>;
}

impl WriteField for u32 {
    fn write_into(self, writer: &mut impl Write) -> Result<()> {
        Ok(writer.write_u32(self)?)
    }
}

impl WriteField for u64 {
    fn write_into(self, writer: &mut impl Write) -> Result<()> {
        Ok(writer.write_u64(self)?)
    }
}

entry_table_atom!(TimeToSample, SttsEntry { sample_count: u32, sample_delta: u32 }, TIME_TO_SAMPLE, 8);
entry_table_atom!(CompositionOffset, CttsEntry { sample_count: u32, sample_offset: u32 }, COMPOSITION_OFFSET, 8);
entry_table_atom!(SampleToChunk, StscEntry { first_chunk: u32, samples_per_chunk: u32, sample_description_index: u32 }, SAMPLE_TO_CHUNK, 12);
entry_table_atom!(ChunkOffset, StcoEntry { chunk_offset: u32 }, CHUNK_OFFSET, 4);
entry_table_atom!(ChunkOffset64, Co64Entry { chunk_offset: u64 }, CHUNK_OFFSET_64, 8);
entry_table_atom!(SyncSample, StssEntry { sample_number: u32 }, SYNC_SAMPLE, 4);
entry_table_atom!(PartialSyncSample, StpsEntry { sample_number: u32 }, PARTIAL_SYNC_SAMPLE, 4);

/// `sdtp` - one dependency-flags byte per sample.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SampleDependencyFlags {
    pub version_flags: VersionFlags,
    pub entries: Vec<u8>,
}

impl Atom for SampleDependencyFlags {
    const FOURCC: Fourcc = SAMPLE_DEPENDENCY_FLAGS;
}

impl ParseAtom for SampleDependencyFlags {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_len = size.content_len();
        if content_len < 8 {
            return Err(Error::bad_format(format!(
                "sdtp body of {content_len} bytes is smaller than the fixed 8 byte prefix"
            )));
        }
        let version_flags = VersionFlags::parse(reader)?;
        let count = read_count(reader, cfg.bounds.sample_table_entries, "sdtp")?;
        if content_len != 8 + count as u64 {
            return Err(Error::bad_format(format!(
                "sdtp body of {content_len} bytes disagrees with {count} one-byte entries"
            )));
        }
        let entries = reader.read_u8_vec(count as u64)?;
        Ok(SampleDependencyFlags { version_flags, entries })
    }
}

impl WriteAtom for SampleDependencyFlags {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        self.version_flags.write(writer)?;
        writer.write_u32(self.entries.len() as u32)?;
        writer.write_all(&self.entries)?;
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(8 + self.entries.len() as u64)
    }
}

/// `stsz` - sample sizes. When `sample_size != 0` every sample shares that size and no
/// per-sample table is present on the wire (spec §4.E).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SampleSize {
    pub version_flags: VersionFlags,
    pub sample_size: u32,
    pub number_of_entries: u32,
    pub entry_sizes: Option<Vec<u32>>,
}

impl Atom for SampleSize {
    const FOURCC: Fourcc = SAMPLE_SIZE;
}

impl ParseAtom for SampleSize {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_len = size.content_len();
        if content_len < 12 {
            return Err(Error::bad_format(format!(
                "stsz body of {content_len} bytes is smaller than the fixed 12 byte prefix"
            )));
        }
        let version_flags = VersionFlags::parse(reader)?;
        let sample_size = reader.read_u32()?;
        let number_of_entries = read_count(reader, cfg.bounds.sample_table_entries, "stsz")?;

        if sample_size != 0 {
            if content_len != 12 {
                return Err(Error::bad_format(format!(
                    "stsz body of {content_len} bytes carries a table despite a nonzero \
                     compact sample_size"
                )));
            }
            return Ok(SampleSize { version_flags, sample_size, number_of_entries, entry_sizes: None });
        }

        if content_len != 12 + 4 * number_of_entries as u64 {
            return Err(Error::bad_format(format!(
                "stsz body of {content_len} bytes disagrees with {number_of_entries} 4 byte entries"
            )));
        }
        let mut entry_sizes = Vec::with_capacity(number_of_entries as usize);
        for _ in 0..number_of_entries {
            entry_sizes.push(reader.read_u32()?);
        }
        Ok(SampleSize { version_flags, sample_size, number_of_entries, entry_sizes: Some(entry_sizes) })
    }
}

impl WriteAtom for SampleSize {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        self.version_flags.write(writer)?;
        writer.write_u32(self.sample_size)?;
        writer.write_u32(self.number_of_entries)?;
        if let Some(entries) = &self.entry_sizes {
            for e in entries {
                writer.write_u32(*e)?;
            }
        }
        Ok(())
    }

    fn size(&self) -> Size {
        let table_len = self.entry_sizes.as_ref().map_or(0, |v| 4 * v.len() as u64);
        Size::from_content_len(12 + table_len)
    }
}

/// `cslg` - composition shift least/greatest.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CompositionShiftLeastGreatest {
    pub version_flags: VersionFlags,
    pub composition_to_dts_shift: u32,
    pub least_decode_to_display_delta: u32,
    pub greatest_decode_to_display_delta: u32,
    pub composition_start_time: u32,
    pub composition_end_time: u32,
}

impl Atom for CompositionShiftLeastGreatest {
    const FOURCC: Fourcc = COMPOSITION_SHIFT_LEAST_GREATEST;
}

impl ParseAtom for CompositionShiftLeastGreatest {
    fn parse_atom(reader: &mut (impl Read + Seek), _cfg: &ReadConfig, size: Size) -> Result<Self> {
        if size.content_len() != 24 {
            return Err(Error::bad_format(format!(
                "cslg body of {} bytes, expected 24",
                size.content_len()
            )));
        }
        Ok(CompositionShiftLeastGreatest {
            version_flags: VersionFlags::parse(reader)?,
            composition_to_dts_shift: reader.read_u32()?,
            least_decode_to_display_delta: reader.read_u32()?,
            greatest_decode_to_display_delta: reader.read_u32()?,
            composition_start_time: reader.read_u32()?,
            composition_end_time: reader.read_u32()?,
        })
    }
}

impl WriteAtom for CompositionShiftLeastGreatest {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        self.version_flags.write(writer)?;
        writer.write_u32(self.composition_to_dts_shift)?;
        writer.write_u32(self.least_decode_to_display_delta)?;
        writer.write_u32(self.greatest_decode_to_display_delta)?;
        writer.write_u32(self.composition_start_time)?;
        writer.write_u32(self.composition_end_time)?;
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(24)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn stsz_compact_form_scenario_6() {
        let stsz = SampleSize {
            version_flags: VersionFlags::default(),
            sample_size: 1234,
            number_of_entries: 1000,
            entry_sizes: None,
        };
        assert_eq!(stsz.size().content_len(), 12);
        assert_eq!(stsz.size().len(), 20);

        let mut buf = Vec::new();
        stsz.write_body(&mut buf).unwrap();
        assert_eq!(buf.len(), 12);

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = SampleSize::parse(&mut cursor, &cfg, stsz.size()).unwrap();
        assert_eq!(parsed, stsz);
    }

    #[test]
    fn stts_entries_roundtrip() {
        let stts = TimeToSample {
            version_flags: VersionFlags::default(),
            entries: vec![
                SttsEntry { sample_count: 10, sample_delta: 512 },
                SttsEntry { sample_count: 5, sample_delta: 1024 },
            ],
        };
        let mut buf = Vec::new();
        stts.write_body(&mut buf).unwrap();
        assert_eq!(buf.len(), 8 + 2 * 8);

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = TimeToSample::parse(&mut cursor, &cfg, stts.size()).unwrap();
        assert_eq!(parsed, stts);
    }

    #[test]
    fn co64_entries_roundtrip() {
        let co64 = ChunkOffset64 {
            version_flags: VersionFlags::default(),
            entries: vec![Co64Entry { chunk_offset: 1 << 40 }],
        };
        let mut buf = Vec::new();
        co64.write_body(&mut buf).unwrap();
        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = ChunkOffset64::parse(&mut cursor, &cfg, co64.size()).unwrap();
        assert_eq!(parsed, co64);
    }
}
