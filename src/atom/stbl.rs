//! `stbl` - sample table container: required `stsd`/`stts`, everything else optional.

use std::io::{Read, Seek, Write};

use crate::atom::sample_tables::{
    ChunkOffset, ChunkOffset64, CompositionOffset, CompositionShiftLeastGreatest, PartialSyncSample,
    SampleDependencyFlags, SampleSize, SampleToChunk, SyncSample, TimeToSample,
};
use crate::atom::stsd::SampleDescription;
use crate::atom::{Atom, ChildCursor, LenOrZero, ParseAtom, WriteAtom};
use crate::config::ReadConfig;
use crate::head::Size;
use crate::registry::{
    CHUNK_OFFSET, CHUNK_OFFSET_64, COMPOSITION_OFFSET, COMPOSITION_SHIFT_LEAST_GREATEST,
    PARTIAL_SYNC_SAMPLE, SAMPLE_DEPENDENCY_FLAGS, SAMPLE_DESCRIPTION, SAMPLE_SIZE, SAMPLE_TABLE,
    SAMPLE_TO_CHUNK, SYNC_SAMPLE, TIME_TO_SAMPLE,
};
use crate::{Error, Fourcc, Result};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SampleTable {
    pub sample_description: SampleDescription,
    pub time_to_sample: TimeToSample,
    pub composition_offset: Option<CompositionOffset>,
    pub composition_shift_least_greatest: Option<CompositionShiftLeastGreatest>,
    pub sync_sample: Option<SyncSample>,
    pub partial_sync_sample: Option<PartialSyncSample>,
    pub sample_to_chunk: Option<SampleToChunk>,
    pub sample_size: Option<SampleSize>,
    pub chunk_offset: Option<ChunkOffset>,
    pub chunk_offset_64: Option<ChunkOffset64>,
    pub sample_dependency_flags: Option<SampleDependencyFlags>,
}

impl Atom for SampleTable {
    const FOURCC: Fourcc = SAMPLE_TABLE;
}

impl ParseAtom for SampleTable {
    fn parse_atom(reader: &mut (impl Read + Seek), cfg: &ReadConfig, size: Size) -> Result<Self> {
        let content_start = reader.stream_position()?;
        let cursor = ChildCursor::new(content_start, size.content_len());

        let mut sample_description = None;
        let mut time_to_sample = None;
        let mut stbl = SampleTable::default();

        while let Some((pos, head)) = cursor.next(reader, cfg)? {
            macro_rules! singleton {
                ($slot:expr) => {{
                    if $slot.is_some() {
                        return Err(Error::bad_format_at(head.fourcc(), pos, "duplicate singleton child"));
                    }
                    $slot = Some(ParseAtom::parse(reader, cfg, head.size())?);
                }};
            }

            match head.fourcc() {
                SAMPLE_DESCRIPTION => singleton!(sample_description),
                TIME_TO_SAMPLE => singleton!(time_to_sample),
                COMPOSITION_OFFSET => singleton!(stbl.composition_offset),
                COMPOSITION_SHIFT_LEAST_GREATEST => singleton!(stbl.composition_shift_least_greatest),
                SYNC_SAMPLE => singleton!(stbl.sync_sample),
                PARTIAL_SYNC_SAMPLE => singleton!(stbl.partial_sync_sample),
                SAMPLE_TO_CHUNK => singleton!(stbl.sample_to_chunk),
                SAMPLE_SIZE => singleton!(stbl.sample_size),
                CHUNK_OFFSET => singleton!(stbl.chunk_offset),
                CHUNK_OFFSET_64 => singleton!(stbl.chunk_offset_64),
                SAMPLE_DEPENDENCY_FLAGS => singleton!(stbl.sample_dependency_flags),
                _ => cursor.skip_to_end(reader, pos, head)?,
            }
        }

        stbl.sample_description = sample_description
            .ok_or_else(|| Error::bad_format("stbl is missing its required stsd child"))?;
        stbl.time_to_sample =
            time_to_sample.ok_or_else(|| Error::bad_format("stbl is missing its required stts child"))?;

        Ok(stbl)
    }
}

impl WriteAtom for SampleTable {
    fn write_body(&self, writer: &mut impl Write) -> Result<()> {
        self.sample_description.write(writer)?;
        self.time_to_sample.write(writer)?;
        if let Some(a) = &self.composition_offset {
            a.write(writer)?;
        }
        if let Some(a) = &self.composition_shift_least_greatest {
            a.write(writer)?;
        }
        if let Some(a) = &self.sync_sample {
            a.write(writer)?;
        }
        if let Some(a) = &self.partial_sync_sample {
            a.write(writer)?;
        }
        if let Some(a) = &self.sample_to_chunk {
            a.write(writer)?;
        }
        if let Some(a) = &self.sample_size {
            a.write(writer)?;
        }
        if let Some(a) = &self.chunk_offset {
            a.write(writer)?;
        }
        if let Some(a) = &self.chunk_offset_64 {
            a.write(writer)?;
        }
        if let Some(a) = &self.sample_dependency_flags {
            a.write(writer)?;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        Size::from_content_len(
            self.sample_description.len()
                + self.time_to_sample.len()
                + self.composition_offset.len_or_zero()
                + self.composition_shift_least_greatest.len_or_zero()
                + self.sync_sample.len_or_zero()
                + self.partial_sync_sample.len_or_zero()
                + self.sample_to_chunk.len_or_zero()
                + self.sample_size.len_or_zero()
                + self.chunk_offset.len_or_zero()
                + self.chunk_offset_64.len_or_zero()
                + self.sample_dependency_flags.len_or_zero(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::VersionFlags;
    use std::io::Cursor;

    fn minimal() -> SampleTable {
        SampleTable {
            sample_description: SampleDescription {
                version_flags: VersionFlags::default(),
                entry_count: 0,
                entries: vec![],
            },
            time_to_sample: TimeToSample { version_flags: VersionFlags::default(), entries: vec![] },
            ..Default::default()
        }
    }

    #[test]
    fn roundtrips_minimal_table() {
        let stbl = minimal();
        let mut buf = Vec::new();
        stbl.write_body(&mut buf).unwrap();

        let mut cursor = Cursor::new(buf);
        let cfg = ReadConfig::default();
        let parsed = SampleTable::parse(&mut cursor, &cfg, stbl.size()).unwrap();
        assert_eq!(parsed, stbl);
    }

    #[test]
    fn rejects_missing_required_stts() {
        let stbl = SampleTable {
            sample_description: SampleDescription {
                version_flags: VersionFlags::default(),
                entry_count: 0,
                entries: vec![],
            },
            ..Default::default()
        };
        let mut buf = Vec::new();
        stbl.sample_description.write(&mut buf).unwrap();

        let mut cursor = Cursor::new(buf.clone());
        let cfg = ReadConfig::default();
        assert!(
            SampleTable::parse(&mut cursor, &cfg, Size::from_content_len(buf.len() as u64)).is_err()
        );
    }
}
