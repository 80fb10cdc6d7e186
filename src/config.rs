//! Reader configuration, threaded through every [`crate::atom::ParseAtom::parse`] call the
//! same way the teacher crate threads its `ReadConfig`/`ParseConfig` parameter.

/// Capacity bounds enforced while reading. Exceeding any of these yields
/// [`crate::ErrorKind::OutOfMemory`] before the oversize collection is allocated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Bounds {
    /// Maximum number of compatible brands inside a `ftyp` atom.
    pub compatible_brands: usize,
    /// Maximum number of tracks inside a `moov` atom.
    pub tracks: usize,
    /// Maximum number of entries in any sample-table list atom (`stts`, `ctts`, `stsc`,
    /// `stsz`, `stco`/`co64`, `stss`, `stps`, `sdtp`).
    pub sample_table_entries: usize,
    /// Maximum number of entries in an `elst` edit list.
    pub edit_list_entries: usize,
    /// Maximum number of sample description entries in an `stsd`.
    pub sample_descriptions: usize,
    /// Maximum number of raw child records preserved under an unrecognized-contents
    /// container (`udta`) or at the top level for unrecognized tags.
    pub opaque_children: usize,
    /// Maximum size in bytes of any single opaque byte blob read into memory (handler
    /// name, extended language tag, user-data child, unknown top-level atom body, sample
    /// description entry, region opaque tail, color table, `mdat` body when buffered).
    pub blob_len: u64,
    /// Maximum number of movie-data/free/skip/wide atoms at the top level.
    pub top_level_list_entries: usize,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            compatible_brands: 64,
            tracks: 1024,
            sample_table_entries: 16 * 1024 * 1024,
            edit_list_entries: 1024 * 1024,
            sample_descriptions: 256,
            opaque_children: 4096,
            blob_len: 256 * 1024 * 1024,
            top_level_list_entries: 1_000_000,
        }
    }
}

/// Configuration for reading a byte stream into an atom tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReadConfig {
    /// Whether a short atom size of `0` ("extends to the end of the enclosing stream") is
    /// accepted instead of rejected with `BadFormat`. The core's default preserves the
    /// original source's behavior and rejects it; callers that need to read such files can
    /// opt in explicitly.
    pub allow_rest_of_stream_size: bool,
    /// Capacity bounds applied to every bounded collection read from the stream.
    pub bounds: Bounds,
}

impl Default for ReadConfig {
    fn default() -> Self {
        ReadConfig { allow_rest_of_stream_size: false, bounds: Bounds::default() }
    }
}

impl ReadConfig {
    /// The default, strict configuration: `size == 0` is malformed, as the spec's source
    /// behaves.
    pub fn strict() -> Self {
        Self::default()
    }

    /// A configuration that additionally accepts `size == 0` to mean "the rest of the
    /// enclosing stream," reading such an atom's content up to the parent's declared end
    /// (or, at the top level, up to EOF).
    pub fn lenient() -> Self {
        ReadConfig { allow_rest_of_stream_size: true, ..Self::default() }
    }
}
