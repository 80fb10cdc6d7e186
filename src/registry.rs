//! Atom kind registry (spec component D): the closed enumeration of recognized four-character
//! codes. Unknown tags, wherever encountered, are skipped by advancing the stream past the
//! child's declared size rather than failing.

use crate::Fourcc;

macro_rules! fourccs {
    ($($(#[$doc:meta])* $name:ident = $bytes:expr;)*) => {
        $(
            $(#[$doc])*
            pub const $name: Fourcc = Fourcc($bytes);
        )*
    };
}

fourccs! {
    /// `ftyp` - file type and compatible brands.
    FILE_TYPE = *b"ftyp";
    /// `moov` - the movie container.
    MOVIE = *b"moov";
    /// `mdat` - opaque media data.
    MEDIA_DATA = *b"mdat";
    /// `free` - unused space.
    FREE = *b"free";
    /// `skip` - unused space (editor-reserved, same shape as `free`).
    SKIP = *b"skip";
    /// `wide` - placeholder reserving room for an extended `mdat` header.
    WIDE = *b"wide";
    /// `pnot` - movie preview pointer.
    PREVIEW = *b"pnot";
    /// `mvhd` - movie header.
    MOVIE_HEADER = *b"mvhd";
    /// `trak` - a single track.
    TRACK = *b"trak";
    /// `tkhd` - track header.
    TRACK_HEADER = *b"tkhd";
    /// `tapt` - track aperture mode dimensions.
    TRACK_APERTURE_MODE_DIMENSIONS = *b"tapt";
    /// `clef` - track clean aperture dimensions.
    TRACK_CLEAN_APERTURE_DIMENSIONS = *b"clef";
    /// `prof` - track production aperture dimensions.
    TRACK_PRODUCTION_APERTURE_DIMENSIONS = *b"prof";
    /// `enof` - track encoded pixels dimensions.
    TRACK_ENCODED_PIXELS_DIMENSIONS = *b"enof";
    /// `clip` - clipping.
    CLIPPING = *b"clip";
    /// `crgn` - clipping region.
    CLIPPING_REGION = *b"crgn";
    /// `matt` - track matte.
    TRACK_MATTE = *b"matt";
    /// `kmat` - compressed matte.
    COMPRESSED_MATTE = *b"kmat";
    /// `edts` - edit list container.
    EDIT = *b"edts";
    /// `elst` - edit list.
    EDIT_LIST = *b"elst";
    /// `tref` - track reference container.
    TRACK_REFERENCE = *b"tref";
    /// `txas` - track exclude from autoselection reference.
    TRACK_EXCLUDE_FROM_AUTOSELECTION = *b"txas";
    /// `load` - track load settings.
    TRACK_LOAD_SETTINGS = *b"load";
    /// `imap` - track input map container.
    TRACK_INPUT_MAP = *b"imap";
    /// `\0\0in` - track input atom.
    TRACK_INPUT = *b"\0\0in";
    /// `\0\0ty` - track input type atom.
    TRACK_INPUT_TYPE = *b"\0\0ty";
    /// `obid` - object id atom.
    OBJECT_ID = *b"obid";
    /// `mdia` - media container.
    MEDIA = *b"mdia";
    /// `mdhd` - media header.
    MEDIA_HEADER = *b"mdhd";
    /// `elng` - extended language tag.
    EXTENDED_LANGUAGE_TAG = *b"elng";
    /// `hdlr` - handler reference.
    HANDLER_REFERENCE = *b"hdlr";
    /// `minf` - media information container.
    MEDIA_INFORMATION = *b"minf";
    /// `vmhd` - video media information header.
    VIDEO_MEDIA_INFORMATION_HEADER = *b"vmhd";
    /// `smhd` - sound media information header.
    SOUND_MEDIA_INFORMATION_HEADER = *b"smhd";
    /// `gmhd` - base media information header.
    BASE_MEDIA_INFORMATION_HEADER = *b"gmhd";
    /// `gmin` - base media information.
    BASE_MEDIA_INFORMATION = *b"gmin";
    /// `text` - text media information (sibling of `gmin` under `gmhd` for text tracks).
    TEXT_MEDIA_INFORMATION = *b"text";
    /// `dinf` - data information container.
    DATA_INFORMATION = *b"dinf";
    /// `dref` - data reference.
    DATA_REFERENCE = *b"dref";
    /// `stbl` - sample table container.
    SAMPLE_TABLE = *b"stbl";
    /// `stsd` - sample description.
    SAMPLE_DESCRIPTION = *b"stsd";
    /// `stts` - time to sample.
    TIME_TO_SAMPLE = *b"stts";
    /// `ctts` - composition offset.
    COMPOSITION_OFFSET = *b"ctts";
    /// `cslg` - composition shift least greatest.
    COMPOSITION_SHIFT_LEAST_GREATEST = *b"cslg";
    /// `stss` - sync sample.
    SYNC_SAMPLE = *b"stss";
    /// `stps` - partial sync sample.
    PARTIAL_SYNC_SAMPLE = *b"stps";
    /// `stsc` - sample to chunk.
    SAMPLE_TO_CHUNK = *b"stsc";
    /// `stsz` - sample size.
    SAMPLE_SIZE = *b"stsz";
    /// `stco` - chunk offset (32-bit).
    CHUNK_OFFSET = *b"stco";
    /// `co64` - chunk offset (64-bit).
    CHUNK_OFFSET_64 = *b"co64";
    /// `sdtp` - sample dependency flags.
    SAMPLE_DEPENDENCY_FLAGS = *b"sdtp";
    /// `udta` - user data container; children are opaque (not further enumerated here).
    USER_DATA = *b"udta";
    /// `ctab` - color table.
    COLOR_TABLE = *b"ctab";
}
