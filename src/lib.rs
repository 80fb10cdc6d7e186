//! A codec for the atom/box grammar of QuickTime (QTFF) and ISO Base Media File Format
//! (MP4) movie files: a bidirectional mapping between a flat, positioned byte stream and a
//! strongly-typed tree of atoms.
//!
//! This crate owns the structural grammar only: validating tags, sizes, versions and child
//! structure on read, and re-emitting a byte-exact encoding on write. It does not decode
//! media samples, does not provide a CLI, and does not log - see [`config`] for the handful
//! of behaviors that are configurable rather than fixed.
#![warn(missing_docs)]

pub use crate::config::{Bounds, ReadConfig};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::fourcc::Fourcc;
pub use crate::types::{FixedQ16_16, FixedQ8_8, Matrix3x3, Rect, Region, VersionFlags};

pub use crate::atom::ftyp::FileType;
pub use crate::atom::mdat::MovieData;
pub use crate::atom::mdhd::MediaHeader;
pub use crate::atom::mdia::Media;
pub use crate::atom::minf::MediaInformation;
pub use crate::atom::moov::Movie;
pub use crate::atom::movie_file::{read_file, write_file, MovieFile};
pub use crate::atom::mvhd::MovieHeader;
pub use crate::atom::simple_leaf::{Free, Skip, Wide};
pub use crate::atom::stbl::SampleTable;
pub use crate::atom::tkhd::TrackHeader;
pub use crate::atom::trak::Track;
pub use crate::atom::{Atom, OpaqueAtom, ParseAtom, WriteAtom};

pub mod atom;
pub mod config;
pub mod error;
pub mod fourcc;
pub mod head;
pub mod primitive;
pub mod registry;
pub mod types;
