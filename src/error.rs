use std::borrow::Cow;
use std::{error, fmt, io};

use crate::Fourcc;

/// Type alias for the result of atom codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Kinds of errors that may occur while reading or writing atoms.
#[derive(Debug)]
pub enum ErrorKind {
    /// The stream ended before a structural read that had already started could complete.
    EndOfStream,
    /// The underlying stream reported a device or position error.
    Io(io::Error),
    /// A structural violation: wrong tag, inconsistent size accounting, a missing required
    /// child, a duplicate singleton child, a zero/negative effective size, or a component
    /// subtype that doesn't match the context it appears in.
    BadFormat {
        /// The atom being processed when the violation was detected, if known.
        fourcc: Option<Fourcc>,
        /// The stream position at the point of failure, if known.
        pos: Option<u64>,
    },
    /// A declared count exceeded its capacity bound before anything was allocated.
    OutOfMemory,
}

/// An error that occurred while reading or writing atoms.
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// A human readable description of the error.
    pub description: Cow<'static, str>,
}

impl Error {
    pub fn new(kind: ErrorKind, description: impl Into<Cow<'static, str>>) -> Error {
        Error { kind, description: description.into() }
    }

    /// A structural violation with no further diagnostic context.
    pub fn bad_format(description: impl Into<Cow<'static, str>>) -> Error {
        Error::new(ErrorKind::BadFormat { fourcc: None, pos: None }, description)
    }

    /// A structural violation tagged with the atom and stream position it was detected at.
    pub fn bad_format_at(
        fourcc: Fourcc,
        pos: u64,
        description: impl Into<Cow<'static, str>>,
    ) -> Error {
        Error::new(ErrorKind::BadFormat { fourcc: Some(fourcc), pos: Some(pos) }, description)
    }

    pub fn out_of_memory(description: impl Into<Cow<'static, str>>) -> Error {
        Error::new(ErrorKind::OutOfMemory, description)
    }

    /// Attaches `fourcc`/`pos` context to an already constructed `BadFormat` error, leaving
    /// other kinds untouched. Used by container parsers to annotate errors bubbled up from a
    /// child with the child's own tag once it's known.
    pub fn with_context(mut self, fourcc: Fourcc, pos: u64) -> Self {
        if let ErrorKind::BadFormat { fourcc: f, pos: p } = &mut self.kind {
            if f.is_none() {
                *f = Some(fourcc);
            }
            if p.is_none() {
                *p = Some(pos);
            }
        }
        self
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        let description = format!("IO error: {err}");
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Error::new(ErrorKind::EndOfStream, description),
            _ => Error::new(ErrorKind::Io(err), description),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{:?}", self.kind)
        } else {
            write!(f, "{}:\n{:?}", self.description, self.kind)
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{:?}", self.kind)
        } else {
            write!(f, "{}:\n{:?}", self.description, self.kind)
        }
    }
}
