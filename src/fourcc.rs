use std::array::TryFromSliceError;
use std::convert::TryInto;
use std::fmt::{self, Write};
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

/// A four-character code: the type tag of an atom. Four ASCII-range octets in wire order;
/// equality is byte-wise.
#[derive(Clone, Copy, Default, Hash, PartialEq, Eq)]
pub struct Fourcc(pub [u8; 4]);

impl Fourcc {
    pub const fn new(bytes: [u8; 4]) -> Self {
        Fourcc(bytes)
    }
}

impl Deref for Fourcc {
    type Target = [u8; 4];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Fourcc {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<[u8; 4]> for Fourcc {
    fn from(bytes: [u8; 4]) -> Self {
        Fourcc(bytes)
    }
}

impl FromStr for Fourcc {
    type Err = TryFromSliceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Fourcc(s.as_bytes().try_into()?))
    }
}

impl fmt::Debug for Fourcc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Fourcc(")?;
        for c in self.0.iter().map(|b| char::from(*b)) {
            f.write_char(c)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for Fourcc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.iter().map(|b| char::from(*b)) {
            f.write_char(c)?;
        }
        Ok(())
    }
}
