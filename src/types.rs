//! Scalar semantic types shared across leaf atom bodies (spec §3 "Scalar semantic types").

use std::io::{Read, Write};

use crate::primitive::{ReadExt, WriteExt};
use crate::Result;

/// One version octet followed by a 24-bit flags field, always written big-endian. Every
/// "full atom" (an atom whose body starts with version/flags) carries one of these.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VersionFlags {
    pub version: u8,
    pub flags: [u8; 3],
}

impl VersionFlags {
    pub const LEN: u64 = 4;

    pub fn new(version: u8, flags: [u8; 3]) -> Self {
        VersionFlags { version, flags }
    }

    pub fn parse(reader: &mut impl Read) -> Result<Self> {
        let version = reader.read_u8()?;
        let flags_u24 = reader.read_u24()?;
        let flags = [(flags_u24 >> 16) as u8, (flags_u24 >> 8) as u8, flags_u24 as u8];
        Ok(VersionFlags { version, flags })
    }

    pub fn write(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_u8(self.version)?;
        let flags_u24 =
            ((self.flags[0] as u32) << 16) | ((self.flags[1] as u32) << 8) | self.flags[2] as u32;
        writer.write_u24(flags_u24)?;
        Ok(())
    }
}

/// A Q8.8 fixed-point rational: a signed integer byte followed by an unsigned fraction byte.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FixedQ8_8 {
    int_part: i8,
    frac_part: u8,
}

impl FixedQ8_8 {
    pub const ZERO: FixedQ8_8 = FixedQ8_8 { int_part: 0, frac_part: 0 };

    pub const fn new(int_part: i8, frac_part: u8) -> Self {
        FixedQ8_8 { int_part, frac_part }
    }

    pub const fn int_part(&self) -> i8 {
        self.int_part
    }

    pub const fn frac_part(&self) -> u8 {
        self.frac_part
    }
}

impl From<FixedQ8_8> for f64 {
    fn from(v: FixedQ8_8) -> f64 {
        v.int_part as f64 + v.frac_part as f64 / 256.0
    }
}

/// A Q16.16 fixed-point rational: a signed 16-bit integer part followed by an unsigned
/// 16-bit fraction part.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FixedQ16_16 {
    int_part: i16,
    frac_part: u16,
}

impl FixedQ16_16 {
    pub const ZERO: FixedQ16_16 = FixedQ16_16 { int_part: 0, frac_part: 0 };
    pub const ONE: FixedQ16_16 = FixedQ16_16 { int_part: 1, frac_part: 0 };

    pub const fn new(int_part: i16, frac_part: u16) -> Self {
        FixedQ16_16 { int_part, frac_part }
    }

    pub const fn int_part(&self) -> i16 {
        self.int_part
    }

    pub const fn frac_part(&self) -> u16 {
        self.frac_part
    }
}

impl From<FixedQ16_16> for f64 {
    fn from(v: FixedQ16_16) -> f64 {
        v.int_part as f64 + v.frac_part as f64 / 65536.0
    }
}

/// Four 16-bit unsigned coordinates: top, left, bottom, right.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Rect {
    pub top: u16,
    pub left: u16,
    pub bottom: u16,
    pub right: u16,
}

impl Rect {
    pub const LEN: u64 = 8;

    pub fn parse(reader: &mut impl Read) -> Result<Self> {
        Ok(Rect {
            top: reader.read_u16()?,
            left: reader.read_u16()?,
            bottom: reader.read_u16()?,
            right: reader.read_u16()?,
        })
    }

    pub fn write(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_u16(self.top)?;
        writer.write_u16(self.left)?;
        writer.write_u16(self.bottom)?;
        writer.write_u16(self.right)?;
        Ok(())
    }
}

/// A 16-bit size, a [`Rect`], then `size - 10` opaque trailing bytes (used by `crgn`).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Region {
    pub rect: Rect,
    pub opaque: Vec<u8>,
}

impl Region {
    pub fn len(&self) -> u64 {
        10 + self.opaque.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.opaque.is_empty() && self.rect == Rect::default()
    }

    pub fn parse(reader: &mut impl Read, max_opaque_len: u64) -> Result<Self> {
        let size = reader.read_u16()?;
        if (size as u64) < 10 {
            return Err(crate::Error::bad_format(format!(
                "region size {size} is smaller than the fixed 10 byte prefix"
            )));
        }
        let rect = Rect::parse(reader)?;
        let opaque_len = size as u64 - 10;
        if opaque_len > max_opaque_len {
            return Err(crate::Error::out_of_memory(format!(
                "region opaque tail of {opaque_len} bytes exceeds the configured bound"
            )));
        }
        let opaque = reader.read_u8_vec(opaque_len)?;
        Ok(Region { rect, opaque })
    }

    pub fn write(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_u16(self.len() as u16)?;
        self.rect.write(writer)?;
        writer.write_all(&self.opaque)?;
        Ok(())
    }
}

/// Nine 32-bit values in row-major order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Matrix3x3(pub [u32; 9]);

impl Matrix3x3 {
    pub const LEN: u64 = 36;

    /// The QTFF identity matrix: `[1,0,0, 0,1,0, 0,0,0x4000_0000]` in Q16.16, i.e. scale 1.0
    /// with no rotation/skew/translation.
    pub const IDENTITY: Matrix3x3 =
        Matrix3x3([0x0001_0000, 0, 0, 0, 0x0001_0000, 0, 0, 0, 0x4000_0000]);

    pub fn parse(reader: &mut impl Read) -> Result<Self> {
        let mut values = [0u32; 9];
        for v in values.iter_mut() {
            *v = reader.read_u32()?;
        }
        Ok(Matrix3x3(values))
    }

    pub fn write(&self, writer: &mut impl Write) -> Result<()> {
        for v in self.0.iter() {
            writer.write_u32(*v)?;
        }
        Ok(())
    }
}

impl Default for Matrix3x3 {
    fn default() -> Self {
        Matrix3x3::IDENTITY
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn version_flags_roundtrip() {
        let vf = VersionFlags::new(1, [0x00, 0x0f, 0xa2]);
        let mut buf = Vec::new();
        vf.write(&mut buf).unwrap();
        assert_eq!(buf, vec![1, 0x00, 0x0f, 0xa2]);
        let mut cursor = std::io::Cursor::new(buf);
        assert_eq!(VersionFlags::parse(&mut cursor).unwrap(), vf);
    }

    #[test]
    fn fixed_q16_16_converts_to_f64() {
        let v = FixedQ16_16::new(1, 0x8000);
        assert_eq!(f64::from(v), 1.5);
    }

    #[test]
    fn region_rejects_undersize_prefix() {
        let mut cursor = std::io::Cursor::new(vec![0u8, 9]);
        assert!(Region::parse(&mut cursor, 1024).is_err());
    }
}
