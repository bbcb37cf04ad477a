//! The tagged-union argument type passed to the hot path.
//!
//! Each variant corresponds to one [`Kind`], so the per-argument type check
//! at log time is a one-byte discriminant comparison. `Str` borrows its
//! contents; nothing here allocates.

use crate::wire::Kind;

/// A single log argument.
///
/// `Int` and `Uint` carry the platform-native width but always serialize as
/// 64 bits, so the byte stream is identical across platforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Bool(bool),
    Int(isize),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint(usize),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    /// (re, im) pair of 32-bit floats.
    Complex64(f32, f32),
    /// (re, im) pair of 64-bit floats.
    Complex128(f64, f64),
    Str(&'a str),
}

impl Value<'_> {
    /// The kind this value serializes as. Must equal the schema kind at the
    /// same position or the log call is rejected.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Int8(_) => Kind::Int8,
            Value::Int16(_) => Kind::Int16,
            Value::Int32(_) => Kind::Int32,
            Value::Int64(_) => Kind::Int64,
            Value::Uint(_) => Kind::Uint,
            Value::Uint8(_) => Kind::Uint8,
            Value::Uint16(_) => Kind::Uint16,
            Value::Uint32(_) => Kind::Uint32,
            Value::Uint64(_) => Kind::Uint64,
            Value::Float32(_) => Kind::Float32,
            Value::Float64(_) => Kind::Float64,
            Value::Complex64(..) => Kind::Complex64,
            Value::Complex128(..) => Kind::Complex128,
            Value::Str(_) => Kind::String,
        }
    }

    /// Appends the wire payload for this value. All multi-byte integers are
    /// little-endian; floats are IEEE-754 bit patterns; strings are
    /// u32-length-prefixed UTF-8.
    pub(crate) fn encode(&self, buf: &mut Vec<u8>) {
        match *self {
            Value::Bool(v) => buf.push(v as u8),
            Value::Int(v) => buf.extend_from_slice(&(v as i64).to_le_bytes()),
            Value::Int8(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Value::Int16(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Value::Int32(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Value::Int64(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Value::Uint(v) => buf.extend_from_slice(&(v as u64).to_le_bytes()),
            Value::Uint8(v) => buf.push(v),
            Value::Uint16(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Value::Uint32(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Value::Uint64(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Value::Float32(v) => buf.extend_from_slice(&v.to_bits().to_le_bytes()),
            Value::Float64(v) => buf.extend_from_slice(&v.to_bits().to_le_bytes()),
            Value::Complex64(re, im) => {
                buf.extend_from_slice(&re.to_bits().to_le_bytes());
                buf.extend_from_slice(&im.to_bits().to_le_bytes());
            }
            Value::Complex128(re, im) => {
                buf.extend_from_slice(&re.to_bits().to_le_bytes());
                buf.extend_from_slice(&im.to_bits().to_le_bytes());
            }
            Value::Str(s) => {
                buf.extend_from_slice(&(s.len() as u32).to_le_bytes());
                buf.extend_from_slice(s.as_bytes());
            }
        }
    }
}

impl From<bool> for Value<'_> {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<isize> for Value<'_> {
    fn from(v: isize) -> Self {
        Value::Int(v)
    }
}

impl From<i8> for Value<'_> {
    fn from(v: i8) -> Self {
        Value::Int8(v)
    }
}

impl From<i16> for Value<'_> {
    fn from(v: i16) -> Self {
        Value::Int16(v)
    }
}

impl From<i32> for Value<'_> {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value<'_> {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<usize> for Value<'_> {
    fn from(v: usize) -> Self {
        Value::Uint(v)
    }
}

impl From<u8> for Value<'_> {
    fn from(v: u8) -> Self {
        Value::Uint8(v)
    }
}

impl From<u16> for Value<'_> {
    fn from(v: u16) -> Self {
        Value::Uint16(v)
    }
}

impl From<u32> for Value<'_> {
    fn from(v: u32) -> Self {
        Value::Uint32(v)
    }
}

impl From<u64> for Value<'_> {
    fn from(v: u64) -> Self {
        Value::Uint64(v)
    }
}

impl From<f32> for Value<'_> {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<f64> for Value<'_> {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<(f32, f32)> for Value<'_> {
    fn from((re, im): (f32, f32)) -> Self {
        Value::Complex64(re, im)
    }
}

impl From<(f64, f64)> for Value<'_> {
    fn from((re, im): (f64, f64)) -> Self {
        Value::Complex128(re, im)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(v: &'a str) -> Self {
        Value::Str(v)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(v: &'a String) -> Self {
        Value::Str(v)
    }
}
