//! One-byte wire tags shared by the logger and the inflater.
//!
//! Both tables are closed: a byte outside either enumeration is a fatal
//! format error on decode. The numeric values are part of the on-disk format
//! and must never change.

use std::fmt;

/// Record tag byte, the first byte of every wire record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EntryType {
    /// Schema definition: handle, segment count, kinds, literal segments.
    LogLine = 1,
    /// Logged values: handle followed by one payload per schema kind.
    LogEntry = 2,
}

impl EntryType {
    pub fn from_wire(b: u8) -> Option<EntryType> {
        match b {
            1 => Some(EntryType::LogLine),
            2 => Some(EntryType::LogEntry),
            _ => None,
        }
    }
}

/// Scalar kind of a single format placeholder.
///
/// The discriminants match the reflect-kind numbering used by the wire
/// format, so `kind as u8` is the byte that goes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Kind {
    Bool = 1,
    Int = 2,
    Int8 = 3,
    Int16 = 4,
    Int32 = 5,
    Int64 = 6,
    Uint = 7,
    Uint8 = 8,
    Uint16 = 9,
    Uint32 = 10,
    Uint64 = 11,
    Float32 = 13,
    Float64 = 14,
    Complex64 = 15,
    Complex128 = 16,
    String = 24,
}

impl Kind {
    pub fn from_wire(b: u8) -> Option<Kind> {
        Some(match b {
            1 => Kind::Bool,
            2 => Kind::Int,
            3 => Kind::Int8,
            4 => Kind::Int16,
            5 => Kind::Int32,
            6 => Kind::Int64,
            7 => Kind::Uint,
            8 => Kind::Uint8,
            9 => Kind::Uint16,
            10 => Kind::Uint32,
            11 => Kind::Uint64,
            13 => Kind::Float32,
            14 => Kind::Float64,
            15 => Kind::Complex64,
            16 => Kind::Complex128,
            24 => Kind::String,
            _ => return None,
        })
    }

    pub fn as_wire(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Uint => "uint",
            Kind::Uint8 => "uint8",
            Kind::Uint16 => "uint16",
            Kind::Uint32 => "uint32",
            Kind::Uint64 => "uint64",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::Complex64 => "complex64",
            Kind::Complex128 => "complex128",
            Kind::String => "string",
        };
        f.write_str(name)
    }
}
