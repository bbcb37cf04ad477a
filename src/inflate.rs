//! Offline expansion of a binary log stream into readable text.
//!
//! The inflater consumes the records the writer produced: schema records
//! teach it what each handle's line looks like, entry records are expanded
//! by interleaving the remembered literal segments with the decoded
//! argument values. It needs no access to the registry that produced the
//! stream; everything required to render is in the stream itself.

use std::collections::HashMap;
use std::io::{self, BufReader, BufWriter, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::InflateError;
use crate::format::Schema;
use crate::wire::{EntryType, Kind};

/// Streaming decoder from a record stream to a text stream.
pub struct Inflater<R: Read, W: Write> {
    r: BufReader<R>,
    w: BufWriter<W>,
    schemas: HashMap<u32, Schema>,
}

impl<R: Read, W: Write> Inflater<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Inflater {
            r: BufReader::new(reader),
            w: BufWriter::new(writer),
            schemas: HashMap::new(),
        }
    }

    /// Decodes records until end of input.
    ///
    /// EOF at a record boundary ends the run cleanly. Any malformed byte
    /// stops processing right there and reports why; text written before
    /// the error is flushed and retained.
    pub fn inflate(&mut self) -> Result<(), InflateError> {
        let result = self.run();
        self.w.flush()?;
        result
    }

    fn run(&mut self) -> Result<(), InflateError> {
        loop {
            let tag = match self.r.read_u8() {
                Ok(b) => b,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
                Err(e) => return Err(e.into()),
            };

            match EntryType::from_wire(tag) {
                Some(EntryType::LogLine) => {
                    let handle = self.r.read_u32::<LittleEndian>()?;
                    let schema = read_schema(&mut self.r)?;
                    self.schemas.insert(handle, schema);
                }
                Some(EntryType::LogEntry) => {
                    let handle = self.r.read_u32::<LittleEndian>()?;
                    let schema = self
                        .schemas
                        .get(&handle)
                        .ok_or(InflateError::UnknownHandle(handle))?;
                    expand_entry(&mut self.r, &mut self.w, schema)?;
                }
                None => return Err(InflateError::BadTag(tag)),
            }
        }
    }
}

/// Reads the body of a schema record (everything after the tag and handle).
fn read_schema<R: Read>(r: &mut R) -> Result<Schema, InflateError> {
    let num_segs = r.read_u32::<LittleEndian>()?;
    if num_segs == 0 {
        return Err(InflateError::ZeroSegments);
    }

    let mut kinds = Vec::with_capacity(num_segs as usize - 1);
    for _ in 0..num_segs - 1 {
        let b = r.read_u8()?;
        kinds.push(Kind::from_wire(b).ok_or(InflateError::UnknownKind(b))?);
    }

    let mut segs = Vec::with_capacity(num_segs as usize);
    for _ in 0..num_segs {
        let len = r.read_u32::<LittleEndian>()?;
        let mut bytes = vec![0u8; len as usize];
        r.read_exact(&mut bytes)?;
        segs.push(String::from_utf8(bytes)?);
    }

    Ok(Schema { kinds, segs })
}

/// Expands one entry record body: `segs[0] arg0 segs[1] arg1 … segs[N]`,
/// then a newline.
fn expand_entry<R: Read, W: Write>(
    r: &mut R,
    w: &mut W,
    schema: &Schema,
) -> Result<(), InflateError> {
    w.write_all(schema.segs[0].as_bytes())?;
    for (kind, seg) in schema.kinds.iter().zip(&schema.segs[1..]) {
        render_arg(r, w, *kind)?;
        w.write_all(seg.as_bytes())?;
    }
    w.write_all(b"\n")?;
    Ok(())
}

/// Decodes one argument payload and renders it as text.
fn render_arg<R: Read, W: Write>(r: &mut R, w: &mut W, kind: Kind) -> Result<(), InflateError> {
    match kind {
        Kind::Bool => {
            let v = r.read_u8()?;
            w.write_all(if v == 0 { b"false" } else { b"true" })?;
        }
        Kind::Int | Kind::Int64 => {
            let v = r.read_i64::<LittleEndian>()?;
            write!(w, "{v}")?;
        }
        Kind::Int8 => {
            let v = r.read_i8()?;
            write!(w, "{v}")?;
        }
        Kind::Int16 => {
            let v = r.read_i16::<LittleEndian>()?;
            write!(w, "{v}")?;
        }
        Kind::Int32 => {
            let v = r.read_i32::<LittleEndian>()?;
            write!(w, "{v}")?;
        }
        Kind::Uint | Kind::Uint64 => {
            let v = r.read_u64::<LittleEndian>()?;
            write!(w, "{v}")?;
        }
        Kind::Uint8 => {
            let v = r.read_u8()?;
            write!(w, "{v}")?;
        }
        Kind::Uint16 => {
            let v = r.read_u16::<LittleEndian>()?;
            write!(w, "{v}")?;
        }
        Kind::Uint32 => {
            let v = r.read_u32::<LittleEndian>()?;
            write!(w, "{v}")?;
        }
        Kind::Float32 => {
            let v = f32::from_bits(r.read_u32::<LittleEndian>()?);
            write!(w, "{v}")?;
        }
        Kind::Float64 => {
            let v = f64::from_bits(r.read_u64::<LittleEndian>()?);
            write!(w, "{v}")?;
        }
        Kind::Complex64 => {
            let re = f32::from_bits(r.read_u32::<LittleEndian>()?);
            let im = f32::from_bits(r.read_u32::<LittleEndian>()?);
            write!(w, "({re}{im:+}i)")?;
        }
        Kind::Complex128 => {
            let re = f64::from_bits(r.read_u64::<LittleEndian>()?);
            let im = f64::from_bits(r.read_u64::<LittleEndian>()?);
            write!(w, "({re}{im:+}i)")?;
        }
        Kind::String => {
            let len = r.read_u32::<LittleEndian>()?;
            // Copied verbatim, no escaping and no UTF-8 check on the way out.
            let copied = io::copy(&mut r.by_ref().take(u64::from(len)), w)?;
            if copied < len as u64 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "string payload cut short",
                )
                .into());
            }
        }
    }
    Ok(())
}
