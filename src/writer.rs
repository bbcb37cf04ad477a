//! The writer core: owns the process-wide buffered sink and serializes
//! records into it.
//!
//! Every record, schema or entry, is composed into a contiguous byte
//! block first and then handed to the sink with a single `write_all` while
//! holding its mutex. That single-shot write is what keeps records
//! contiguous when many threads log at once; composition itself happens
//! outside the lock, in a per-thread scratch buffer that is reused across
//! calls.

use std::cell::RefCell;
use std::io::{self, BufWriter, Write};

use lazy_static::lazy_static;
use parking_lot::Mutex;

use crate::format::Schema;
use crate::registry::{self, Handle};
use crate::value::Value;
use crate::wire::EntryType;

lazy_static! {
    /// The buffered sink. Starts out wrapping standard error so templates
    /// registered before `set_writer` still have their schema records kept.
    static ref OUT: Mutex<BufWriter<Box<dyn Write + Send>>> =
        Mutex::new(BufWriter::new(Box::new(io::stderr())));
}

thread_local! {
    static SCRATCH: RefCell<Vec<u8>> = RefCell::new(Vec::with_capacity(256));
}

/// Replaces the sink, flushing the previous one first.
///
/// Call once at startup, before other threads log or register. The swap
/// itself holds the sink mutex so it cannot tear a record, but records
/// buffered by racing callers may land on either sink, and a racing
/// `register` may emit its schema to the old one.
///
/// On a flush error the previous writer is left in place.
pub fn set_writer(sink: Box<dyn Write + Send>) -> io::Result<()> {
    let mut out = OUT.lock();
    out.flush()?;
    *out = BufWriter::new(sink);
    Ok(())
}

/// Drains buffered records to the underlying sink.
pub fn flush() -> io::Result<()> {
    OUT.lock().flush()
}

/// Emits the schema record for a freshly registered template.
pub(crate) fn write_schema(handle: Handle, schema: &Schema) -> io::Result<()> {
    let mut buf = Vec::with_capacity(schema_record_len(schema));
    encode_schema(handle, schema, &mut buf);
    OUT.lock().write_all(&buf)
}

/// Emits one entry record: the hot path.
///
/// Arguments must match the registered schema in count and kind.
///
/// # Panics
///
/// An unregistered handle, an argument-count mismatch, or a kind mismatch
/// is a programmer error and panics.
pub fn log(handle: Handle, args: &[Value<'_>]) -> io::Result<()> {
    let schema = registry::schema(handle);
    SCRATCH.with(|cell| {
        let mut buf = cell.borrow_mut();
        buf.clear();
        encode_entry(handle, schema, args, &mut buf);
        OUT.lock().write_all(&buf)
    })
}

fn schema_record_len(schema: &Schema) -> usize {
    1 + 4 + 4
        + schema.kinds.len()
        + schema.segs.iter().map(|s| 4 + s.len()).sum::<usize>()
}

/// Appends a `LogLine` record: tag, handle, segment count, kind bytes, then
/// the length-prefixed literal segments.
pub(crate) fn encode_schema(handle: Handle, schema: &Schema, buf: &mut Vec<u8>) {
    buf.push(EntryType::LogLine as u8);
    buf.extend_from_slice(&handle.0.to_le_bytes());
    buf.extend_from_slice(&(schema.segs.len() as u32).to_le_bytes());
    for k in &schema.kinds {
        buf.push(k.as_wire());
    }
    for seg in &schema.segs {
        buf.extend_from_slice(&(seg.len() as u32).to_le_bytes());
        buf.extend_from_slice(seg.as_bytes());
    }
}

/// Appends a `LogEntry` record: tag, handle, then each argument's payload.
pub(crate) fn encode_entry(
    handle: Handle,
    schema: &Schema,
    args: &[Value<'_>],
    buf: &mut Vec<u8>,
) {
    if args.len() != schema.kinds.len() {
        panic!(
            "log arity mismatch for handle {}: template takes {} arguments, got {}",
            handle.0,
            schema.kinds.len(),
            args.len()
        );
    }
    buf.push(EntryType::LogEntry as u8);
    buf.extend_from_slice(&handle.0.to_le_bytes());
    for (i, (arg, &want)) in args.iter().zip(&schema.kinds).enumerate() {
        let got = arg.kind();
        if got != want {
            panic!(
                "log kind mismatch for handle {} argument {i}: template wants {want}, got {got}",
                handle.0
            );
        }
        arg.encode(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::parse_format;

    fn schema_bytes(handle: u32, fmt: &str) -> Vec<u8> {
        let schema = parse_format(fmt).unwrap();
        let mut buf = Vec::new();
        encode_schema(Handle(handle), &schema, &mut buf);
        buf
    }

    #[test]
    fn test_empty_template_schema_record_is_13_bytes() {
        let buf = schema_bytes(0, "");
        assert_eq!(buf.len(), 13);
        assert_eq!(buf[0], EntryType::LogLine as u8);
        assert_eq!(&buf[1..5], 0u32.to_le_bytes());
        assert_eq!(&buf[5..9], 1u32.to_le_bytes()); // one (empty) segment
        assert_eq!(&buf[9..13], 0u32.to_le_bytes()); // its zero length
    }

    #[test]
    fn test_bool_template_schema_record_is_18_bytes() {
        let buf = schema_bytes(3, "%b");
        assert_eq!(buf.len(), 18);
        assert_eq!(buf[0], EntryType::LogLine as u8);
        assert_eq!(&buf[1..5], 3u32.to_le_bytes());
        assert_eq!(&buf[5..9], 2u32.to_le_bytes()); // two segments
        assert_eq!(buf[9], crate::Kind::Bool.as_wire());
        assert_eq!(&buf[10..14], 0u32.to_le_bytes());
        assert_eq!(&buf[14..18], 0u32.to_le_bytes());
    }

    #[test]
    fn test_schema_record_carries_segments_verbatim() {
        let buf = schema_bytes(1, "ab %i64 cd");
        let mut want = vec![EntryType::LogLine as u8];
        want.extend_from_slice(&1u32.to_le_bytes());
        want.extend_from_slice(&2u32.to_le_bytes());
        want.push(crate::Kind::Int64.as_wire());
        want.extend_from_slice(&3u32.to_le_bytes());
        want.extend_from_slice(b"ab ");
        want.extend_from_slice(&4u32.to_le_bytes());
        want.extend_from_slice(b" cd");
        assert_eq!(buf, want);
    }

    #[test]
    fn test_entry_record_for_bool() {
        let schema = parse_format("%b").unwrap();
        for (v, byte) in [(false, 0u8), (true, 1u8)] {
            let mut buf = Vec::new();
            encode_entry(Handle(7), &schema, &[Value::Bool(v)], &mut buf);
            let mut want = vec![EntryType::LogEntry as u8];
            want.extend_from_slice(&7u32.to_le_bytes());
            want.push(byte);
            assert_eq!(buf, want);
        }
    }

    #[test]
    fn test_entry_record_for_empty_template_is_5_bytes() {
        let schema = parse_format("").unwrap();
        let mut buf = Vec::new();
        encode_entry(Handle(2), &schema, &[], &mut buf);
        assert_eq!(buf.len(), 5);
        assert_eq!(buf[0], EntryType::LogEntry as u8);
        assert_eq!(&buf[1..5], 2u32.to_le_bytes());
    }

    #[test]
    fn test_entry_payloads_are_concatenated_in_order() {
        let schema = parse_format("%u16 %s").unwrap();
        let mut buf = Vec::new();
        encode_entry(
            Handle(0),
            &schema,
            &[Value::Uint16(0xBEEF), Value::Str("ok")],
            &mut buf,
        );
        let mut want = vec![EntryType::LogEntry as u8];
        want.extend_from_slice(&0u32.to_le_bytes());
        want.extend_from_slice(&0xBEEFu16.to_le_bytes());
        want.extend_from_slice(&2u32.to_le_bytes());
        want.extend_from_slice(b"ok");
        assert_eq!(buf, want);
    }

    #[test]
    #[should_panic(expected = "arity mismatch")]
    fn test_arity_mismatch_is_fatal() {
        let schema = parse_format("%b").unwrap();
        encode_entry(Handle(0), &schema, &[], &mut Vec::new());
    }

    #[test]
    #[should_panic(expected = "kind mismatch")]
    fn test_kind_mismatch_is_fatal() {
        let schema = parse_format("%b").unwrap();
        encode_entry(Handle(0), &schema, &[Value::Int64(1)], &mut Vec::new());
    }
}
