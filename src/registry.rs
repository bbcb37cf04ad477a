//! The process-wide logger registry.
//!
//! Registration parses a template once, claims the next handle with an
//! atomic fetch-add, publishes the schema into a write-once slot, and emits
//! the schema record to the sink. After that the hot path reads the slot
//! with no locking at all.
//!
//! Slots are never freed or reused; the table lives for the process
//! lifetime and is capped at [`MAX_HANDLES`] entries.

use std::io;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use lazy_static::lazy_static;

use crate::format::{parse_format, Schema};
use crate::writer;

/// The maximum number of templates that may be registered in one process.
pub const MAX_HANDLES: usize = 10240;

lazy_static! {
    /// Dense handle-indexed schema table. Each slot is written exactly once,
    /// by the `register` call that claimed its index, before the handle is
    /// handed out.
    static ref SCHEMAS: Vec<OnceLock<Schema>> =
        (0..MAX_HANDLES).map(|_| OnceLock::new()).collect();
}

static NEXT_HANDLE: AtomicU32 = AtomicU32::new(0);

/// An opaque identifier for a registered template.
///
/// Handles are assigned in strictly increasing order starting at 0 and are
/// valid for the rest of the process. They are plain values; copy them
/// freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(pub(crate) u32);

impl Handle {
    /// The raw 32-bit value written on the wire.
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Parses `template` and registers it, returning the handle to log with.
///
/// The schema record is written to the sink before this returns, so an
/// inflater always sees a schema ahead of its first entry. A sink I/O error
/// is returned to the caller; the handle it would have produced is consumed
/// either way.
///
/// # Panics
///
/// A malformed template or an exhausted handle table is a programmer error
/// and panics.
pub fn register(template: &str) -> io::Result<Handle> {
    let schema = match parse_format(template) {
        Ok(s) => s,
        Err(e) => panic!("invalid log template {template:?}: {e}"),
    };

    let idx = NEXT_HANDLE.fetch_add(1, Ordering::Relaxed);
    if idx as usize >= MAX_HANDLES {
        panic!("logger registry full: more than {MAX_HANDLES} templates registered");
    }

    // Publish before the handle can escape. The slot index was claimed by
    // the fetch-add above, so this set never races another writer.
    let slot = &SCHEMAS[idx as usize];
    let _ = slot.set(schema);
    let schema = slot.get().expect("slot was just published");

    let handle = Handle(idx);
    writer::write_schema(handle, schema)?;
    Ok(handle)
}

/// Looks up the schema for a handle returned by [`register`].
///
/// # Panics
///
/// Panics if the handle was never returned by `register` (programmer error).
pub(crate) fn schema(handle: Handle) -> &'static Schema {
    SCHEMAS
        .get(handle.0 as usize)
        .and_then(OnceLock::get)
        .unwrap_or_else(|| panic!("log called with unregistered handle {}", handle.0))
}
