//! Deferred-interpolation binary logging.
//!
//! A log line's static skeleton (literal text plus typed placeholders) is
//! parsed once, at registration, and written to the output stream as a
//! schema record. Each logging call then emits only a small handle and the
//! raw bit patterns of its arguments: no formatting, no allocation, no
//! timestamps. The binary stream is turned back into text offline by the
//! [`Inflater`] (or the bundled `inflate` binary).
//!
//! ```no_run
//! use deferlog::{log, register, set_writer};
//!
//! let out = std::fs::File::create("app.blog")?;
//! set_writer(Box::new(out))?;
//!
//! let h = register("worker %u8 finished task %i in %f64 seconds")?;
//! log!(h, 3u8, 17isize, 0.25f64)?;
//! deferlog::flush()?;
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! Placeholders are typed: `%b`, `%s`, `%i`/`%i8`/`%i16`/`%i32`/`%i64`,
//! `%u` and friends, `%f32`/`%f64`, `%c64`/`%c128`. `%%` is a literal
//! percent, and `%{i}32` keeps a trailing digit out of the width.

pub mod error;
pub mod format;
pub mod inflate;
pub mod registry;
pub mod value;
pub mod wire;

mod writer;

pub use error::{InflateError, ParseError};
pub use format::{parse_format, Schema};
pub use inflate::Inflater;
pub use registry::{register, Handle, MAX_HANDLES};
pub use value::Value;
pub use wire::{EntryType, Kind};
pub use writer::{flush, log, set_writer};

/// Logs through a handle, packing each argument into a [`Value`] via
/// `From`. Expands to a [`log`](crate::log) call:
///
/// ```no_run
/// # use deferlog::{log, register};
/// let h = register("%s took %u64 ns: ok=%b")?;
/// log!(h, "connect", 1200u64, true)?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[macro_export]
macro_rules! log {
    ($handle:expr $(, $arg:expr)* $(,)?) => {
        $crate::log($handle, &[$($crate::Value::from($arg)),*])
    };
}
