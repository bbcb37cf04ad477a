use std::io;

use thiserror::Error;

/// A malformed log template.
///
/// Templates are written by the programmer at registration time, so
/// [`register`](crate::register) treats any of these as fatal rather than
/// returning them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The template ended in the middle of a `%` directive.
    #[error("template ends inside a % directive")]
    Truncated,

    /// The character after `%` does not start any known type code.
    #[error("unknown type code `%{0}`")]
    UnknownCode(char),

    /// A width suffix was started but not completed with a valid width
    /// (e.g. `%i2`, `%c12`, `%f`).
    #[error("invalid width for type code `{0}`")]
    InvalidWidth(char),

    /// A `%{...}` directive was never closed.
    #[error("missing closing `}}` in braced directive")]
    UnclosedBrace,
}

/// A decode failure while inflating a binary stream.
///
/// Processing stops at the offending byte; text already written to the
/// output is retained. Truncation mid-record surfaces as the underlying
/// `UnexpectedEof` I/O error.
#[derive(Debug, Error)]
pub enum InflateError {
    #[error("bad file format: unknown record tag {0}")]
    BadTag(u8),

    #[error("bad file format: unknown kind byte {0} in schema record")]
    UnknownKind(u8),

    #[error("bad file format: schema record with zero segments")]
    ZeroSegments,

    #[error("entry references unknown handle {0}")]
    UnknownHandle(u32),

    #[error("schema segment is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}
