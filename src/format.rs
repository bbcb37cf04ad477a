//! Template parsing: the one-time static analysis of a log line.
//!
//! A template is plain text with `%`-directives marking typed placeholders:
//!
//! ```text
//! "worker %u8 finished task %i in %f64 seconds"
//! ```
//!
//! `%%` is a literal percent. A directive is a type code, optionally wrapped
//! in braces to stop a following digit from being read as a width:
//! `%{i}32` is an `int` placeholder followed by the literal text `32`.
//!
//! Type codes: `b` (bool), `s` (string), `i`/`u` with optional `8`/`16`/
//! `32`/`64` width, `f32`/`f64`, `c64`/`c128`. Width digits must be consumed
//! in full: `%i1` must continue with `6`, and `%f` alone is an error.

use std::iter::Peekable;
use std::str::Chars;

use crate::error::ParseError;
use crate::wire::Kind;

/// The parsed static skeleton of a log template: the placeholder kinds in
/// order and the literal text between them.
///
/// Always `segs.len() == kinds.len() + 1`; an empty template parses to zero
/// kinds and a single empty segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub kinds: Vec<Kind>,
    pub segs: Vec<String>,
}

/// Parses a template into its [`Schema`].
pub fn parse_format(fmt: &str) -> Result<Schema, ParseError> {
    let mut kinds = Vec::new();
    let mut segs = Vec::new();
    let mut cur = String::new();

    let mut chars = fmt.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            cur.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            cur.push('%');
            continue;
        }

        // Directive: close the current segment, read the type code.
        segs.push(std::mem::take(&mut cur));

        let braced = chars.peek() == Some(&'{');
        if braced {
            chars.next();
        }
        kinds.push(parse_code(&mut chars)?);
        if braced && chars.next() != Some('}') {
            return Err(ParseError::UnclosedBrace);
        }
    }
    segs.push(cur);

    debug_assert_eq!(segs.len(), kinds.len() + 1);
    Ok(Schema { kinds, segs })
}

/// Reads one type code at the cursor. The first character selects the
/// family; `i`/`u` take an optional width, `f`/`c` require one.
fn parse_code(chars: &mut Peekable<Chars>) -> Result<Kind, ParseError> {
    let family = chars.next().ok_or(ParseError::Truncated)?;
    match family {
        'b' => Ok(Kind::Bool),
        's' => Ok(Kind::String),
        'i' => match chars.peek() {
            Some('8') => consumed(chars, Kind::Int8),
            Some('1') => full_width(chars, &['6'], Kind::Int16, 'i'),
            Some('3') => full_width(chars, &['2'], Kind::Int32, 'i'),
            Some('6') => full_width(chars, &['4'], Kind::Int64, 'i'),
            Some(d) if d.is_ascii_digit() => Err(ParseError::InvalidWidth('i')),
            _ => Ok(Kind::Int),
        },
        'u' => match chars.peek() {
            Some('8') => consumed(chars, Kind::Uint8),
            Some('1') => full_width(chars, &['6'], Kind::Uint16, 'u'),
            Some('3') => full_width(chars, &['2'], Kind::Uint32, 'u'),
            Some('6') => full_width(chars, &['4'], Kind::Uint64, 'u'),
            Some(d) if d.is_ascii_digit() => Err(ParseError::InvalidWidth('u')),
            _ => Ok(Kind::Uint),
        },
        'f' => match chars.next() {
            Some('3') => expect(chars, '2', Kind::Float32, 'f'),
            Some('6') => expect(chars, '4', Kind::Float64, 'f'),
            Some(_) => Err(ParseError::InvalidWidth('f')),
            None => Err(ParseError::Truncated),
        },
        'c' => match chars.next() {
            Some('6') => expect(chars, '4', Kind::Complex64, 'c'),
            Some('1') => {
                expect(chars, '2', Kind::Complex128, 'c')?;
                expect(chars, '8', Kind::Complex128, 'c')
            }
            Some(_) => Err(ParseError::InvalidWidth('c')),
            None => Err(ParseError::Truncated),
        },
        other => Err(ParseError::UnknownCode(other)),
    }
}

/// Consumes the already-peeked width digit and yields `kind`.
fn consumed(chars: &mut Peekable<Chars>, kind: Kind) -> Result<Kind, ParseError> {
    chars.next();
    Ok(kind)
}

/// Consumes the peeked first width digit, then the rest of the width.
fn full_width(
    chars: &mut Peekable<Chars>,
    rest: &[char],
    kind: Kind,
    family: char,
) -> Result<Kind, ParseError> {
    chars.next();
    for &d in rest {
        expect(chars, d, kind, family)?;
    }
    Ok(kind)
}

fn expect(
    chars: &mut Peekable<Chars>,
    want: char,
    kind: Kind,
    family: char,
) -> Result<Kind, ParseError> {
    match chars.next() {
        Some(c) if c == want => Ok(kind),
        Some(_) => Err(ParseError::InvalidWidth(family)),
        None => Err(ParseError::Truncated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(fmt: &str) -> Schema {
        parse_format(fmt).expect("template should parse")
    }

    #[test]
    fn test_empty_template() {
        let s = parse("");
        assert!(s.kinds.is_empty());
        assert_eq!(s.segs, vec![String::new()]);
    }

    #[test]
    fn test_plain_text_is_one_segment() {
        let s = parse("no placeholders here");
        assert!(s.kinds.is_empty());
        assert_eq!(s.segs, vec!["no placeholders here".to_string()]);
    }

    #[test]
    fn test_percent_escape() {
        let s = parse("%%");
        assert!(s.kinds.is_empty());
        assert_eq!(s.segs, vec!["%".to_string()]);

        let s = parse("100%% done");
        assert_eq!(s.segs, vec!["100% done".to_string()]);
    }

    #[test]
    fn test_every_type_code() {
        let cases = [
            ("b", Kind::Bool),
            ("s", Kind::String),
            ("i", Kind::Int),
            ("i8", Kind::Int8),
            ("i16", Kind::Int16),
            ("i32", Kind::Int32),
            ("i64", Kind::Int64),
            ("u", Kind::Uint),
            ("u8", Kind::Uint8),
            ("u16", Kind::Uint16),
            ("u32", Kind::Uint32),
            ("u64", Kind::Uint64),
            ("f32", Kind::Float32),
            ("f64", Kind::Float64),
            ("c64", Kind::Complex64),
            ("c128", Kind::Complex128),
        ];
        for (code, kind) in cases {
            let bare = parse(&format!("%{code}"));
            assert_eq!(bare.kinds, vec![kind], "%{code}");
            assert_eq!(bare.segs, vec![String::new(), String::new()]);

            let braced = parse(&format!("%{{{code}}}"));
            assert_eq!(braced.kinds, vec![kind], "%{{{code}}}");
            assert_eq!(braced.segs, vec![String::new(), String::new()]);
        }
    }

    #[test]
    fn test_mixed_template() {
        let s = parse(
            "foo thing bar thing %i64. Fubar %s foo. sadfasdf %u32 sdfasfasdfasdffds %u32.",
        );
        assert_eq!(
            s.kinds,
            vec![Kind::Int64, Kind::String, Kind::Uint32, Kind::Uint32]
        );
        assert_eq!(s.segs.len(), 5);
        assert_eq!(s.segs[0], "foo thing bar thing ");
        assert_eq!(s.segs[4], ".");
    }

    #[test]
    fn test_brace_disambiguation() {
        let s = parse("Disambiguate this: %{i}32");
        assert_eq!(s.kinds, vec![Kind::Int]);
        assert_eq!(s.segs, vec!["Disambiguate this: ".to_string(), "32".to_string()]);
    }

    #[test]
    fn test_bare_int_followed_by_non_digit() {
        let s = parse("%ix");
        assert_eq!(s.kinds, vec![Kind::Int]);
        assert_eq!(s.segs[1], "x");

        // i16 swallows both digits; the next digit is literal text.
        let s = parse("%i165");
        assert_eq!(s.kinds, vec![Kind::Int16]);
        assert_eq!(s.segs[1], "5");
    }

    #[test]
    fn test_adjacent_placeholders() {
        let s = parse("%b%s%u8");
        assert_eq!(s.kinds, vec![Kind::Bool, Kind::String, Kind::Uint8]);
        assert_eq!(s.segs.len(), 4);
        assert!(s.segs.iter().all(String::is_empty));
    }

    #[test]
    fn test_unicode_literals_survive() {
        let s = parse("héllo %s wörld");
        assert_eq!(s.segs, vec!["héllo ".to_string(), " wörld".to_string()]);
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(parse_format("%q"), Err(ParseError::UnknownCode('q')));
        assert_eq!(parse_format("%d"), Err(ParseError::UnknownCode('d')));
    }

    #[test]
    fn test_truncated_directives() {
        assert_eq!(parse_format("%"), Err(ParseError::Truncated));
        assert_eq!(parse_format("%i1"), Err(ParseError::Truncated));
        assert_eq!(parse_format("%c1"), Err(ParseError::Truncated));
        assert_eq!(parse_format("%c12"), Err(ParseError::Truncated));
        assert_eq!(parse_format("%f"), Err(ParseError::Truncated));
        assert_eq!(parse_format("%f3"), Err(ParseError::Truncated));
    }

    #[test]
    fn test_invalid_widths() {
        assert_eq!(parse_format("%i2 "), Err(ParseError::InvalidWidth('i')));
        assert_eq!(parse_format("%u9 "), Err(ParseError::InvalidWidth('u')));
        assert_eq!(parse_format("%i1x"), Err(ParseError::InvalidWidth('i')));
        assert_eq!(parse_format("%f16"), Err(ParseError::InvalidWidth('f')));
        assert_eq!(parse_format("%c32 "), Err(ParseError::InvalidWidth('c')));
        assert_eq!(parse_format("%c129"), Err(ParseError::InvalidWidth('c')));
    }

    #[test]
    fn test_unclosed_brace() {
        assert_eq!(parse_format("%{i"), Err(ParseError::UnclosedBrace));
        assert_eq!(parse_format("%{i32"), Err(ParseError::UnclosedBrace));
        // A width cut short inside braces is a width error, not a brace error.
        assert_eq!(parse_format("%{i3}"), Err(ParseError::InvalidWidth('i')));
    }
}
