use alloc::string::{String, ToString};
use core::str::FromStr;

use super::grammar::{self, SIGIL};
use crate::DecodeError;

/// The marker that opens a non-scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Marker {
    Null,
    BackReference,
    Object,
    List,
    Map,
    Value,
    String,
}

impl Marker {
    fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            b'n' => Self::Null,
            b'r' => Self::BackReference,
            b'o' => Self::Object,
            b'l' => Self::List,
            b'm' => Self::Map,
            b'v' => Self::Value,
            b'[' => Self::String,
            _ => return None,
        })
    }
}

/// Cursor over the text form.
///
/// Slices it hands out borrow from the input, so decoded names and strings
/// are only copied when a value takes ownership of them.
#[derive(Debug)]
pub(crate) struct TextReader<'de> {
    input: &'de str,
    pos: usize,
}

const SNIPPET_CHARS: usize = 16;

impl<'de> TextReader<'de> {
    #[inline]
    pub const fn new(input: &'de str) -> Self {
        Self { input, pos: 0 }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    /// Moves back to an earlier offset, to report an error at the start of a token.
    #[inline]
    pub fn rewind(&mut self, offset: usize) {
        debug_assert!(offset <= self.pos);
        self.pos = offset;
    }

    #[inline]
    fn rest(&self) -> &'de str {
        &self.input[self.pos..]
    }

    fn snippet(&self) -> String {
        self.rest().chars().take(SNIPPET_CHARS).collect()
    }

    /// Builds an [`DecodeError::UnexpectedToken`] at the current offset.
    pub fn unexpected(&self, expected: &'static str) -> DecodeError {
        if self.pos >= self.input.len() {
            return DecodeError::UnexpectedEnd { offset: self.pos };
        }
        DecodeError::UnexpectedToken {
            offset: self.pos,
            expected,
            found: self.snippet(),
        }
    }

    /// Consumes `~n` if it comes next.
    pub fn take_null(&mut self) -> bool {
        if self.rest().starts_with(grammar::NULL) {
            self.pos += grammar::NULL.len();
            true
        } else {
            false
        }
    }

    /// Consumes and returns the next marker.
    pub fn marker(&mut self, expected: &'static str) -> Result<Marker, DecodeError> {
        let bytes = self.rest().as_bytes();
        match bytes {
            [SIGIL, kind, ..] => match Marker::from_byte(*kind) {
                Some(marker) => {
                    self.pos += 2;
                    Ok(marker)
                }
                None => Err(self.unexpected(expected)),
            },
            [SIGIL] | [] => Err(DecodeError::UnexpectedEnd {
                offset: self.input.len(),
            }),
            _ => Err(self.unexpected(expected)),
        }
    }

    /// Consumes the next marker and checks it is `marker`.
    pub fn expect_marker(
        &mut self,
        marker: Marker,
        expected: &'static str,
    ) -> Result<(), DecodeError> {
        let start = self.pos;
        if self.marker(expected)? == marker {
            Ok(())
        } else {
            self.pos = start;
            Err(self.unexpected(expected))
        }
    }

    /// Consumes text up to and including `terminator`, returning the text before it.
    pub fn until(&mut self, terminator: u8) -> Result<&'de str, DecodeError> {
        let rest = self.rest();
        match rest.bytes().position(|b| b == terminator) {
            Some(index) => {
                self.pos += index + 1;
                Ok(&rest[..index])
            }
            None => Err(DecodeError::UnexpectedEnd {
                offset: self.input.len(),
            }),
        }
    }

    /// Reads a literal up to `terminator` and parses it.
    pub fn parse_until<T: FromStr>(
        &mut self,
        terminator: u8,
        target: &'static str,
    ) -> Result<T, DecodeError> {
        let offset = self.pos;
        let literal = self.until(terminator)?;
        literal.parse().map_err(|_| DecodeError::InvalidLiteral {
            offset,
            literal: literal.to_string(),
            target,
        })
    }

    /// Reads a scalar literal and its `;`.
    pub fn scalar(&mut self) -> Result<&'de str, DecodeError> {
        match self.rest().as_bytes().first() {
            None => Err(DecodeError::UnexpectedEnd { offset: self.pos }),
            Some(&SIGIL) => Err(self.unexpected("scalar literal")),
            Some(_) => self.until(b';'),
        }
    }

    /// Reads the body of a string whose `~[` marker was consumed.
    pub fn string_body(&mut self) -> Result<&'de str, DecodeError> {
        let len: usize = self.parse_until(b':', "string length")?;
        let start = self.pos;
        let end = start
            .checked_add(len)
            .filter(|&end| end <= self.input.len())
            .ok_or(DecodeError::UnexpectedEnd {
                offset: self.input.len(),
            })?;
        if !self.input.is_char_boundary(end) {
            return Err(DecodeError::InvalidStringBoundary { offset: start });
        }
        self.pos = end;
        Ok(&self.input[start..end])
    }

    /// Fails with [`DecodeError::TrailingData`] unless the input is consumed.
    pub fn expect_end(&self) -> Result<(), DecodeError> {
        if self.pos < self.input.len() {
            return Err(DecodeError::TrailingData { offset: self.pos });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Marker, TextReader};
    use crate::DecodeError;

    #[test]
    fn markers_and_scalars() {
        let mut reader = TextReader::new("~l2;17;~n");
        assert_eq!(reader.marker("list").unwrap(), Marker::List);
        assert_eq!(reader.parse_until::<usize>(b';', "length").unwrap(), 2);
        assert_eq!(reader.scalar().unwrap(), "17");
        assert!(reader.take_null());
        reader.expect_end().unwrap();
    }

    #[test]
    fn scalar_rejects_marker() {
        let mut reader = TextReader::new("~n");
        let err = reader.scalar().unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedToken { offset: 0, .. }));
    }

    #[test]
    fn string_body_is_verbatim() {
        let mut reader = TextReader::new("~[7:a;~n|ébc;");
        assert_eq!(reader.marker("string").unwrap(), Marker::String);
        assert_eq!(reader.string_body().unwrap(), "a;~n|é");
        assert_eq!(reader.scalar().unwrap(), "bc");
    }

    #[test]
    fn string_body_checks_boundaries() {
        let mut reader = TextReader::new("~[1:é");
        reader.marker("string").unwrap();
        assert!(matches!(
            reader.string_body(),
            Err(DecodeError::InvalidStringBoundary { offset: 4 })
        ));

        let mut reader = TextReader::new("~[9:abc");
        reader.marker("string").unwrap();
        assert!(matches!(
            reader.string_body(),
            Err(DecodeError::UnexpectedEnd { .. })
        ));
    }

    #[test]
    fn literal_errors_carry_offset() {
        let mut reader = TextReader::new("~l;x;");
        reader.marker("list").unwrap();
        let err = reader.parse_until::<usize>(b';', "length").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidLiteral { offset: 2, target: "length", .. }
        ));
    }

    #[test]
    fn trailing_data() {
        let mut reader = TextReader::new("1;2;");
        reader.scalar().unwrap();
        assert!(matches!(
            reader.expect_end(),
            Err(DecodeError::TrailingData { offset: 2 })
        ));
    }
}
