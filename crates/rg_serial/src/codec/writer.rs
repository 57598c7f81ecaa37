use alloc::string::String;
use core::fmt::{Display, Write};

use super::grammar;

/// How a type is named in an object header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeRef<'a> {
    /// First occurrence: the full type path.
    Name(&'a str),
    /// Later occurrences: the interned token.
    Token(u32),
}

/// Appends tokens of the text form to a buffer.
///
/// The writer only knows the grammar; identity and type bookkeeping happen in
/// the [`Encoder`](crate::Encoder).
#[derive(Debug, Default)]
pub(crate) struct TextWriter {
    buf: String,
}

// Writing into a `String` cannot fail, so `fmt::Result`s are discarded.
impl TextWriter {
    #[inline]
    pub const fn new() -> Self {
        Self { buf: String::new() }
    }

    #[inline]
    pub fn null(&mut self) {
        self.buf.push_str(grammar::NULL);
    }

    pub fn back_reference(&mut self, id: u32) {
        let _ = write!(self.buf, "{}{id};", grammar::BACK_REFERENCE);
    }

    pub fn object_header(&mut self, type_ref: TypeRef<'_>, id: Option<u32>, len: usize) {
        self.buf.push_str(grammar::OBJECT);
        match type_ref {
            TypeRef::Name(name) => self.buf.push_str(name),
            TypeRef::Token(token) => {
                let _ = write!(self.buf, "{token}");
            }
        }
        self.buf.push('|');
        if let Some(id) = id {
            let _ = write!(self.buf, "{id}");
        }
        let _ = write!(self.buf, "|{len};");
    }

    pub fn list_header(&mut self, len: usize) {
        let _ = write!(self.buf, "{}{len};", grammar::LIST);
    }

    pub fn map_header(&mut self, len: usize) {
        let _ = write!(self.buf, "{}{len};", grammar::MAP);
    }

    pub fn value_header(&mut self, len: usize) {
        let _ = write!(self.buf, "{}{len};", grammar::VALUE);
    }

    /// Length-prefixed, so the content is copied verbatim and may contain anything.
    pub fn string(&mut self, value: &str) {
        let _ = write!(self.buf, "{}{}:", grammar::STRING, value.len());
        self.buf.push_str(value);
    }

    /// The literal must not contain `;` nor start with `~`.
    pub fn scalar(&mut self, value: impl Display) {
        let _ = write!(self.buf, "{value};");
    }

    #[inline]
    pub fn take(&mut self) -> String {
        core::mem::take(&mut self.buf)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{TextWriter, TypeRef};

    #[test]
    fn headers_and_scalars() {
        let mut writer = TextWriter::new();
        writer.object_header(TypeRef::Name("app::Node"), Some(0), 2);
        writer.scalar(-5_i32);
        writer.back_reference(0);
        writer.object_header(TypeRef::Token(0), None, 0);
        writer.null();
        assert_eq!(writer.take(), "~oapp::Node|0|2;-5;~r0;~o0||0;~n");
    }

    #[test]
    fn strings_are_length_prefixed_in_bytes() {
        let mut writer = TextWriter::new();
        writer.string("é;~n");
        assert_eq!(writer.take(), "~[5:é;~n");
    }
}
